//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Directory name under the user config home.
const APP_DIR: &str = "recipe-taxonomy";

/// TOML-backed file configuration for recipe-taxonomy defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// SQLite database file.
    pub database_path: Option<PathBuf>,
    /// JSON base-ingredient table used instead of the built-in one.
    pub base_table: Option<PathBuf>,
    /// Leading ingredients per record that get the main category (1..=50).
    pub main_ingredient_limit: Option<usize>,
    /// Label stored in each recipe's `source` column.
    pub source_label: Option<String>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
    /// Optional database pool max connections (1..=20).
    pub db_max_connections: Option<u32>,
    /// Optional database busy timeout in milliseconds.
    pub db_busy_timeout_ms: Option<u32>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.main_ingredient_limit
            && !(1..=50).contains(&limit)
        {
            bail!("Invalid config value for `main_ingredient_limit`: {limit}. Expected range: 1..=50");
        }

        if let Some(label) = &self.source_label
            && label.trim().is_empty()
        {
            bail!("Invalid config value for `source_label`: expected a non-empty string");
        }

        validate_db_max_connections(self.db_max_connections)?;
        validate_db_busy_timeout_ms(self.db_busy_timeout_ms)?;

        Ok(())
    }
}

fn validate_db_max_connections(value: Option<u32>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=20).contains(&value) {
        bail!("Invalid config value for `db_max_connections`: {value}. Expected range: 1..=20");
    }
    Ok(())
}

fn validate_db_busy_timeout_ms(value: Option<u32>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if value > 120_000 {
        bail!("Invalid config value for `db_busy_timeout_ms`: {value}. Expected range: 0..=120000");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }

    #[must_use]
    pub fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Tracing filter directive for this setting.
    #[must_use]
    pub fn filter_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }

    /// Resolves the setting from CLI flags, falling back to `file` when no flag is set.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool, file: Option<Self>) -> Self {
        if quiet {
            Self::Quiet
        } else {
            match verbose {
                0 => file.unwrap_or(Self::Default),
                1 => Self::Verbose,
                _ => Self::Debug,
            }
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/recipe-taxonomy/config.toml`
/// 2. `$HOME/.config/recipe-taxonomy/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(APP_DIR).join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_number = line_index + 1;

        match key {
            "database_path" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `database_path` value on line {line_number}")
                })?;
                cfg.database_path = Some(PathBuf::from(parsed));
            }
            "base_table" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `base_table` value on line {line_number}"))?;
                cfg.base_table = Some(PathBuf::from(parsed));
            }
            "main_ingredient_limit" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `main_ingredient_limit` value on line {line_number}")
                })?;
                let n = usize::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("main_ingredient_limit out of range"))?;
                cfg.main_ingredient_limit = Some(n);
            }
            "source_label" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `source_label` value on line {line_number}")
                })?;
                cfg.source_label = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_number}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            "db_max_connections" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `db_max_connections` value on line {line_number}")
                })?;
                let n = u32::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("db_max_connections out of range for u32"))?;
                cfg.db_max_connections = Some(n);
            }
            "db_busy_timeout_ms" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `db_busy_timeout_ms` value on line {line_number}")
                })?;
                let n = u32::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("db_busy_timeout_ms out of range for u32"))?;
                cfg.db_busy_timeout_ms = Some(n);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
main_ingredient_limit = 5
verbosity = "verbose"
"#,
        )
        .expect("partial config should parse");
        assert_eq!(cfg.main_ingredient_limit, Some(5));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Verbose));
        assert!(cfg.database_path.is_none());
    }

    #[test]
    fn test_parse_config_paths_and_label() {
        let cfg = parse_config_str(
            r#"
database_path = "/data/recipes.db"
base_table = "/etc/bases.json"
source_label = "만개의레시피"
"#,
        )
        .expect("paths should parse");
        assert_eq!(cfg.database_path, Some(PathBuf::from("/data/recipes.db")));
        assert_eq!(cfg.base_table, Some(PathBuf::from("/etc/bases.json")));
        assert_eq!(cfg.source_label.as_deref(), Some("만개의레시피"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_main_ingredient_limit() {
        let err = parse_config_str("main_ingredient_limit = 0").expect_err("0 is below range");
        assert!(err.to_string().contains("main_ingredient_limit"));

        let err = parse_config_str("main_ingredient_limit = 51").expect_err("51 is above range");
        assert!(err.to_string().contains("main_ingredient_limit"));
    }

    #[test]
    fn test_parse_config_rejects_blank_source_label() {
        let err = parse_config_str(r#"source_label = "  ""#).expect_err("blank label");
        assert!(err.to_string().contains("source_label"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("database_path = recipes.db").expect_err("unquoted path");
        assert!(err.to_string().contains("database_path"));
    }

    #[test]
    fn test_parse_config_rejects_numeric_values_with_trailing_tokens() {
        let err = parse_config_str("main_ingredient_limit = 4 trailing")
            .expect_err("expected trailing token error");
        assert!(err.to_string().contains("main_ingredient_limit"));
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r#"
main_ingredient_limit = 4 # leading items
source_label = "feed #2" # hash inside quotes is kept
"#,
        )
        .expect("config with comments should parse");
        assert_eq!(cfg.main_ingredient_limit, Some(4));
        assert_eq!(cfg.source_label.as_deref(), Some("feed #2"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("verbosity").expect_err("syntax error expected");
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_verbosity_as_str() {
        assert_eq!(VerbositySetting::Default.as_str(), "default");
        assert_eq!(VerbositySetting::Verbose.as_str(), "verbose");
        assert_eq!(VerbositySetting::Quiet.as_str(), "quiet");
        assert_eq!(VerbositySetting::Debug.as_str(), "debug");
    }

    #[test]
    fn test_verbosity_from_flags_prefers_cli() {
        let file = Some(VerbositySetting::Quiet);
        assert_eq!(VerbositySetting::from_flags(0, false, file), VerbositySetting::Quiet);
        assert_eq!(VerbositySetting::from_flags(1, false, file), VerbositySetting::Verbose);
        assert_eq!(VerbositySetting::from_flags(2, false, None), VerbositySetting::Debug);
        assert_eq!(VerbositySetting::from_flags(2, true, None), VerbositySetting::Quiet);
        assert_eq!(VerbositySetting::from_flags(0, false, None), VerbositySetting::Default);
        assert_eq!(VerbositySetting::Debug.filter_level(), "trace");
    }

    #[test]
    fn test_parse_config_rejects_unknown_keys() {
        let err = parse_config_str("unknown_key = 123").expect_err("unknown key error expected");
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("unknown_key"));
    }

    #[test]
    fn test_parse_config_db_options() {
        let cfg = parse_config_str(
            r#"
db_max_connections = 10
db_busy_timeout_ms = 3000
"#,
        )
        .expect("db options should parse");
        assert_eq!(cfg.db_max_connections, Some(10));
        assert_eq!(cfg.db_busy_timeout_ms, Some(3000));
    }

    #[test]
    fn test_parse_config_rejects_invalid_db_max_connections() {
        let err = parse_config_str("db_max_connections = 0").expect_err("0 is below range");
        assert!(err.to_string().contains("db_max_connections"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_db_busy_timeout_ms() {
        let err = parse_config_str("db_busy_timeout_ms = 120001")
            .expect_err("value above 120000 should be rejected");
        assert!(err.to_string().contains("db_busy_timeout_ms"));
    }
}
