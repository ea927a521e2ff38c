//! Reset command handler: clear every parent assignment.

use anyhow::Result;
use tracing::info;

use crate::config_runtime::Settings;

pub(crate) async fn run_reset_command(settings: &Settings) -> Result<()> {
    let catalog = super::open_catalog(settings).await?;
    let cleared = catalog.clear_parents().await.map_err(|err| {
        let hint = err.clone();
        super::catalog_failure(err, Some(&hint), "Failed to clear parent assignments")
    })?;
    catalog.database().clone().close().await;

    info!(cleared, "Parent assignments cleared");
    println!("Cleared {cleared} parent assignments");
    Ok(())
}
