//! Catalog module: `SQLite` persistence for ingredients, dishes and recipes.
//!
//! # Overview
//!
//! - [`Catalog`] - concrete store wrapping a [`Database`]
//! - [`CatalogRepository`] - the write contract used by ingestion and normalization
//! - [`Ingredient`], [`Dish`], [`DishIngredient`] - stored rows
//! - [`CatalogError`] - operation error types
//!
//! Every write is its own statement and commits on its own; there is no
//! long-running transaction, so an interrupted batch keeps everything written
//! before the failing call.
//!
//! # Example
//!
//! ```ignore
//! use recipe_taxonomy::{Catalog, Database};
//!
//! let catalog = Catalog::new(Database::new_in_memory().await?);
//! let beef = catalog.get_or_create_ingredient("beef", Some("meat")).await?;
//! assert_eq!(beef, catalog.get_or_create_ingredient("beef", None).await?);
//! ```

mod error;
mod models;
mod repository;

pub use error::{CatalogDbErrorKind, CatalogError};
pub use models::{Dish, DishIngredient, Ingredient, NewDish, NewRecipe, TaxonomyStats};
pub use repository::CatalogRepository;

use sqlx::Row;
use tracing::{debug, instrument, trace};

use crate::db::Database;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// `SQLite`-backed catalog of dishes, ingredients and raw recipes.
#[derive(Debug, Clone)]
pub struct Catalog {
    db: Database,
}

impl Catalog {
    /// Creates a catalog over the given database connection.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the underlying database handle.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    // ==================== Ingredients ====================

    /// Returns the id of the ingredient named `name`, creating it when absent.
    ///
    /// New rows get `category` and `is_base = 0`. An existing row is returned
    /// untouched, whatever `category` is passed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] for a blank name and
    /// [`CatalogError::Database`] if a query fails.
    #[instrument(skip(self))]
    pub async fn get_or_create_ingredient(&self, name: &str, category: Option<&str>) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName {
                entity: "ingredient",
            });
        }

        if let Some(id) = self.ingredient_id(name).await? {
            trace!(id, "ingredient exists");
            return Ok(id);
        }

        let inserted = sqlx::query_scalar::<_, i64>(
            r"INSERT INTO ingredients (name, category, is_base)
              VALUES (?, ?, 0)
              ON CONFLICT(name) DO NOTHING
              RETURNING id",
        )
        .bind(name)
        .bind(category)
        .fetch_optional(self.db.pool())
        .await?;

        if let Some(id) = inserted {
            debug!(id, "ingredient created");
            return Ok(id);
        }

        // Another writer created it between the lookup and the insert.
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM ingredients WHERE name = ?")
            .bind(name)
            .fetch_one(self.db.pool())
            .await?;
        Ok(id)
    }

    /// Marks `name` as a base ingredient in `category`, creating it if absent.
    ///
    /// An existing row keeps its id; its category is overwritten and any
    /// parent it picked up under an earlier table is cleared, since a base
    /// never has a parent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] for a blank name and
    /// [`CatalogError::Database`] if a query fails.
    #[instrument(skip(self))]
    pub async fn upsert_base_ingredient(&self, name: &str, category: &str) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName {
                entity: "ingredient",
            });
        }

        if let Some(id) = self.ingredient_id(name).await? {
            sqlx::query(
                "UPDATE ingredients SET is_base = 1, category = ?, parent_id = NULL WHERE id = ?",
            )
                .bind(category)
                .bind(id)
                .execute(self.db.pool())
                .await?;
            debug!(id, "existing ingredient promoted to base");
            return Ok(id);
        }

        let row = sqlx::query(
            r"INSERT INTO ingredients (name, category, is_base)
              VALUES (?, ?, 1)
              RETURNING id",
        )
        .bind(name)
        .bind(category)
        .fetch_one(self.db.pool())
        .await?;

        let id: i64 = row.get("id");
        debug!(id, "base ingredient created");
        Ok(id)
    }

    /// Maps unmapped ingredients containing `keyword` onto the base `base_id`.
    ///
    /// A single `UPDATE` sets `parent_id` and `category` on every row whose
    /// name contains `keyword` as a plain, case-sensitive substring, whose
    /// name is not `base_name`, which has no parent yet (`NULL` or `0`) and
    /// which is not itself a base ingredient. Rows that already have a parent
    /// are never touched, which is what makes repeated runs map nothing new.
    ///
    /// ASCII case matters as well: a `beef` keyword does not claim
    /// `Beef stock`, so tables for cased scripts list each spelling they
    /// want matched.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the update fails.
    #[instrument(skip(self))]
    pub async fn assign_parent_by_keyword(
        &self,
        base_id: i64,
        base_name: &str,
        category: &str,
        keyword: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            r"UPDATE ingredients
              SET parent_id = ?, category = ?
              WHERE instr(name, ?) > 0
                AND name != ?
                AND (parent_id IS NULL OR parent_id = 0)
                AND is_base = 0",
        )
        .bind(base_id)
        .bind(category)
        .bind(keyword)
        .bind(base_name)
        .execute(self.db.pool())
        .await?;

        let mapped = result.rows_affected();
        trace!(mapped, "keyword sweep finished");
        Ok(mapped)
    }

    /// Clears every parent assignment so the normalizer can run from scratch.
    ///
    /// Categories and base flags are left as they are. Returns the number of
    /// rows that had a parent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the update fails.
    #[instrument(skip(self))]
    pub async fn clear_parents(&self) -> Result<u64> {
        let result = sqlx::query("UPDATE ingredients SET parent_id = NULL WHERE parent_id IS NOT NULL")
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Looks up an ingredient by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "SELECT id, name, category, parent_id, is_base FROM ingredients WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(ingredient)
    }

    /// Looks up an ingredient by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn ingredient(&self, id: i64) -> Result<Option<Ingredient>> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "SELECT id, name, category, parent_id, is_base FROM ingredients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(ingredient)
    }

    /// Returns up to `limit` ingredients mapped onto the base named `base_name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn children_of(&self, base_name: &str, limit: i64) -> Result<Vec<Ingredient>> {
        let children = sqlx::query_as::<_, Ingredient>(
            r"SELECT i.id, i.name, i.category, i.parent_id, i.is_base
              FROM ingredients i
              JOIN ingredients p ON i.parent_id = p.id
              WHERE p.name = ?
              ORDER BY i.id
              LIMIT ?",
        )
        .bind(base_name)
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;
        Ok(children)
    }

    /// Returns up to `limit` non-base ingredients that have no parent, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn unmapped_ingredients(&self, limit: i64) -> Result<Vec<Ingredient>> {
        let rows = sqlx::query_as::<_, Ingredient>(
            r"SELECT id, name, category, parent_id, is_base
              FROM ingredients
              WHERE (parent_id IS NULL OR parent_id = 0) AND is_base = 0
              ORDER BY id
              LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    /// Counts base, mapped and unmapped ingredient rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn taxonomy_stats(&self) -> Result<TaxonomyStats> {
        let row = sqlx::query(
            r"SELECT
                COALESCE(SUM(CASE WHEN is_base = 1 THEN 1 ELSE 0 END), 0) AS base,
                COALESCE(SUM(CASE WHEN parent_id IS NOT NULL AND parent_id != 0 THEN 1 ELSE 0 END), 0) AS mapped,
                COALESCE(SUM(CASE WHEN (parent_id IS NULL OR parent_id = 0) AND is_base = 0 THEN 1 ELSE 0 END), 0) AS unmapped,
                COUNT(*) AS total
              FROM ingredients",
        )
        .fetch_one(self.db.pool())
        .await?;

        Ok(TaxonomyStats {
            base: row.get("base"),
            mapped: row.get("mapped"),
            unmapped: row.get("unmapped"),
            total: row.get("total"),
        })
    }

    async fn ingredient_id(&self, name: &str) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM ingredients WHERE name = ?")
            .bind(name)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(id)
    }

    // ==================== Dishes ====================

    /// Returns the id of the dish named `dish.name`, creating it when absent.
    ///
    /// An existing dish is never updated.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] for a blank name and
    /// [`CatalogError::Database`] if a query fails.
    #[instrument(skip(self, dish), fields(name = %dish.name))]
    pub async fn get_or_create_dish(&self, dish: &NewDish<'_>) -> Result<i64> {
        if dish.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { entity: "dish" });
        }

        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM dishes WHERE name = ?")
            .bind(dish.name)
            .fetch_optional(self.db.pool())
            .await?;
        if let Some(id) = existing {
            trace!(id, "dish exists");
            return Ok(id);
        }

        let inserted = sqlx::query_scalar::<_, i64>(
            r"INSERT INTO dishes (name, category, image_url, description)
              VALUES (?, ?, ?, ?)
              ON CONFLICT(name) DO NOTHING
              RETURNING id",
        )
        .bind(dish.name)
        .bind(dish.category)
        .bind(dish.image_url)
        .bind(dish.description)
        .fetch_optional(self.db.pool())
        .await?;
        if let Some(id) = inserted {
            debug!(id, "dish created");
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM dishes WHERE name = ?")
            .bind(dish.name)
            .fetch_one(self.db.pool())
            .await?;
        Ok(id)
    }

    /// Looks up a dish by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn dish_by_name(&self, name: &str) -> Result<Option<Dish>> {
        let dish = sqlx::query_as::<_, Dish>(
            "SELECT id, name, category, image_url, description FROM dishes WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(dish)
    }

    /// Links an ingredient to a dish unless the pair is already linked.
    ///
    /// Returns `true` when a row was written. A duplicate pair, or any other
    /// constraint violation raised while linking, counts as "already linked"
    /// and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] for failures other than constraint
    /// violations.
    #[instrument(skip(self))]
    pub async fn link_dish_ingredient(
        &self,
        dish_id: i64,
        ingredient_id: i64,
        is_main: bool,
        amount: Option<&str>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"INSERT OR IGNORE INTO dish_ingredients (dish_id, ingredient_id, is_main, amount)
              VALUES (?, ?, ?, ?)",
        )
        .bind(dish_id)
        .bind(ingredient_id)
        .bind(is_main)
        .bind(amount)
        .execute(self.db.pool())
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(err) => {
                let err = CatalogError::from(err);
                if err.is_constraint_violation() {
                    debug!(error = %err, "link treated as existing");
                    Ok(false)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Returns the ingredients linked to a dish, in link order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn dish_ingredients(&self, dish_id: i64) -> Result<Vec<DishIngredient>> {
        let rows = sqlx::query_as::<_, DishIngredient>(
            r"SELECT di.dish_id, di.ingredient_id, i.name, di.is_main, di.amount
              FROM dish_ingredients di
              JOIN ingredients i ON i.id = di.ingredient_id
              WHERE di.dish_id = ?
              ORDER BY di.rowid",
        )
        .bind(dish_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows)
    }

    // ==================== Recipes ====================

    /// Appends a raw recipe row linked to its dish.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the insert fails.
    #[instrument(skip(self, recipe), fields(dish_id = recipe.dish_id))]
    pub async fn save_recipe(&self, recipe: &NewRecipe<'_>) -> Result<i64> {
        let row = sqlx::query(
            r"INSERT INTO recipes (
                dish_id, title, source, source_id, description,
                ingredients_raw, cooking_method, cooking_time,
                servings, difficulty, image_url, view_count, recommend_count
              )
              VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              RETURNING id",
        )
        .bind(recipe.dish_id)
        .bind(recipe.title)
        .bind(recipe.source)
        .bind(recipe.source_id)
        .bind(recipe.description)
        .bind(recipe.ingredients_raw)
        .bind(recipe.cooking_method)
        .bind(recipe.cooking_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty)
        .bind(recipe.image_url)
        .bind(recipe.view_count)
        .bind(recipe.recommend_count)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get("id"))
    }

    // ==================== Counts ====================

    /// Number of ingredient rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    pub async fn count_ingredients(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM ingredients").await
    }

    /// Number of dish rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    pub async fn count_dishes(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM dishes").await
    }

    /// Number of recipe rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    pub async fn count_recipes(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM recipes").await
    }

    /// Number of dish/ingredient links.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    pub async fn count_links(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM dish_ingredients").await
    }

    async fn count(&self, sql: &'static str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn catalog() -> Catalog {
        Catalog::new(Database::new_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_get_or_create_ingredient_is_idempotent() {
        let catalog = catalog().await;

        let first = catalog
            .get_or_create_ingredient("소고기", Some("육류"))
            .await
            .unwrap();
        let second = catalog.get_or_create_ingredient("소고기", None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.count_ingredients().await.unwrap(), 1);

        let row = catalog.ingredient(first).await.unwrap().unwrap();
        assert_eq!(row.category.as_deref(), Some("육류"), "first category is kept");
        assert!(!row.is_base);
        assert_eq!(row.parent_id, None);
    }

    #[tokio::test]
    async fn test_get_or_create_ingredient_exact_name_only() {
        let catalog = catalog().await;

        let beef = catalog.get_or_create_ingredient("beef", None).await.unwrap();
        let spaced = catalog.get_or_create_ingredient("beef ", None).await.unwrap();
        let upper = catalog.get_or_create_ingredient("Beef", None).await.unwrap();

        assert_ne!(beef, spaced);
        assert_ne!(beef, upper);
        assert_eq!(catalog.count_ingredients().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_get_or_create_ingredient_rejects_blank_name() {
        let catalog = catalog().await;
        let err = catalog.get_or_create_ingredient("  ", None).await.unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName { entity: "ingredient" }));
    }

    #[tokio::test]
    async fn test_upsert_base_ingredient_creates_base_row() {
        let catalog = catalog().await;

        let id = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        let row = catalog.ingredient(id).await.unwrap().unwrap();

        assert!(row.is_base);
        assert_eq!(row.category.as_deref(), Some("meat"));
    }

    #[tokio::test]
    async fn test_upsert_base_ingredient_promotes_existing_row() {
        let catalog = catalog().await;

        let plain = catalog
            .get_or_create_ingredient("beef", Some("groceries"))
            .await
            .unwrap();
        let base = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();

        assert_eq!(plain, base);
        let row = catalog.ingredient(base).await.unwrap().unwrap();
        assert!(row.is_base);
        assert_eq!(row.category.as_deref(), Some("meat"));
        assert_eq!(catalog.count_ingredients().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_assign_parent_by_keyword_maps_substring_matches() {
        let catalog = catalog().await;
        let base = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        for name in ["beef brisket", "ground beef", "pork belly"] {
            catalog.get_or_create_ingredient(name, None).await.unwrap();
        }

        let mapped = catalog
            .assign_parent_by_keyword(base, "beef", "meat", "beef")
            .await
            .unwrap();

        assert_eq!(mapped, 2);
        let brisket = catalog.ingredient_by_name("beef brisket").await.unwrap().unwrap();
        assert_eq!(brisket.parent_id, Some(base));
        assert_eq!(brisket.category.as_deref(), Some("meat"));
        let pork = catalog.ingredient_by_name("pork belly").await.unwrap().unwrap();
        assert!(!pork.is_mapped());
    }

    #[tokio::test]
    async fn test_assign_parent_by_keyword_is_ascii_case_sensitive() {
        let catalog = catalog().await;
        let base = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        catalog.get_or_create_ingredient("Beef stock", None).await.unwrap();
        catalog.get_or_create_ingredient("corned beef", None).await.unwrap();

        let mapped = catalog
            .assign_parent_by_keyword(base, "beef", "meat", "beef")
            .await
            .unwrap();

        assert_eq!(mapped, 1);
        let stock = catalog.ingredient_by_name("Beef stock").await.unwrap().unwrap();
        assert!(!stock.is_mapped());
    }

    #[tokio::test]
    async fn test_upsert_base_ingredient_clears_existing_parent() {
        let catalog = catalog().await;
        let shellfish = catalog.upsert_base_ingredient("shellfish", "seafood").await.unwrap();
        catalog.get_or_create_ingredient("oyster sauce", None).await.unwrap();
        catalog
            .assign_parent_by_keyword(shellfish, "shellfish", "seafood", "oyster")
            .await
            .unwrap();

        let id = catalog.upsert_base_ingredient("oyster sauce", "sauce").await.unwrap();

        let row = catalog.ingredient(id).await.unwrap().unwrap();
        assert!(row.is_base);
        assert_eq!(row.parent_id, None);
    }

    #[tokio::test]
    async fn test_assign_parent_by_keyword_skips_base_name_and_base_rows() {
        let catalog = catalog().await;
        let beef = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        catalog.upsert_base_ingredient("beef stock", "sauce").await.unwrap();

        let mapped = catalog
            .assign_parent_by_keyword(beef, "beef", "meat", "beef")
            .await
            .unwrap();

        assert_eq!(mapped, 0);
        let own = catalog.ingredient(beef).await.unwrap().unwrap();
        assert_eq!(own.parent_id, None);
    }

    #[tokio::test]
    async fn test_assign_parent_by_keyword_leaves_mapped_rows_alone() {
        let catalog = catalog().await;
        let beef = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        let stock = catalog.upsert_base_ingredient("stock", "soup").await.unwrap();
        catalog.get_or_create_ingredient("beef stock cube", None).await.unwrap();

        assert_eq!(
            catalog
                .assign_parent_by_keyword(beef, "beef", "meat", "beef")
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            catalog
                .assign_parent_by_keyword(stock, "stock", "soup", "stock")
                .await
                .unwrap(),
            0
        );

        let cube = catalog.ingredient_by_name("beef stock cube").await.unwrap().unwrap();
        assert_eq!(cube.parent_id, Some(beef));
        assert_eq!(cube.category.as_deref(), Some("meat"));
    }

    #[tokio::test]
    async fn test_assign_parent_by_keyword_treats_zero_parent_as_unset() {
        let catalog = catalog().await;
        let beef = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        let cheek = catalog.get_or_create_ingredient("beef cheek", None).await.unwrap();
        sqlx::query("UPDATE ingredients SET parent_id = 0 WHERE id = ?")
            .bind(cheek)
            .execute(catalog.database().pool())
            .await
            .unwrap();

        let mapped = catalog
            .assign_parent_by_keyword(beef, "beef", "meat", "beef")
            .await
            .unwrap();
        assert_eq!(mapped, 1);
    }

    #[tokio::test]
    async fn test_assign_parent_by_keyword_is_literal_substring() {
        let catalog = catalog().await;
        let base = catalog.upsert_base_ingredient("percent", "misc").await.unwrap();
        catalog.get_or_create_ingredient("milk 2%", None).await.unwrap();
        catalog.get_or_create_ingredient("milk", None).await.unwrap();

        let mapped = catalog
            .assign_parent_by_keyword(base, "percent", "misc", "%")
            .await
            .unwrap();
        assert_eq!(mapped, 1, "'%' must not act as a wildcard");
    }

    #[tokio::test]
    async fn test_clear_parents_resets_mapping() {
        let catalog = catalog().await;
        let beef = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        catalog.get_or_create_ingredient("beef shank", None).await.unwrap();
        catalog
            .assign_parent_by_keyword(beef, "beef", "meat", "beef")
            .await
            .unwrap();

        assert_eq!(catalog.clear_parents().await.unwrap(), 1);
        let shank = catalog.ingredient_by_name("beef shank").await.unwrap().unwrap();
        assert!(!shank.is_mapped());
        assert_eq!(shank.category.as_deref(), Some("meat"), "category is kept");
    }

    #[tokio::test]
    async fn test_get_or_create_dish_is_idempotent_and_immutable() {
        let catalog = catalog().await;

        let dish = NewDish {
            name: "떡국",
            category: Some("국/탕"),
            image_url: Some("https://img.example/1.jpg"),
            description: Some("설날 떡국"),
        };
        let first = catalog.get_or_create_dish(&dish).await.unwrap();
        let second = catalog
            .get_or_create_dish(&NewDish {
                category: Some("other"),
                ..dish
            })
            .await
            .unwrap();

        assert_eq!(first, second);
        let stored = catalog.dish_by_name("떡국").await.unwrap().unwrap();
        assert_eq!(stored.category.as_deref(), Some("국/탕"));
        assert_eq!(catalog.count_dishes().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_link_dish_ingredient_duplicate_is_noop() {
        let catalog = catalog().await;
        let dish = catalog.get_or_create_dish(&NewDish::named("stew")).await.unwrap();
        let beef = catalog.get_or_create_ingredient("beef", None).await.unwrap();

        assert!(catalog.link_dish_ingredient(dish, beef, true, Some("100g")).await.unwrap());
        assert!(!catalog.link_dish_ingredient(dish, beef, false, Some("200g")).await.unwrap());

        let links = catalog.dish_ingredients(dish).await.unwrap();
        assert_eq!(links.len(), 1);
        assert!(links[0].is_main);
        assert_eq!(links[0].amount.as_deref(), Some("100g"));
        assert_eq!(links[0].name, "beef");
    }

    #[tokio::test]
    async fn test_save_recipe_appends_rows() {
        let catalog = catalog().await;
        let dish = catalog.get_or_create_dish(&NewDish::named("stew")).await.unwrap();
        let recipe = NewRecipe {
            dish_id: dish,
            title: Some("Beef stew"),
            view_count: 12,
            ..NewRecipe::default()
        };

        let first = catalog.save_recipe(&recipe).await.unwrap();
        let second = catalog.save_recipe(&recipe).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(catalog.count_recipes().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_taxonomy_stats_counts_rows() {
        let catalog = catalog().await;
        let beef = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        catalog.get_or_create_ingredient("beef rib", None).await.unwrap();
        catalog.get_or_create_ingredient("tofu", None).await.unwrap();
        catalog
            .assign_parent_by_keyword(beef, "beef", "meat", "beef")
            .await
            .unwrap();

        let stats = catalog.taxonomy_stats().await.unwrap();
        assert_eq!(
            stats,
            TaxonomyStats {
                base: 1,
                mapped: 1,
                unmapped: 1,
                total: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_children_and_unmapped_queries() {
        let catalog = catalog().await;
        let beef = catalog.upsert_base_ingredient("beef", "meat").await.unwrap();
        catalog.get_or_create_ingredient("beef rib", None).await.unwrap();
        catalog.get_or_create_ingredient("beef tongue", None).await.unwrap();
        catalog.get_or_create_ingredient("tofu", None).await.unwrap();
        catalog
            .assign_parent_by_keyword(beef, "beef", "meat", "beef")
            .await
            .unwrap();

        let children = catalog.children_of("beef", 10).await.unwrap();
        let names: Vec<_> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["beef rib", "beef tongue"]);

        let unmapped = catalog.unmapped_ingredients(10).await.unwrap();
        assert_eq!(unmapped.len(), 1);
        assert_eq!(unmapped[0].name, "tofu");
    }
}
