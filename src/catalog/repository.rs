//! Repository seam for catalog persistence operations.
//!
//! Ingestion and taxonomy normalization depend on this trait rather than on
//! [`Catalog`] directly, so the write contract (get-or-create, insert-if-absent,
//! base upsert, keyword sweep) is spelled out in one place.

use async_trait::async_trait;

use super::{Catalog, NewDish, NewRecipe, Result};

/// Data-access contract for ingredient, dish and recipe writes.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns the id of the ingredient with exactly this name, creating a
    /// non-base row with `category` if none exists.
    async fn get_or_create_ingredient(&self, name: &str, category: Option<&str>) -> Result<i64>;

    /// Returns the id of the dish with exactly this name, creating it if needed.
    async fn get_or_create_dish(&self, dish: &NewDish<'_>) -> Result<i64>;

    /// Links an ingredient to a dish unless the pair already exists.
    ///
    /// Returns `true` when a new link was written; an existing pair is a
    /// silent no-op.
    async fn link_dish_ingredient(
        &self,
        dish_id: i64,
        ingredient_id: i64,
        is_main: bool,
        amount: Option<&str>,
    ) -> Result<bool>;

    /// Marks the named ingredient as a base ingredient with `category`,
    /// creating it if absent and clearing any parent it held. Returns its id.
    async fn upsert_base_ingredient(&self, name: &str, category: &str) -> Result<i64>;

    /// Maps every unmapped, non-base ingredient whose name contains `keyword`
    /// (and is not `base_name` itself) onto `base_id`, stamping `category`.
    ///
    /// Returns the number of rows newly mapped.
    async fn assign_parent_by_keyword(
        &self,
        base_id: i64,
        base_name: &str,
        category: &str,
        keyword: &str,
    ) -> Result<u64>;

    /// Appends a raw recipe row.
    async fn save_recipe(&self, recipe: &NewRecipe<'_>) -> Result<i64>;
}

#[async_trait]
impl CatalogRepository for Catalog {
    async fn get_or_create_ingredient(&self, name: &str, category: Option<&str>) -> Result<i64> {
        Catalog::get_or_create_ingredient(self, name, category).await
    }

    async fn get_or_create_dish(&self, dish: &NewDish<'_>) -> Result<i64> {
        Catalog::get_or_create_dish(self, dish).await
    }

    async fn link_dish_ingredient(
        &self,
        dish_id: i64,
        ingredient_id: i64,
        is_main: bool,
        amount: Option<&str>,
    ) -> Result<bool> {
        Catalog::link_dish_ingredient(self, dish_id, ingredient_id, is_main, amount).await
    }

    async fn upsert_base_ingredient(&self, name: &str, category: &str) -> Result<i64> {
        Catalog::upsert_base_ingredient(self, name, category).await
    }

    async fn assign_parent_by_keyword(
        &self,
        base_id: i64,
        base_name: &str,
        category: &str,
        keyword: &str,
    ) -> Result<u64> {
        Catalog::assign_parent_by_keyword(self, base_id, base_name, category, keyword).await
    }

    async fn save_recipe(&self, recipe: &NewRecipe<'_>) -> Result<i64> {
        Catalog::save_recipe(self, recipe).await
    }
}
