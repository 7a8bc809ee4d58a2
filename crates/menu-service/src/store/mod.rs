//! Drink store collaborator.
//!
//! The authorization layer treats drink storage as an external record
//! store with list/get/insert/update/delete operations on a single entity
//! type. The seam is the [`DrinkStore`] trait; production uses the
//! Postgres implementation, tests and local development use the in-memory
//! one.

use crate::models::{Drink, RecipeIngredient};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDrinkStore;
pub use postgres::PgDrinkStore;

/// Store operation failures, mapped deterministically to HTTP statuses
/// at the boundary (404 / 400 / 422 / 422).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    RecordNotFound,

    #[error("a drink with that title already exists")]
    DuplicateTitle,

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Record store over drink entities.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks, ordered by id.
    async fn list(&self) -> Result<Vec<Drink>, StoreError>;

    /// A single drink by id, or `RecordNotFound`.
    async fn get(&self, id: i64) -> Result<Drink, StoreError>;

    /// Insert a new drink. Titles are unique; a clash is `DuplicateTitle`.
    async fn insert(&self, title: &str, recipe: &[RecipeIngredient]) -> Result<Drink, StoreError>;

    /// Partially update a drink. `None` fields are left unchanged.
    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[RecipeIngredient]>,
    ) -> Result<Drink, StoreError>;

    /// Delete a drink by id, or `RecordNotFound`.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// Shared insert/update validation: titles must be non-blank, recipes
/// non-empty.
pub(crate) fn validate_drink_fields(
    title: Option<&str>,
    recipe: Option<&[RecipeIngredient]>,
) -> Result<(), StoreError> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(StoreError::ValidationFailed(
                "title must not be blank".to_string(),
            ));
        }
    }
    if let Some(recipe) = recipe {
        if recipe.is_empty() {
            return Err(StoreError::ValidationFailed(
                "recipe must contain at least one ingredient".to_string(),
            ));
        }
    }
    Ok(())
}
