//! Postgres drink store.
//!
//! Drinks live in a single table with a unique title and the recipe kept
//! as a JSONB passthrough blob. All queries use parameterized statements.

use crate::models::{Drink, RecipeIngredient};
use crate::store::{validate_drink_fields, DrinkStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

/// Postgres unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Drink store backed by a Postgres connection pool.
pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_drink(row: &PgRow) -> Result<Drink, StoreError> {
    let id: i64 = row.try_get("id").map_err(map_db_error)?;
    let title: String = row.try_get("title").map_err(map_db_error)?;
    let recipe_json: serde_json::Value = row.try_get("recipe").map_err(map_db_error)?;
    let recipe: Vec<RecipeIngredient> = serde_json::from_value(recipe_json)
        .map_err(|e| StoreError::Backend(format!("stored recipe is not decodable: {e}")))?;

    Ok(Drink { id, title, recipe })
}

fn map_db_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::DuplicateTitle;
        }
    }
    StoreError::Backend(err.to_string())
}

fn recipe_to_json(recipe: &[RecipeIngredient]) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(recipe)
        .map_err(|e| StoreError::Backend(format!("recipe is not encodable: {e}")))
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    #[instrument(skip_all, name = "menu.store.list")]
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows = sqlx::query("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.iter().map(row_to_drink).collect()
    }

    #[instrument(skip_all, name = "menu.store.get")]
    async fn get(&self, id: i64) -> Result<Drink, StoreError> {
        let row = sqlx::query("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .ok_or(StoreError::RecordNotFound)?;

        row_to_drink(&row)
    }

    #[instrument(skip_all, name = "menu.store.insert")]
    async fn insert(&self, title: &str, recipe: &[RecipeIngredient]) -> Result<Drink, StoreError> {
        validate_drink_fields(Some(title), Some(recipe))?;

        let row = sqlx::query(
            "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(recipe_to_json(recipe)?)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        row_to_drink(&row)
    }

    #[instrument(skip_all, name = "menu.store.update")]
    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[RecipeIngredient]>,
    ) -> Result<Drink, StoreError> {
        validate_drink_fields(title, recipe)?;

        let recipe_json = match recipe {
            Some(recipe) => Some(recipe_to_json(recipe)?),
            None => None,
        };

        let row = sqlx::query(
            r#"
            UPDATE drinks
            SET title = COALESCE($2, title),
                recipe = COALESCE($3, recipe)
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(recipe_json)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or(StoreError::RecordNotFound)?;

        row_to_drink(&row)
    }

    #[instrument(skip_all, name = "menu.store.delete")]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }
}
