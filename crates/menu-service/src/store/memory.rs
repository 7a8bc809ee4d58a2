//! In-memory drink store.
//!
//! Used by integration tests and local development. Matches the Postgres
//! implementation's semantics: ids are assigned sequentially, titles are
//! unique, partial updates leave absent fields unchanged.

use crate::models::{Drink, RecipeIngredient};
use crate::store::{validate_drink_fields, DrinkStore, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryInner {
    next_id: i64,
    drinks: Vec<Drink>,
}

/// Drink store backed by process memory.
#[derive(Default)]
pub struct MemoryDrinkStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner {
                next_id: 1,
                drinks: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        Ok(self.inner.read().await.drinks.clone())
    }

    async fn get(&self, id: i64) -> Result<Drink, StoreError> {
        self.inner
            .read()
            .await
            .drinks
            .iter()
            .find(|drink| drink.id == id)
            .cloned()
            .ok_or(StoreError::RecordNotFound)
    }

    async fn insert(&self, title: &str, recipe: &[RecipeIngredient]) -> Result<Drink, StoreError> {
        validate_drink_fields(Some(title), Some(recipe))?;

        let mut inner = self.inner.write().await;
        if inner.drinks.iter().any(|drink| drink.title == title) {
            return Err(StoreError::DuplicateTitle);
        }

        let drink = Drink {
            id: inner.next_id,
            title: title.to_string(),
            recipe: recipe.to_vec(),
        };
        inner.next_id += 1;
        inner.drinks.push(drink.clone());
        Ok(drink)
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[RecipeIngredient]>,
    ) -> Result<Drink, StoreError> {
        validate_drink_fields(title, recipe)?;

        let mut inner = self.inner.write().await;
        if let Some(title) = title {
            if inner
                .drinks
                .iter()
                .any(|drink| drink.title == title && drink.id != id)
            {
                return Err(StoreError::DuplicateTitle);
            }
        }

        let drink = inner
            .drinks
            .iter_mut()
            .find(|drink| drink.id == id)
            .ok_or(StoreError::RecordNotFound)?;

        if let Some(title) = title {
            drink.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            drink.recipe = recipe.to_vec();
        }
        Ok(drink.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.drinks.len();
        inner.drinks.retain(|drink| drink.id != id);

        if inner.drinks.len() == before {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }
}
