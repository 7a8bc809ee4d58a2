//! Data models for the drink menu service.
//!
//! A drink is a titled recipe: an ordered list of ingredients, each with a
//! name, a display color and a parts count. Two JSON representations exist:
//! the public short form drops ingredient names, the long form is the full
//! record.

use serde::{Deserialize, Serialize};

/// One ingredient of a drink recipe. Stored as-is (passthrough), no
/// recipe semantics beyond the three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// A drink record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipeIngredient>,
}

/// Short-form ingredient: color and parts only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Public representation of a drink (ingredient names withheld).
#[derive(Debug, Clone, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full representation of a drink.
#[derive(Debug, Clone, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipeIngredient>,
}

impl Drink {
    /// Public short form: ingredient names are dropped.
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }

    /// Full long form.
    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

/// Request body for `POST /drinks`.
#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: String,
    #[serde(default)]
    pub recipe: Vec<RecipeIngredient>,
}

/// Request body for `PATCH /drinks/:id`. Both fields optional; absent
/// fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<Vec<RecipeIngredient>>,
}

/// Success envelope for list/create/update responses.
#[derive(Debug, Serialize)]
pub struct DrinksResponse<T: Serialize> {
    pub success: bool,
    pub drinks: Vec<T>,
}

/// Success envelope for delete responses.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}
