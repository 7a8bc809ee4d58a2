//! Drink CRUD handlers.
//!
//! The public listing returns short forms only; every other operation is
//! wrapped by the authorization middleware and receives the verified
//! claims via request extensions.

use crate::auth::Claims;
use crate::errors::MenuError;
use crate::models::{
    CreateDrinkRequest, DeleteResponse, DrinkLong, DrinkShort, DrinksResponse, UpdateDrinkRequest,
};
use crate::routes::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;
use tracing::instrument;

/// `GET /drinks` - public listing, short forms only.
#[instrument(skip_all, name = "menu.handlers.get_drinks")]
pub async fn get_drinks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DrinksResponse<DrinkShort>>, MenuError> {
    let drinks = state.store.list().await?;

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(|drink| drink.short()).collect(),
    }))
}

/// `GET /drinks-detail` - requires `get:drinks-detail`, long forms.
#[instrument(skip_all, name = "menu.handlers.get_drinks_detail")]
pub async fn get_drinks_detail(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DrinksResponse<DrinkLong>>, MenuError> {
    tracing::debug!(
        target: "menu.handlers",
        permissions = ?claims.permissions,
        "Listing drinks in long form"
    );

    let drinks = state.store.list().await?;

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(|drink| drink.long()).collect(),
    }))
}

/// `POST /drinks` - requires `post:drinks`.
///
/// A missing or malformed body, a blank title, an empty recipe, or a
/// duplicate title are all 400s.
#[instrument(skip_all, name = "menu.handlers.create_drink")]
pub async fn create_drink(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    payload: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, MenuError> {
    let Json(body) = payload.map_err(|e| MenuError::BadRequest(e.to_string()))?;

    if body.title.trim().is_empty() || body.recipe.is_empty() {
        return Err(MenuError::BadRequest(
            "title and recipe are both required".to_string(),
        ));
    }

    let drink = state.store.insert(&body.title, &body.recipe).await?;
    tracing::info!(target: "menu.handlers", drink_id = drink.id, "Drink created");

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// `PATCH /drinks/:id` - requires `patch:drinks`, partial update.
///
/// An unknown id is a 404; a malformed body is a 422.
#[instrument(skip_all, name = "menu.handlers.update_drink")]
pub async fn update_drink(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    Path(drink_id): Path<i64>,
    payload: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, MenuError> {
    let Json(body) = payload.map_err(|e| MenuError::Unprocessable(e.to_string()))?;

    let drink = state
        .store
        .update(drink_id, body.title.as_deref(), body.recipe.as_deref())
        .await?;
    tracing::info!(target: "menu.handlers", drink_id, "Drink updated");

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// `DELETE /drinks/:id` - requires `delete:drinks`.
#[instrument(skip_all, name = "menu.handlers.delete_drink")]
pub async fn delete_drink(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    Path(drink_id): Path<i64>,
) -> Result<Json<DeleteResponse>, MenuError> {
    state.store.delete(drink_id).await?;
    tracing::info!(target: "menu.handlers", drink_id, "Drink deleted");

    Ok(Json(DeleteResponse {
        success: true,
        delete: drink_id,
    }))
}
