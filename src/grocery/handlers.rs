use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, families, state::AppState};

use super::{
    items, repo,
    repo::{GroceryItem, GroceryListRow},
};

/// Shape returned for a week whose list has not been persisted yet. Callers
/// treat `id: null` as "not yet created".
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListView {
    pub id: Option<Uuid>,
    pub family_id: Uuid,
    pub week_of: String,
    pub items: Vec<GroceryItem>,
}

impl GroceryListView {
    fn from_row(row: GroceryListRow) -> Self {
        Self {
            id: Some(row.id),
            family_id: row.family_id,
            week_of: row.week_of,
            items: row.items.0,
        }
    }

    fn empty(family_id: Uuid, week_of: String) -> Self {
        Self {
            id: None,
            family_id,
            week_of,
            items: Vec::new(),
        }
    }
}

async fn require_member(
    state: &AppState,
    user_id: Uuid,
) -> Result<families::repo::FamilyMember, ApiError> {
    families::repo::find_member_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::Forbidden("User not in a family"))
}

#[instrument(skip(state))]
pub async fn get_grocery_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(week_of): Path<String>,
) -> Result<Json<GroceryListView>, ApiError> {
    let member = require_member(&state, user_id).await?;
    let view = match repo::find_by_week(&state.db, member.family_id, &week_of).await? {
        Some(row) => GroceryListView::from_row(row),
        None => GroceryListView::empty(member.family_id, week_of),
    };
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: String,
    pub category: String,
}

#[instrument(skip(state, body))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(week_of): Path<String>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<GroceryListView>, ApiError> {
    let member = require_member(&state, user_id).await?;

    let mut item_list = repo::find_by_week(&state.db, member.family_id, &week_of)
        .await?
        .map(|row| row.items.0)
        .unwrap_or_default();
    item_list.push(GroceryItem::new(
        body.name,
        body.quantity,
        body.category,
        None,
        user_id,
    ));

    let row = repo::upsert_items(&state.db, member.family_id, &week_of, &item_list).await?;
    Ok(Json(GroceryListView::from_row(row)))
}

#[instrument(skip(state))]
pub async fn toggle_item_bought(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((week_of, item_index)): Path<(String, usize)>,
) -> Result<Json<GroceryListView>, ApiError> {
    let member = require_member(&state, user_id).await?;

    let mut item_list = repo::find_by_week(&state.db, member.family_id, &week_of)
        .await?
        .map(|row| row.items.0)
        .unwrap_or_default();
    if !items::toggle_bought(&mut item_list, item_index) {
        return Err(ApiError::NotFound("Item not found"));
    }

    let row = repo::upsert_items(&state.db, member.family_id, &week_of, &item_list).await?;
    Ok(Json(GroceryListView::from_row(row)))
}

#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((week_of, item_index)): Path<(String, usize)>,
) -> Result<StatusCode, ApiError> {
    let member = require_member(&state, user_id).await?;

    let mut item_list = repo::find_by_week(&state.db, member.family_id, &week_of)
        .await?
        .map(|row| row.items.0)
        .unwrap_or_default();
    if !items::remove_at(&mut item_list, item_index) {
        return Err(ApiError::NotFound("Item not found"));
    }

    repo::upsert_items(&state.db, member.family_id, &week_of, &item_list).await?;
    Ok(StatusCode::NO_CONTENT)
}
