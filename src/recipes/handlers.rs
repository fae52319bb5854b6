use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::{repo, repo::Recipe, seed};

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seeded: bool,
}

#[instrument(skip(state))]
pub async fn seed_recipes(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<SeedResponse>, ApiError> {
    let seeded = seed::seed_catalog(&state.db).await?;
    Ok(Json(SeedResponse { seeded }))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = repo::list_all(&state.db).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Recipe not found"))?;
    Ok(Json(recipe))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
    pub cuisine: Option<String>,
    /// Comma-separated dietary tags; a recipe matches when any overlap.
    pub tags: Option<String>,
}

#[instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = repo::search(
        &state.db,
        params.term.as_deref().filter(|t| !t.is_empty()),
        params.cuisine.as_deref().filter(|c| !c.is_empty()),
    )
    .await?;

    let wanted = parse_tags(params.tags.as_deref());
    let recipes = match wanted {
        Some(tags) => recipes
            .into_iter()
            .filter(|r| tags_overlap(&r.dietary_tags, &tags))
            .collect(),
        None => recipes,
    };
    Ok(Json(recipes))
}

fn parse_tags(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    )
}

fn tags_overlap(recipe_tags: &[String], wanted: &[String]) -> bool {
    wanted.iter().any(|w| recipe_tags.iter().any(|t| t == w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_splits_and_trims() {
        assert_eq!(
            parse_tags(Some("vegetarian, low-carb")),
            Some(vec!["vegetarian".to_string(), "low-carb".to_string()])
        );
        assert_eq!(parse_tags(Some("")), None);
        assert_eq!(parse_tags(None), None);
    }

    #[test]
    fn tag_overlap_is_inclusive_or() {
        let recipe = vec!["vegetarian".to_string(), "low-carb".to_string()];
        assert!(tags_overlap(&recipe, &["low-carb".to_string()]));
        assert!(tags_overlap(
            &recipe,
            &["gluten-free".to_string(), "vegetarian".to_string()]
        ));
        assert!(!tags_overlap(&recipe, &["high-protein".to_string()]));
        assert!(!tags_overlap(&recipe, &[]));
    }
}
