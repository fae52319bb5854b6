pub mod handlers;
pub mod repo;
pub mod seed;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(handlers::list_recipes))
        .route("/recipes/seed", post(handlers::seed_recipes))
        .route("/recipes/search", get(handlers::search_recipes))
        .route("/recipes/:id", get(handlers::get_recipe))
}
