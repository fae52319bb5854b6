mod dto;
pub mod handlers;
pub mod repo;
pub mod service;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/meal-plans/nutrition/weekly",
            get(handlers::get_weekly_nutrition),
        )
        .route("/meal-plans/generate", post(handlers::generate_ai_meal_plan))
        .route("/meal-plans/:date", get(handlers::get_meal_plan))
        .route("/meal-plans/:date/meals", post(handlers::add_meal_to_plan))
        .route(
            "/meal-plans/:date/meals/:meal_type",
            delete(handlers::remove_meal_from_plan),
        )
}
