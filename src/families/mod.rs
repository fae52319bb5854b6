mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/families", post(handlers::create_family))
        .route(
            "/families/:id/members",
            post(handlers::add_family_member).get(handlers::get_family_members),
        )
        .route(
            "/members/:id/preferences",
            put(handlers::update_member_preferences),
        )
        .route("/family", get(handlers::get_user_family))
        .route("/family/current", get(handlers::get_current_family))
}
