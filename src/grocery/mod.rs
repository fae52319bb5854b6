pub mod handlers;
pub mod items;
pub mod propagate;
pub mod repo;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grocery-lists/:week_of", get(handlers::get_grocery_list))
        .route("/grocery-lists/:week_of/items", post(handlers::add_item))
        .route(
            "/grocery-lists/:week_of/items/:index/toggle",
            post(handlers::toggle_item_bought),
        )
        .route(
            "/grocery-lists/:week_of/items/:index",
            delete(handlers::remove_item),
        )
}
