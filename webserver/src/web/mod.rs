//! Route table

pub mod api;
pub mod websocket;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", post(api::register_user))
        .route("/api/sunday", post(api::add_sunday))
        .route("/api/flexible", post(api::add_flexible))
        .route("/api/items/:id/vote", post(api::toggle_vote))
        .route("/api/items/:id", delete(api::delete_item))
        .route("/api/view", get(api::view))
        .route("/ws", get(websocket::live_view))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
