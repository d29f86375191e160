pub mod dto;
pub mod handlers;
pub mod services;

use axum::routing::{delete, get};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pool/food", get(handlers::list_food).put(handlers::save_food))
        .route("/pool/food/:id", delete(handlers::remove_food))
        .route(
            "/pool/activity",
            get(handlers::list_activity).put(handlers::save_activity),
        )
        .route("/pool/activity/:id", delete(handlers::remove_activity))
}
