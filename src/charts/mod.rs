pub mod dto;
pub mod handlers;

use axum::routing::{delete, get};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/charts", get(handlers::list_charts).put(handlers::save_chart))
        .route("/charts/:id", delete(handlers::remove_chart))
}
