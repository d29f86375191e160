pub mod dto;
pub mod engine;
pub mod handlers;
pub mod series;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/days/:date/summary", get(handlers::day_summary))
        .route("/analytics/series", get(handlers::analytics_series))
}
