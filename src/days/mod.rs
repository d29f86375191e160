pub mod dto;
pub mod handlers;
pub mod services;

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/days/:date",
            get(handlers::get_day).patch(handlers::patch_day),
        )
        .route("/days/:date/slots", post(handlers::add_slot))
        .route(
            "/days/:date/slots/:slot_id",
            patch(handlers::update_slot).delete(handlers::remove_slot),
        )
        .route("/days/:date/slots/:slot_id/items", post(handlers::add_food_item))
        .route(
            "/days/:date/slots/:slot_id/items/:index",
            delete(handlers::remove_food_item),
        )
        .route("/days/:date/activities", post(handlers::add_activity))
        .route(
            "/days/:date/activities/:id",
            patch(handlers::update_activity).delete(handlers::remove_activity),
        )
        .route("/days/:date/energy", post(handlers::log_energy))
        .route("/days/:date/energy/:id", delete(handlers::remove_energy))
}
