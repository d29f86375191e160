use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use crate::domain::{upsert_by, ActivityCard, FoodCard};
use crate::error::ApiResult;
use crate::state::AppState;

use super::dto::{SaveActivityCardRequest, SaveFoodCardRequest};
use super::services;

#[instrument(skip(state))]
pub async fn list_food(State(state): State<AppState>) -> Json<Vec<FoodCard>> {
    let tracker = state.tracker.read().await;
    Json(tracker.food_pool.clone())
}

#[instrument(skip(state, body))]
pub async fn save_food(
    State(state): State<AppState>,
    Json(body): Json<SaveFoodCardRequest>,
) -> ApiResult<Json<FoodCard>> {
    let card = services::build_food_card(body)?;
    let snapshot = {
        let mut tracker = state.tracker.write().await;
        upsert_by(&mut tracker.food_pool, card.clone(), |a, b| a.id == b.id);
        tracker.snapshot()?
    };
    state.persist(snapshot).await?;
    Ok(Json(card))
}

/// Deleting a card does not cascade: meal items keep their snapshotted
/// calories and render the reference as unknown.
#[instrument(skip(state))]
pub async fn remove_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<FoodCard>>> {
    let (pool, snapshot) = {
        let mut tracker = state.tracker.write().await;
        tracker.food_pool.retain(|c| c.id != id);
        (tracker.food_pool.clone(), tracker.snapshot()?)
    };
    state.persist(snapshot).await?;
    Ok(Json(pool))
}

#[instrument(skip(state))]
pub async fn list_activity(State(state): State<AppState>) -> Json<Vec<ActivityCard>> {
    let tracker = state.tracker.read().await;
    Json(tracker.activity_pool.clone())
}

#[instrument(skip(state, body))]
pub async fn save_activity(
    State(state): State<AppState>,
    Json(body): Json<SaveActivityCardRequest>,
) -> ApiResult<Json<ActivityCard>> {
    let card = services::build_activity_card(body)?;
    let snapshot = {
        let mut tracker = state.tracker.write().await;
        upsert_by(&mut tracker.activity_pool, card.clone(), |a, b| a.id == b.id);
        tracker.snapshot()?
    };
    state.persist(snapshot).await?;
    Ok(Json(card))
}

#[instrument(skip(state))]
pub async fn remove_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ActivityCard>>> {
    let (pool, snapshot) = {
        let mut tracker = state.tracker.write().await;
        tracker.activity_pool.retain(|c| c.id != id);
        (tracker.activity_pool.clone(), tracker.snapshot()?)
    };
    state.persist(snapshot).await?;
    Ok(Json(pool))
}
