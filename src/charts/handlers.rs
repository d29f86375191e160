use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use crate::domain::{upsert_by, ChartConfig};
use crate::error::ApiResult;
use crate::state::AppState;

use super::dto::SaveChartRequest;

#[instrument(skip(state))]
pub async fn list_charts(State(state): State<AppState>) -> Json<Vec<ChartConfig>> {
    let tracker = state.tracker.read().await;
    Json(tracker.chart_slots.clone())
}

#[instrument(skip(state, body))]
pub async fn save_chart(
    State(state): State<AppState>,
    Json(body): Json<SaveChartRequest>,
) -> ApiResult<Json<ChartConfig>> {
    let config = ChartConfig::from(body);
    let snapshot = {
        let mut tracker = state.tracker.write().await;
        upsert_by(&mut tracker.chart_slots, config.clone(), |a, b| a.id == b.id);
        tracker.snapshot()?
    };
    state.persist(snapshot).await?;
    Ok(Json(config))
}

#[instrument(skip(state))]
pub async fn remove_chart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ChartConfig>>> {
    let (slots, snapshot) = {
        let mut tracker = state.tracker.write().await;
        tracker.chart_slots.retain(|c| c.id != id);
        (tracker.chart_slots.clone(), tracker.snapshot()?)
    };
    state.persist(snapshot).await?;
    Ok(Json(slots))
}
