use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::instrument;

use crate::days::services as day_services;
use crate::domain;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::dto::{DaySummary, FastingSummary, SeriesQuery};
use super::engine;
use super::series::{self, SeriesPoint};

#[instrument(skip(state))]
pub async fn day_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<DaySummary>> {
    if domain::parse_date_key(&date).is_none() {
        return Err(ApiError::Validation(format!("invalid date key: {date}")));
    }
    let tracker = state.tracker.read().await;
    let day = day_services::resolve_day(&tracker.daily_records, &date);

    let total_calories = engine::total_calories(&day);
    let calorie_goal = state.config.daily_calorie_goal;
    let goal_percent =
        ((total_calories as f64 / f64::from(calorie_goal)) * 100.0).round() as i64;
    let calories_burned = engine::calories_burned(&day, &tracker.activity_pool).round() as i64;
    let average_energy = engine::average_energy(&day.energy_records);
    let fasting = FastingSummary::from(engine::fasting_window(&day.meal_slots));

    Ok(Json(DaySummary {
        date,
        total_calories,
        calorie_goal,
        goal_percent,
        calories_burned,
        average_energy,
        fasting,
    }))
}

#[instrument(skip(state))]
pub async fn analytics_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> ApiResult<Json<Vec<SeriesPoint>>> {
    let anchor = domain::parse_date_key(&query.date)
        .ok_or_else(|| ApiError::Validation(format!("invalid date key: {}", query.date)))?;
    let tracker = state.tracker.read().await;
    let points = series::build_series(
        query.period,
        anchor,
        &tracker.chart_slots,
        &tracker.daily_records,
        &tracker.food_pool,
    );
    Ok(Json(points))
}
