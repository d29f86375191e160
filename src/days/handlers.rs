use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use crate::domain::{
    self, is_valid_clock, new_id, ActivityRecord, DailyData, EnergyRecord, FoodItem, MealSlot,
    ENERGY_LEVEL_MAX, ENERGY_LEVEL_MIN,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::dto::{
    ActivityPatch, DayPatch, NewActivityRequest, NewEnergyRequest, NewFoodItemRequest,
    NewSlotRequest, SlotPatch,
};
use super::services;

fn check_date(date: &str) -> ApiResult<()> {
    if domain::parse_date_key(date).is_none() {
        return Err(ApiError::Validation(format!("invalid date key: {date}")));
    }
    Ok(())
}

fn require_clock(value: &str) -> ApiResult<()> {
    if !is_valid_clock(value) {
        return Err(ApiError::Validation(format!("invalid time: {value}")));
    }
    Ok(())
}

fn clock_or_now(value: Option<String>) -> ApiResult<String> {
    match value {
        Some(v) => {
            require_clock(&v)?;
            Ok(v)
        }
        None => Ok(domain::now_clock()),
    }
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    let tracker = state.tracker.read().await;
    Ok(Json(services::resolve_day(&tracker.daily_records, &date)))
}

/// Apply a whole typed patch to the day. The finer-grained operations below
/// are all built on the same resolve / patch / upsert path.
#[instrument(skip(state, body))]
pub async fn patch_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<DayPatch>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    if let Some(slots) = &body.meal_slots {
        for slot in slots {
            require_clock(&slot.start_time)?;
            require_clock(&slot.end_time)?;
        }
    }
    if let Some(records) = &body.activity_records {
        for rec in records {
            require_clock(&rec.start_time)?;
            require_clock(&rec.end_time)?;
        }
    }
    if let Some(records) = &body.energy_records {
        for rec in records {
            require_clock(&rec.time)?;
            check_level(rec.level)?;
        }
    }
    mutate_day(&state, &date, |day, _| {
        Ok(services::apply_patch(day, body))
    })
    .await
}

#[instrument(skip(state))]
pub async fn add_slot(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<NewSlotRequest>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    let start_time = clock_or_now(body.start_time)?;
    let end_time = clock_or_now(body.end_time)?;
    mutate_day(&state, &date, move |mut day, _| {
        if day.meal_slots.len() >= services::MAX_MEAL_SLOTS {
            return Err(ApiError::Validation(format!(
                "a day holds at most {} meal slots",
                services::MAX_MEAL_SLOTS
            )));
        }
        let label = body
            .label
            .unwrap_or_else(|| format!("Meal {}", day.meal_slots.len() + 1));
        day.meal_slots.push(MealSlot {
            id: new_id(),
            label,
            start_time,
            end_time,
            food_items: Vec::new(),
        });
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn update_slot(
    State(state): State<AppState>,
    Path((date, slot_id)): Path<(String, String)>,
    Json(body): Json<SlotPatch>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    if let Some(start) = &body.start_time {
        require_clock(start)?;
    }
    if let Some(end) = &body.end_time {
        require_clock(end)?;
    }
    mutate_day(&state, &date, move |mut day, _| {
        let slot = find_slot(&mut day, &slot_id)?;
        if let Some(label) = body.label {
            slot.label = label;
        }
        if let Some(start) = body.start_time {
            slot.start_time = start;
        }
        if let Some(end) = body.end_time {
            slot.end_time = end;
        }
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn remove_slot(
    State(state): State<AppState>,
    Path((date, slot_id)): Path<(String, String)>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    mutate_day(&state, &date, move |mut day, _| {
        find_slot(&mut day, &slot_id)?;
        day.meal_slots.retain(|s| s.id != slot_id);
        Ok(day)
    })
    .await
}

/// Add a food item. `calculated_calories` is snapshotted here and never
/// recomputed, so the logged history survives later edits to the card.
#[instrument(skip(state))]
pub async fn add_food_item(
    State(state): State<AppState>,
    Path((date, slot_id)): Path<(String, String)>,
    Json(body): Json<NewFoodItemRequest>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    mutate_day(&state, &date, move |mut day, tracker| {
        let card = tracker
            .food_pool
            .iter()
            .find(|c| c.id == body.food_card_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("food card {}", body.food_card_id)))?;
        let weight = body.weight.unwrap_or(card.default_weight);
        if weight < 0.0 {
            return Err(ApiError::Validation("weight must be non-negative".into()));
        }
        let calculated_calories = (weight * (card.calories_per_100g / 100.0)).round() as i64;
        let slot = find_slot(&mut day, &slot_id)?;
        slot.food_items.push(FoodItem {
            food_card_id: card.id,
            weight,
            calculated_calories,
        });
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn remove_food_item(
    State(state): State<AppState>,
    Path((date, slot_id, index)): Path<(String, String, usize)>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    mutate_day(&state, &date, move |mut day, _| {
        let slot = find_slot(&mut day, &slot_id)?;
        if index >= slot.food_items.len() {
            return Err(ApiError::NotFound(format!("food item at index {index}")));
        }
        slot.food_items.remove(index);
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn add_activity(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<NewActivityRequest>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    let start_time = clock_or_now(body.start_time)?;
    let end_time = clock_or_now(body.end_time)?;
    let record_date = date.clone();
    mutate_day(&state, &date, move |mut day, tracker| {
        let card = tracker
            .activity_pool
            .iter()
            .find(|c| c.id == body.activity_card_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("activity card {}", body.activity_card_id)))?;
        let duration = body
            .duration
            .or(card.default_duration)
            .unwrap_or(30.0);
        if duration < 0.0 {
            return Err(ApiError::Validation("duration must be non-negative".into()));
        }
        day.activity_records.push(ActivityRecord {
            id: new_id(),
            date: record_date,
            activity_card_id: card.id,
            start_time,
            end_time,
            duration,
            notes: body.notes,
        });
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn update_activity(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    Json(body): Json<ActivityPatch>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    if let Some(start) = &body.start_time {
        require_clock(start)?;
    }
    if let Some(end) = &body.end_time {
        require_clock(end)?;
    }
    if let Some(duration) = body.duration {
        if duration < 0.0 {
            return Err(ApiError::Validation("duration must be non-negative".into()));
        }
    }
    mutate_day(&state, &date, move |mut day, _| {
        let record = day
            .activity_records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("activity record {id}")))?;
        if let Some(start) = body.start_time {
            record.start_time = start;
        }
        if let Some(end) = body.end_time {
            record.end_time = end;
        }
        if let Some(duration) = body.duration {
            record.duration = duration;
        }
        if let Some(notes) = body.notes {
            record.notes = Some(notes);
        }
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn remove_activity(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    mutate_day(&state, &date, move |mut day, _| {
        if !day.activity_records.iter().any(|r| r.id == id) {
            return Err(ApiError::NotFound(format!("activity record {id}")));
        }
        day.activity_records.retain(|r| r.id != id);
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn log_energy(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<NewEnergyRequest>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    check_level(body.level)?;
    let time = clock_or_now(body.time)?;
    let record_date = date.clone();
    mutate_day(&state, &date, move |mut day, _| {
        day.energy_records.push(EnergyRecord {
            id: new_id(),
            date: record_date,
            time,
            level: body.level,
            mood: body.mood,
            note: body.note,
        });
        Ok(day)
    })
    .await
}

#[instrument(skip(state))]
pub async fn remove_energy(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> ApiResult<Json<DailyData>> {
    check_date(&date)?;
    mutate_day(&state, &date, move |mut day, _| {
        if !day.energy_records.iter().any(|r| r.id == id) {
            return Err(ApiError::NotFound(format!("energy record {id}")));
        }
        day.energy_records.retain(|r| r.id != id);
        Ok(day)
    })
    .await
}

fn check_level(level: u8) -> ApiResult<()> {
    if !(ENERGY_LEVEL_MIN..=ENERGY_LEVEL_MAX).contains(&level) {
        return Err(ApiError::Validation(format!(
            "energy level must be between {ENERGY_LEVEL_MIN} and {ENERGY_LEVEL_MAX}"
        )));
    }
    Ok(())
}

fn find_slot<'a>(day: &'a mut DailyData, slot_id: &str) -> ApiResult<&'a mut MealSlot> {
    day.meal_slots
        .iter_mut()
        .find(|s| s.id == slot_id)
        .ok_or_else(|| ApiError::NotFound(format!("meal slot {slot_id}")))
}

/// Resolve the day, run the mutation, upsert the result, persist the full
/// snapshot. The write lock is released before touching storage.
async fn mutate_day<F>(state: &AppState, date: &str, mutate: F) -> ApiResult<Json<DailyData>>
where
    F: FnOnce(DailyData, &crate::state::Tracker) -> ApiResult<DailyData>,
{
    let (updated, snapshot) = {
        let mut tracker = state.tracker.write().await;
        let day = services::resolve_day(&tracker.daily_records, date);
        let updated = mutate(day, &*tracker)?;
        services::upsert_day(&mut tracker.daily_records, updated.clone());
        (updated, tracker.snapshot()?)
    };
    state.persist(snapshot).await?;
    Ok(Json(updated))
}
