use serde::Deserialize;

use crate::domain::{ActivityRecord, EnergyRecord, MealSlot};

/// Typed partial update for one day's record. Present fields replace the
/// corresponding collection wholesale; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPatch {
    pub meal_slots: Option<Vec<MealSlot>>,
    pub activity_records: Option<Vec<ActivityRecord>>,
    pub energy_records: Option<Vec<EnergyRecord>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlotRequest {
    pub label: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPatch {
    pub label: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodItemRequest {
    pub food_card_id: String,
    /// Grams; defaults to the card's standard portion.
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityRequest {
    pub activity_card_id: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Minutes; defaults to the card's default duration, then 30.
    pub duration: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatch {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnergyRequest {
    pub level: u8,
    pub time: Option<String>,
    pub mood: Option<String>,
    pub note: Option<String>,
}
