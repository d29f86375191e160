//! Pure aggregations over the raw record collections. Everything here is
//! recomputed per request from scratch; a reference that no longer resolves
//! (deleted card, renamed nutrient) contributes zero instead of failing.

use serde::Serialize;

use crate::domain::{clock_minutes, ActivityCard, DailyData, EnergyRecord, FoodCard, MealSlot};

/// Sum of the snapshotted calories across every food item of the day.
pub fn total_calories(day: &DailyData) -> i64 {
    day.meal_slots
        .iter()
        .flat_map(|slot| slot.food_items.iter())
        .map(|item| item.calculated_calories)
        .sum()
}

/// `duration * burn rate` summed over the day's activity records. A record
/// whose card is gone (or has no rate) contributes 0.
pub fn calories_burned(day: &DailyData, activity_pool: &[ActivityCard]) -> f64 {
    day.activity_records
        .iter()
        .map(|rec| {
            let rate = activity_pool
                .iter()
                .find(|card| card.id == rec.activity_card_id)
                .and_then(|card| card.calorie_burn_rate)
                .unwrap_or(0.0);
            rec.duration * rate
        })
        .sum()
}

/// Arithmetic mean of the energy levels, `None` when there are no records.
pub fn average_energy<'a>(records: impl IntoIterator<Item = &'a EnergyRecord>) -> Option<f64> {
    let mut sum = 0u32;
    let mut count = 0u32;
    for rec in records {
        sum += u32::from(rec.level);
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(f64::from(sum) / f64::from(count))
    }
}

/// The eating window of a day, in minutes since midnight. All zeroes means
/// "no window".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingWindow {
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub duration_minutes: u32,
}

impl FastingWindow {
    pub const NONE: Self = Self {
        start_minutes: 0,
        end_minutes: 0,
        duration_minutes: 0,
    };
}

/// Earliest start to latest end over the slots that actually contain food.
/// A slot with an unparsable time is skipped; a negative sweep clamps to 0.
pub fn fasting_window<'a>(slots: impl IntoIterator<Item = &'a MealSlot>) -> FastingWindow {
    let mut start: Option<u32> = None;
    let mut end: Option<u32> = None;
    for slot in slots {
        if slot.food_items.is_empty() {
            continue;
        }
        if let Some(s) = clock_minutes(&slot.start_time) {
            start = Some(start.map_or(s, |cur| cur.min(s)));
        }
        if let Some(e) = clock_minutes(&slot.end_time) {
            end = Some(end.map_or(e, |cur| cur.max(e)));
        }
    }
    match (start, end) {
        (Some(start_minutes), Some(end_minutes)) => FastingWindow {
            start_minutes,
            end_minutes,
            duration_minutes: end_minutes.saturating_sub(start_minutes),
        },
        _ => FastingWindow::NONE,
    }
}

/// Grams of one named nutrient across every food item in the given days,
/// resolved through the current food pool. Unknown cards and nutrient names
/// contribute 0.
pub fn nutrient_grams<'a>(
    days: impl IntoIterator<Item = &'a DailyData>,
    food_pool: &[FoodCard],
    nutrient: &str,
) -> f64 {
    days.into_iter()
        .flat_map(|day| day.meal_slots.iter())
        .flat_map(|slot| slot.food_items.iter())
        .map(|item| {
            let value_per_100g = food_pool
                .iter()
                .find(|card| card.id == item.food_card_id)
                .and_then(|card| {
                    card.nutrients
                        .iter()
                        .find(|n| n.name == nutrient)
                        .map(|n| n.value_per_100g)
                })
                .unwrap_or(0.0);
            item.weight * (value_per_100g / 100.0)
        })
        .sum()
}
