pub mod defaults;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// One named nutrient on a food card, dosed per 100 g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientSlot {
    pub id: String,
    pub name: String,
    pub value_per_100g: f64,
    pub unit: String,
}

/// Reusable food template in the card pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub default_weight: f64,
    pub calories_per_100g: f64,
    #[serde(default)]
    pub nutrients: Vec<NutrientSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_tags: Option<Vec<String>>,
}

/// Reusable activity template in the card pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCard {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_duration: Option<f64>,
    /// Calories per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_burn_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Food logged into a meal slot. `calculated_calories` is a snapshot taken
/// when the item is added; editing the referenced card later does not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub food_card_id: String,
    pub weight: f64,
    pub calculated_calories: i64,
}

/// A named, time-bounded container for food items within a day.
///
/// The canonical shape carries `startTime`/`endTime`. Older blobs wrote a
/// single `time` field; those load as `start == end == time` and are written
/// back in the canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MealSlotRepr")]
pub struct MealSlot {
    pub id: String,
    pub label: String,
    pub start_time: String,
    pub end_time: String,
    pub food_items: Vec<FoodItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealSlotRepr {
    #[serde(default)]
    id: String,
    #[serde(default)]
    label: String,
    start_time: Option<String>,
    end_time: Option<String>,
    time: Option<String>,
    #[serde(default)]
    food_items: Vec<FoodItem>,
}

impl From<MealSlotRepr> for MealSlot {
    fn from(r: MealSlotRepr) -> Self {
        let start_time = r
            .start_time
            .or_else(|| r.time.clone())
            .unwrap_or_else(|| "00:00".to_string());
        let end_time = r.end_time.or(r.time).unwrap_or_else(|| start_time.clone());
        Self {
            id: r.id,
            label: r.label,
            start_time,
            end_time,
            food_items: r.food_items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub date: String,
    pub activity_card_id: String,
    pub start_time: String,
    pub end_time: String,
    /// Minutes.
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Self-reported energy level on the 1-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRecord {
    pub id: String,
    pub date: String,
    pub time: String,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub const ENERGY_LEVEL_MIN: u8 = 1;
pub const ENERGY_LEVEL_MAX: u8 = 10;

/// Everything logged on one calendar date. `date` ("YYYY-MM-DD") is the
/// unique key within the records collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyData {
    pub date: String,
    #[serde(default)]
    pub meal_slots: Vec<MealSlot>,
    #[serde(default)]
    pub activity_records: Vec<ActivityRecord>,
    #[serde(default)]
    pub energy_records: Vec<EnergyRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Area,
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Calories,
    Energy,
    Fasting,
    ActivityFreq,
    ActivityDur,
    Nutrient,
}

/// A configured analytics widget: metric source, bucketing handled by the
/// requested period, display style left to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn is_valid_clock(value: &str) -> bool {
    lazy_static! {
        static ref CLOCK_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
    }
    CLOCK_RE.is_match(value)
}

/// Minutes since midnight for a zero-padded "HH:MM" string.
pub fn clock_minutes(value: &str) -> Option<u32> {
    if !is_valid_clock(value) {
        return None;
    }
    let (h, m) = value.split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    Some(hours * 60 + minutes)
}

pub fn hour_of(value: &str) -> Option<u8> {
    clock_minutes(value).map(|m| (m / 60) as u8)
}

pub fn parse_date_key(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

pub fn date_key(date: Date) -> String {
    // The format only uses infallible components.
    date.format(format_description!("[year]-[month]-[day]")).unwrap()
}

/// Current wall clock as "HH:MM", used to default times on new records.
pub fn now_clock() -> String {
    OffsetDateTime::now_utc()
        .time()
        .format(format_description!("[hour]:[minute]"))
        .unwrap()
}

/// Replace the entry matching `same` in place, or append. Order of the other
/// entries is preserved; the collections stay in insertion order.
pub fn upsert_by<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T, &T) -> bool) {
    match items.iter().position(|existing| same(existing, &item)) {
        Some(idx) => items[idx] = item,
        None => items.push(item),
    }
}

#[cfg(test)]
mod domain_tests {
    use super::*;

    #[test]
    fn legacy_single_time_slot_migrates_to_start_and_end() {
        let json = r#"{"id":"s1","label":"Breakfast","time":"08:15","foodItems":[]}"#;
        let slot: MealSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.start_time, "08:15");
        assert_eq!(slot.end_time, "08:15");

        let written = serde_json::to_string(&slot).unwrap();
        assert!(written.contains("startTime"));
        assert!(!written.contains("\"time\""));
    }

    #[test]
    fn slot_without_any_time_defaults_to_midnight() {
        let json = r#"{"id":"s1","label":"Breakfast","foodItems":[]}"#;
        let slot: MealSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.start_time, "00:00");
        assert_eq!(slot.end_time, "00:00");
    }

    #[test]
    fn food_card_keeps_the_persisted_field_layout() {
        let card = defaults::seed_food_cards().remove(0);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("caloriesPer100g"));
        assert!(json.contains("defaultWeight"));
        assert!(json.contains("valuePer100g"));
    }

    #[test]
    fn chart_config_serializes_type_like_the_stored_blob() {
        let cfg = ChartConfig {
            id: "c1".into(),
            title: "Daily Calories".into(),
            chart_type: ChartType::Area,
            source: DataSource::ActivityFreq,
            target_id: None,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains(r#""type":"area""#));
        assert!(json.contains(r#""source":"activity_freq""#));
    }

    #[test]
    fn clock_parsing_accepts_padded_24h_only() {
        assert_eq!(clock_minutes("08:30"), Some(510));
        assert_eq!(clock_minutes("23:59"), Some(1439));
        assert_eq!(clock_minutes("8:30"), None);
        assert_eq!(clock_minutes("24:00"), None);
        assert_eq!(clock_minutes("12:60"), None);
        assert_eq!(hour_of("19:05"), Some(19));
    }

    #[test]
    fn date_key_roundtrip() {
        let date = parse_date_key("2024-02-29").unwrap();
        assert_eq!(date_key(date), "2024-02-29");
        assert!(parse_date_key("2024-13-01").is_none());
        assert!(parse_date_key("not-a-date").is_none());
    }

    #[test]
    fn upsert_replaces_in_place_or_appends() {
        let mut items = vec![("a", 1), ("b", 2)];
        upsert_by(&mut items, ("a", 10), |x, y| x.0 == y.0);
        assert_eq!(items, vec![("a", 10), ("b", 2)]);
        upsert_by(&mut items, ("c", 3), |x, y| x.0 == y.0);
        assert_eq!(items, vec![("a", 10), ("b", 2), ("c", 3)]);
    }
}
