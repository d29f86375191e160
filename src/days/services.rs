use crate::domain::{defaults, upsert_by, DailyData};

use super::dto::DayPatch;

/// The slot cap the quick-add UI enforced.
pub const MAX_MEAL_SLOTS: usize = 9;

/// Find the record for `date`, or synthesize the default day (three preset
/// meal slots, nothing logged). Pure; never inserts the default — a day
/// only enters the collection on its first mutation.
pub fn resolve_day(records: &[DailyData], date: &str) -> DailyData {
    records
        .iter()
        .find(|d| d.date == date)
        .cloned()
        .unwrap_or_else(|| DailyData {
            date: date.to_string(),
            meal_slots: defaults::default_meal_slots(),
            activity_records: Vec::new(),
            energy_records: Vec::new(),
        })
}

/// Merge present patch fields into the day record.
pub fn apply_patch(mut day: DailyData, patch: DayPatch) -> DailyData {
    if let Some(meal_slots) = patch.meal_slots {
        day.meal_slots = meal_slots;
    }
    if let Some(activity_records) = patch.activity_records {
        day.activity_records = activity_records;
    }
    if let Some(energy_records) = patch.energy_records {
        day.energy_records = energy_records;
    }
    day
}

/// Replace the record at its existing index, or append. Other records keep
/// their position; the collection stays in insertion order, not date order.
pub fn upsert_day(records: &mut Vec<DailyData>, day: DailyData) {
    upsert_by(records, day, |a, b| a.date == b.date);
}

#[cfg(test)]
mod day_services_tests {
    use super::*;
    use crate::domain::EnergyRecord;

    fn day(date: &str) -> DailyData {
        DailyData {
            date: date.into(),
            meal_slots: Vec::new(),
            activity_records: Vec::new(),
            energy_records: Vec::new(),
        }
    }

    #[test]
    fn resolving_a_missing_day_yields_the_preset_slots() {
        let resolved = resolve_day(&[], "2025-03-01");
        assert_eq!(resolved.date, "2025-03-01");
        let labels: Vec<&str> = resolved.meal_slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Breakfast", "Lunch", "Dinner"]);
        assert!(resolved.activity_records.is_empty());
        assert!(resolved.energy_records.is_empty());
    }

    #[test]
    fn resolving_twice_is_structurally_stable_and_does_not_insert() {
        let records: Vec<DailyData> = Vec::new();
        let first = resolve_day(&records, "2025-03-01");
        let second = resolve_day(&records, "2025-03-01");
        assert_eq!(first, second);
        assert!(records.is_empty());
    }

    #[test]
    fn resolving_an_existing_day_returns_it() {
        let mut stored = day("2025-03-01");
        stored.energy_records.push(EnergyRecord {
            id: "e1".into(),
            date: "2025-03-01".into(),
            time: "09:00".into(),
            level: 7,
            mood: None,
            note: None,
        });
        let records = vec![stored.clone()];
        assert_eq!(resolve_day(&records, "2025-03-01"), stored);
    }

    #[test]
    fn upsert_appends_new_days_and_replaces_in_place() {
        let mut records = vec![day("2025-03-02"), day("2025-03-01")];

        upsert_day(&mut records, day("2025-03-03"));
        assert_eq!(records.len(), 3);
        // Appended at the end: insertion order, not date order.
        assert_eq!(records[2].date, "2025-03-03");

        let mut replacement = day("2025-03-01");
        replacement.meal_slots = defaults::default_meal_slots();
        upsert_day(&mut records, replacement);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, "2025-03-02");
        assert_eq!(records[1].date, "2025-03-01");
        assert_eq!(records[1].meal_slots.len(), 3);
        assert_eq!(records[2].date, "2025-03-03");
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut stored = resolve_day(&[], "2025-03-01");
        stored.energy_records.push(EnergyRecord {
            id: "e1".into(),
            date: "2025-03-01".into(),
            time: "09:00".into(),
            level: 5,
            mood: None,
            note: None,
        });

        let patched = apply_patch(
            stored.clone(),
            DayPatch {
                meal_slots: Some(Vec::new()),
                ..DayPatch::default()
            },
        );
        assert!(patched.meal_slots.is_empty());
        assert_eq!(patched.energy_records, stored.energy_records);
    }
}
