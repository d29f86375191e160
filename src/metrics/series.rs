//! Chart series bucketing. A request names a period and an anchor date; the
//! engine produces one value per bucket per configured chart slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

use crate::domain::{date_key, hour_of, ChartConfig, DailyData, DataSource, FoodCard};

use super::engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

/// One bucket of the series: a label plus a value per chart-slot id.
/// `None` marks an empty energy bucket, which charts render as a gap.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub values: BTreeMap<String, Option<f64>>,
}

enum Scope<'a> {
    /// One hour of the anchor day.
    Hour { day: Option<&'a DailyData>, hour: u8 },
    /// A set of whole days (one calendar day, or a month's worth).
    Range { days: Vec<&'a DailyData> },
}

pub fn build_series(
    period: Period,
    anchor: Date,
    charts: &[ChartConfig],
    records: &[DailyData],
    food_pool: &[FoodCard],
) -> Vec<SeriesPoint> {
    buckets(period, anchor, records)
        .into_iter()
        .map(|(label, scope)| {
            let values = charts
                .iter()
                .map(|cfg| (cfg.id.clone(), metric_value(cfg, &scope, food_pool)))
                .collect();
            SeriesPoint { label, values }
        })
        .collect()
}

fn buckets<'a>(
    period: Period,
    anchor: Date,
    records: &'a [DailyData],
) -> Vec<(String, Scope<'a>)> {
    match period {
        Period::Day => {
            let key = date_key(anchor);
            let day = records.iter().find(|d| d.date == key);
            (0u8..24)
                .map(|hour| (format!("{hour:02}:00"), Scope::Hour { day, hour }))
                .collect()
        }
        Period::Week => {
            let start = week_start(anchor);
            (0..7)
                .map(|offset| {
                    let date = start + Duration::days(offset);
                    (day_label(date), day_scope(records, date))
                })
                .collect()
        }
        Period::Month => month_days(anchor)
            .into_iter()
            .map(|date| (day_label(date), day_scope(records, date)))
            .collect(),
        Period::Year => (0..12)
            .map(|i| {
                let (year, month) = months_back(anchor, 11 - i);
                let days = records
                    .iter()
                    .filter(|d| {
                        crate::domain::parse_date_key(&d.date)
                            .map(|date| date.year() == year && date.month() == month)
                            .unwrap_or(false)
                    })
                    .collect();
                (month_label(month), Scope::Range { days })
            })
            .collect(),
    }
}

fn day_scope<'a>(records: &'a [DailyData], date: Date) -> Scope<'a> {
    let key = date_key(date);
    Scope::Range {
        days: records.iter().filter(|d| d.date == key).collect(),
    }
}

fn metric_value(cfg: &ChartConfig, scope: &Scope<'_>, food_pool: &[FoodCard]) -> Option<f64> {
    match cfg.source {
        DataSource::Calories => {
            let total: i64 = match scope {
                Scope::Hour { day, hour } => day
                    .iter()
                    .flat_map(|d| d.meal_slots.iter())
                    .filter(|slot| hour_of(&slot.start_time) == Some(*hour))
                    .flat_map(|slot| slot.food_items.iter())
                    .map(|item| item.calculated_calories)
                    .sum(),
                Scope::Range { days } => days.iter().map(|d| engine::total_calories(d)).sum(),
            };
            Some(total as f64)
        }
        DataSource::Energy => match scope {
            Scope::Hour { day, hour } => engine::average_energy(
                day.iter()
                    .flat_map(|d| d.energy_records.iter())
                    .filter(|rec| hour_of(&rec.time) == Some(*hour)),
            ),
            Scope::Range { days } => {
                engine::average_energy(days.iter().flat_map(|d| d.energy_records.iter()))
            }
        },
        DataSource::Fasting => {
            let window = match scope {
                Scope::Hour { day, hour } => engine::fasting_window(
                    day.iter()
                        .flat_map(|d| d.meal_slots.iter())
                        .filter(|slot| hour_of(&slot.start_time) == Some(*hour)),
                ),
                Scope::Range { days } => {
                    engine::fasting_window(days.iter().flat_map(|d| d.meal_slots.iter()))
                }
            };
            Some(f64::from(window.duration_minutes))
        }
        DataSource::ActivityFreq | DataSource::ActivityDur => {
            let target = cfg.target_id.as_deref().filter(|t| *t != "all");
            let records: Vec<_> = match scope {
                Scope::Hour { day, hour } => day
                    .iter()
                    .flat_map(|d| d.activity_records.iter())
                    .filter(|rec| hour_of(&rec.start_time) == Some(*hour))
                    .filter(|rec| target.map_or(true, |t| rec.activity_card_id == t))
                    .collect(),
                Scope::Range { days } => days
                    .iter()
                    .flat_map(|d| d.activity_records.iter())
                    .filter(|rec| target.map_or(true, |t| rec.activity_card_id == t))
                    .collect(),
            };
            match cfg.source {
                DataSource::ActivityFreq => Some(records.len() as f64),
                _ => Some(records.iter().map(|rec| rec.duration).sum()),
            }
        }
        DataSource::Nutrient => {
            let Some(target) = cfg.target_id.as_deref().filter(|t| !t.is_empty()) else {
                return Some(0.0);
            };
            // Nutrient totals stay day-scoped even in the hourly view.
            let days: Vec<&DailyData> = match scope {
                Scope::Hour { day, .. } => day.iter().copied().collect(),
                Scope::Range { days } => days.clone(),
            };
            Some(engine::nutrient_grams(days, food_pool, target))
        }
    }
}

/// Sunday-start week containing the date.
fn week_start(anchor: Date) -> Date {
    anchor - Duration::days(i64::from(anchor.weekday().number_days_from_sunday()))
}

fn month_days(anchor: Date) -> Vec<Date> {
    let mut days = Vec::new();
    // Day 1 is valid for every month.
    let mut date = Date::from_calendar_date(anchor.year(), anchor.month(), 1).unwrap();
    while date.month() == anchor.month() {
        days.push(date);
        match date.next_day() {
            Some(next) => date = next,
            None => break,
        }
    }
    days
}

/// Year and month `back` months before the anchor's month.
fn months_back(anchor: Date, back: i32) -> (i32, Month) {
    let mut year = anchor.year();
    let mut month = anchor.month();
    for _ in 0..back {
        month = month.previous();
        if month == Month::December {
            year -= 1;
        }
    }
    (year, month)
}

fn day_label(date: Date) -> String {
    format!("{:02}/{:02}", u8::from(date.month()), date.day())
}

fn month_label(month: Month) -> String {
    month.to_string()[..3].to_string()
}

#[cfg(test)]
mod series_tests {
    use super::*;
    use crate::domain::{
        defaults, ActivityRecord, ChartType, EnergyRecord, FoodItem, MealSlot,
    };

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_calendar_date(y, Month::try_from(m).unwrap(), d).unwrap()
    }

    fn chart(id: &str, source: DataSource, target_id: Option<&str>) -> ChartConfig {
        ChartConfig {
            id: id.into(),
            title: id.into(),
            chart_type: ChartType::Bar,
            source,
            target_id: target_id.map(str::to_string),
        }
    }

    fn day_with_breakfast(key: &str, calories: i64) -> DailyData {
        DailyData {
            date: key.into(),
            meal_slots: vec![MealSlot {
                id: "s1".into(),
                label: "Breakfast".into(),
                start_time: "08:00".into(),
                end_time: "08:30".into(),
                food_items: vec![FoodItem {
                    food_card_id: "f1".into(),
                    weight: 100.0,
                    calculated_calories: calories,
                }],
            }],
            activity_records: Vec::new(),
            energy_records: Vec::new(),
        }
    }

    #[test]
    fn week_buckets_are_sunday_to_saturday() {
        // 2025-03-05 is a Wednesday; its week starts Sunday 2025-03-02.
        let records = vec![day_with_breakfast("2025-03-03", 400)];
        let charts = vec![chart("c1", DataSource::Calories, None)];
        let series = build_series(Period::Week, date(2025, 3, 5), &charts, &records, &[]);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].label, "03/02");
        assert_eq!(series[6].label, "03/08");
        assert_eq!(series[1].values["c1"], Some(400.0));
        assert_eq!(series[2].values["c1"], Some(0.0));
    }

    #[test]
    fn month_buckets_cover_every_calendar_day() {
        let charts = vec![chart("c1", DataSource::Calories, None)];
        let series = build_series(Period::Month, date(2024, 2, 10), &charts, &[], &[]);
        assert_eq!(series.len(), 29);
        assert_eq!(series[0].label, "02/01");
        assert_eq!(series[28].label, "02/29");
    }

    #[test]
    fn day_buckets_use_the_parsed_hour() {
        let mut day = day_with_breakfast("2025-03-05", 250);
        day.energy_records.push(EnergyRecord {
            id: "e1".into(),
            date: "2025-03-05".into(),
            time: "08:45".into(),
            level: 6,
            mood: None,
            note: None,
        });
        let records = vec![day];
        let charts = vec![
            chart("cal", DataSource::Calories, None),
            chart("nrg", DataSource::Energy, None),
        ];
        let series = build_series(Period::Day, date(2025, 3, 5), &charts, &records, &[]);
        assert_eq!(series.len(), 24);
        assert_eq!(series[8].label, "08:00");
        assert_eq!(series[8].values["cal"], Some(250.0));
        assert_eq!(series[8].values["nrg"], Some(6.0));
        // Empty energy buckets are gaps, empty calorie buckets are zero.
        assert_eq!(series[9].values["nrg"], None);
        assert_eq!(series[9].values["cal"], Some(0.0));
    }

    #[test]
    fn year_buckets_end_at_the_anchor_month() {
        let records = vec![
            day_with_breakfast("2024-07-04", 100),
            day_with_breakfast("2024-07-20", 150),
            day_with_breakfast("2023-07-20", 999), // older year, same month name
        ];
        let charts = vec![chart("c1", DataSource::Calories, None)];
        let series = build_series(Period::Year, date(2024, 12, 31), &charts, &records, &[]);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].label, "Jan");
        assert_eq!(series[11].label, "Dec");
        assert_eq!(series[6].values["c1"], Some(250.0));
    }

    #[test]
    fn activity_sources_filter_by_target() {
        let mut day = day_with_breakfast("2025-03-05", 0);
        for (card, duration) in [("a2", 45.0), ("a2", 30.0), ("a3", 20.0)] {
            day.activity_records.push(ActivityRecord {
                id: crate::domain::new_id(),
                date: "2025-03-05".into(),
                activity_card_id: card.into(),
                start_time: "10:00".into(),
                end_time: "11:00".into(),
                duration,
                notes: None,
            });
        }
        let records = vec![day];
        let charts = vec![
            chart("freq", DataSource::ActivityFreq, Some("a2")),
            chart("all_dur", DataSource::ActivityDur, Some("all")),
        ];
        let series = build_series(Period::Week, date(2025, 3, 5), &charts, &records, &[]);
        // 2025-03-05 falls in bucket index 3 of the Sunday-start week.
        assert_eq!(series[3].values["freq"], Some(2.0));
        assert_eq!(series[3].values["all_dur"], Some(95.0));
        assert_eq!(series[4].values["freq"], Some(0.0));
    }

    #[test]
    fn fasting_buckets_only_count_food_bearing_slots() {
        let mut day = day_with_breakfast("2025-03-05", 120);
        day.meal_slots.push(MealSlot {
            id: "s2".into(),
            label: "Dinner".into(),
            start_time: "19:00".into(),
            end_time: "19:30".into(),
            food_items: vec![FoodItem {
                food_card_id: "f2".into(),
                weight: 150.0,
                calculated_calories: 248,
            }],
        });
        day.meal_slots.push(MealSlot {
            id: "s3".into(),
            label: "Empty".into(),
            start_time: "22:00".into(),
            end_time: "23:00".into(),
            food_items: Vec::new(),
        });
        let records = vec![day];
        let charts = vec![chart("fast", DataSource::Fasting, None)];
        let series = build_series(Period::Week, date(2025, 3, 5), &charts, &records, &[]);
        assert_eq!(series[3].values["fast"], Some(690.0));
        assert_eq!(series[0].values["fast"], Some(0.0));
    }

    #[test]
    fn nutrient_source_sums_across_the_bucket_days() {
        let pool = defaults::seed_food_cards();
        // 200 g oatmeal: 2.4 g protein per 100 g -> 4.8 g.
        let records = vec![
            DailyData {
                date: "2025-03-03".into(),
                meal_slots: vec![MealSlot {
                    id: "s1".into(),
                    label: "Breakfast".into(),
                    start_time: "08:00".into(),
                    end_time: "08:30".into(),
                    food_items: vec![FoodItem {
                        food_card_id: "f1".into(),
                        weight: 200.0,
                        calculated_calories: 136,
                    }],
                }],
                activity_records: Vec::new(),
                energy_records: Vec::new(),
            },
        ];
        let charts = vec![
            chart("protein", DataSource::Nutrient, Some("Protein")),
            chart("missing", DataSource::Nutrient, None),
        ];
        let series = build_series(Period::Week, date(2025, 3, 5), &charts, &records, &pool);
        let got = series[1].values["protein"].unwrap();
        assert!((got - 4.8).abs() < 1e-9);
        assert_eq!(series[1].values["missing"], Some(0.0));
    }
}
