//! Built-in seed data used on first run, when a stored blob is missing or
//! does not parse.

use super::{
    ActivityCard, ChartConfig, ChartType, DataSource, FoodCard, MealSlot, NutrientSlot,
};

pub fn seed_food_cards() -> Vec<FoodCard> {
    vec![
        FoodCard {
            id: "f1".into(),
            name: "Oatmeal".into(),
            image: "https://picsum.photos/seed/oatmeal/200/200".into(),
            default_weight: 200.0,
            calories_per_100g: 68.0,
            nutrients: vec![
                nutrient("n1", "Protein", 2.4, "g"),
                nutrient("n2", "Carbs", 12.0, "g"),
                nutrient("n3", "Fiber", 1.7, "g"),
            ],
            custom_tags: Some(vec!["Breakfast".into()]),
        },
        FoodCard {
            id: "f2".into(),
            name: "Grilled Chicken".into(),
            image: "https://picsum.photos/seed/chicken/200/200".into(),
            default_weight: 150.0,
            calories_per_100g: 165.0,
            nutrients: vec![
                nutrient("n1", "Protein", 31.0, "g"),
                nutrient("n2", "Fat", 3.6, "g"),
            ],
            custom_tags: Some(vec!["Lunch".into(), "Protein".into()]),
        },
    ]
}

pub fn seed_activity_cards() -> Vec<ActivityCard> {
    vec![
        activity("a1", "Sleep", "Moon", 480.0, 1.0),
        activity("a2", "Workout", "Dumbbell", 60.0, 8.0),
        activity("a3", "Walking", "Footprints", 30.0, 4.0),
        activity("a4", "Gaming", "Gamepad2", 60.0, 1.5),
        activity("a5", "Work", "Briefcase", 480.0, 2.0),
    ]
}

/// Preset slots for a day nothing has been logged on yet.
pub fn default_meal_slots() -> Vec<MealSlot> {
    vec![
        slot("s1", "Breakfast", "08:00", "08:30"),
        slot("s2", "Lunch", "12:30", "13:00"),
        slot("s3", "Dinner", "19:00", "19:30"),
    ]
}

pub fn default_chart_slots() -> Vec<ChartConfig> {
    vec![
        ChartConfig {
            id: "c1".into(),
            title: "Daily Calories".into(),
            chart_type: ChartType::Area,
            source: DataSource::Calories,
            target_id: None,
        },
        ChartConfig {
            id: "c2".into(),
            title: "Energy Score".into(),
            chart_type: ChartType::Line,
            source: DataSource::Energy,
            target_id: None,
        },
        ChartConfig {
            id: "c3".into(),
            title: "Fasting Window".into(),
            chart_type: ChartType::Bar,
            source: DataSource::Fasting,
            target_id: None,
        },
    ]
}

fn nutrient(id: &str, name: &str, value_per_100g: f64, unit: &str) -> NutrientSlot {
    NutrientSlot {
        id: id.into(),
        name: name.into(),
        value_per_100g,
        unit: unit.into(),
    }
}

fn activity(id: &str, name: &str, icon: &str, minutes: f64, burn_rate: f64) -> ActivityCard {
    ActivityCard {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        default_duration: Some(minutes),
        calorie_burn_rate: Some(burn_rate),
        tags: None,
    }
}

fn slot(id: &str, label: &str, start: &str, end: &str) -> MealSlot {
    MealSlot {
        id: id.into(),
        label: label.into(),
        start_time: start.into(),
        end_time: end.into(),
        food_items: Vec::new(),
    }
}
