use serde::{Deserialize, Serialize};

use super::engine::FastingWindow;
use super::series::Period;

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub period: Period,
    /// Anchor date ("YYYY-MM-DD") the period is positioned around.
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingSummary {
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub duration_minutes: u32,
    /// "HH:MM", or "--:--" when there is no window.
    pub start_label: String,
    pub end_label: String,
}

impl From<FastingWindow> for FastingSummary {
    fn from(window: FastingWindow) -> Self {
        Self {
            start_minutes: window.start_minutes,
            end_minutes: window.end_minutes,
            duration_minutes: window.duration_minutes,
            start_label: minutes_label(window.start_minutes),
            end_label: minutes_label(window.end_minutes),
        }
    }
}

/// The headline figures the daily screens show.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: String,
    pub total_calories: i64,
    pub calorie_goal: u32,
    pub goal_percent: i64,
    pub calories_burned: i64,
    pub average_energy: Option<f64>,
    pub fasting: FastingSummary,
}

fn minutes_label(minutes: u32) -> String {
    if minutes == 0 {
        return "--:--".to_string();
    }
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
