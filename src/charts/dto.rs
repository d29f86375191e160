use serde::Deserialize;

use crate::domain::{new_id, ChartConfig, ChartType, DataSource};

/// Save request for a chart slot. Defaults mirror a freshly added widget:
/// a bar chart over daily calories.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveChartRequest {
    pub id: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(rename = "type", default = "default_chart_type")]
    pub chart_type: ChartType,
    #[serde(default = "default_source")]
    pub source: DataSource,
    pub target_id: Option<String>,
}

fn default_title() -> String {
    "New Chart".to_string()
}

fn default_chart_type() -> ChartType {
    ChartType::Bar
}

fn default_source() -> DataSource {
    DataSource::Calories
}

impl From<SaveChartRequest> for ChartConfig {
    fn from(req: SaveChartRequest) -> Self {
        Self {
            id: req.id.unwrap_or_else(new_id),
            title: req.title,
            chart_type: req.chart_type,
            source: req.source,
            target_id: req.target_id,
        }
    }
}
