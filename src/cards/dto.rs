use serde::Deserialize;

use crate::domain::NutrientSlot;

/// Save request for a food card. An absent id means "create"; numeric
/// fields default the way the editor form did (0 kcal, 100 g portion).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFoodCardRequest {
    pub id: Option<String>,
    pub name: String,
    pub image: Option<String>,
    pub default_weight: Option<f64>,
    pub calories_per_100g: Option<f64>,
    #[serde(default)]
    pub nutrients: Vec<NutrientSlot>,
    pub custom_tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveActivityCardRequest {
    pub id: Option<String>,
    pub name: String,
    pub icon: Option<String>,
    pub default_duration: Option<f64>,
    pub calorie_burn_rate: Option<f64>,
    pub tags: Option<Vec<String>>,
}
