use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::domain::{new_id, ActivityCard, FoodCard};
use crate::error::{ApiError, ApiResult};

use super::dto::{SaveActivityCardRequest, SaveFoodCardRequest};

const DEFAULT_PORTION_GRAMS: f64 = 100.0;
const FALLBACK_ICON: &str = "Accessibility";

/// Seeded placeholder used when a card is saved without an image.
pub fn placeholder_image() -> String {
    let seed: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("https://picsum.photos/seed/{seed}/200/200")
}

pub fn build_food_card(req: SaveFoodCardRequest) -> ApiResult<FoodCard> {
    let calories_per_100g = req.calories_per_100g.unwrap_or(0.0);
    if calories_per_100g < 0.0 {
        return Err(ApiError::Validation(
            "caloriesPer100g must be non-negative".into(),
        ));
    }
    let default_weight = req.default_weight.unwrap_or(DEFAULT_PORTION_GRAMS);
    if default_weight < 0.0 {
        return Err(ApiError::Validation("defaultWeight must be non-negative".into()));
    }
    Ok(FoodCard {
        id: req.id.unwrap_or_else(new_id),
        name: req.name,
        image: req.image.unwrap_or_else(placeholder_image),
        default_weight,
        calories_per_100g,
        nutrients: req.nutrients,
        custom_tags: req.custom_tags,
    })
}

pub fn build_activity_card(req: SaveActivityCardRequest) -> ApiResult<ActivityCard> {
    if req.calorie_burn_rate.unwrap_or(0.0) < 0.0 {
        return Err(ApiError::Validation(
            "calorieBurnRate must be non-negative".into(),
        ));
    }
    if req.default_duration.unwrap_or(0.0) < 0.0 {
        return Err(ApiError::Validation(
            "defaultDuration must be non-negative".into(),
        ));
    }
    Ok(ActivityCard {
        id: req.id.unwrap_or_else(new_id),
        name: req.name,
        icon: req.icon.unwrap_or_else(|| FALLBACK_ICON.to_string()),
        default_duration: req.default_duration,
        calorie_burn_rate: req.calorie_burn_rate,
        tags: req.tags,
    })
}

#[cfg(test)]
mod card_services_tests {
    use super::*;

    #[test]
    fn food_card_defaults_match_the_editor_form() {
        let card = build_food_card(SaveFoodCardRequest {
            id: None,
            name: "Banana".into(),
            image: None,
            default_weight: None,
            calories_per_100g: None,
            nutrients: Vec::new(),
            custom_tags: None,
        })
        .unwrap();
        assert!(!card.id.is_empty());
        assert_eq!(card.default_weight, 100.0);
        assert_eq!(card.calories_per_100g, 0.0);
        assert!(card.image.starts_with("https://picsum.photos/seed/"));
    }

    #[test]
    fn negative_calories_are_rejected() {
        let err = build_food_card(SaveFoodCardRequest {
            id: None,
            name: "Antifood".into(),
            image: None,
            default_weight: None,
            calories_per_100g: Some(-1.0),
            nutrients: Vec::new(),
            custom_tags: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn activity_card_gets_the_fallback_icon() {
        let card = build_activity_card(SaveActivityCardRequest {
            id: Some("a9".into()),
            name: "Stretching".into(),
            icon: None,
            default_duration: Some(15.0),
            calorie_burn_rate: Some(2.5),
            tags: None,
        })
        .unwrap();
        assert_eq!(card.id, "a9");
        assert_eq!(card.icon, "Accessibility");
    }

    #[test]
    fn placeholder_images_vary() {
        assert_ne!(placeholder_image(), placeholder_image());
    }
}
