use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipes::repo::{Nutrition, Recipe};

use super::repo::MealType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMealRequest {
    pub meal_type: MealType,
    pub recipe_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub start_date: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
}

/// Whoever asked for a planned meal, resolved to their household profile.
#[derive(Debug, Serialize)]
pub struct RequesterView {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub recipe: Option<Recipe>,
    pub requested_by: Option<RequesterView>,
}

#[derive(Debug, Default, Serialize)]
pub struct MealsView {
    pub breakfast: Option<SlotView>,
    pub lunch: Option<SlotView>,
    pub dinner: Option<SlotView>,
}

impl MealsView {
    pub fn set(&mut self, meal_type: MealType, view: SlotView) {
        match meal_type {
            MealType::Breakfast => self.breakfast = Some(view),
            MealType::Lunch => self.lunch = Some(view),
            MealType::Dinner => self.dinner = Some(view),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanView {
    pub id: Uuid,
    pub family_id: Uuid,
    pub date: String,
    pub meals: MealsView,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyNutritionParams {
    /// First day of the 7-day window, `YYYY-MM-DD`.
    pub start: String,
}

#[derive(Debug, Serialize)]
pub struct DayNutrition {
    pub date: String,
    #[serde(flatten)]
    pub totals: Nutrition,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyNutritionResponse {
    pub weekly: Nutrition,
    pub daily: Vec<DayNutrition>,
    pub calorie_goal: i32,
}
