//! Plan-level computations kept free of the store: nutrition summation over a
//! week of slots, and the prompt/parse/match pipeline behind AI generation.

use std::collections::HashMap;

use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use crate::{
    dates,
    families::repo::FamilyMember,
    recipes::repo::{Nutrition, Recipe},
};

use super::repo::{MealSlot, MealSlots, MealType};

pub const DEFAULT_CALORIE_GOAL: i32 = 2000;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Sums the nutrition of every populated slot whose recipe is known.
pub fn sum_slots(slots: &MealSlots, recipes_by_id: &HashMap<Uuid, Recipe>) -> Nutrition {
    let mut total = Nutrition::default();
    for meal_type in MealType::ALL {
        if let Some(slot) = slots.get(meal_type) {
            if let Some(recipe) = recipes_by_id.get(&slot.recipe_id) {
                total.add(&recipe.nutrition);
            }
        }
    }
    total
}

/// Natural-language request sent to the completion service. The model is asked
/// for a JSON object keyed by lowercase weekday names whose slot values are
/// recipe names drawn from the catalog listing.
pub fn render_prompt(members: &[FamilyMember], recipes: &[Recipe], start_date: &str) -> String {
    let member_lines = members
        .iter()
        .map(|m| {
            let prefs = m
                .preferences
                .as_ref()
                .and_then(|p| serde_json::to_string(&p.0).ok())
                .unwrap_or_else(|| "{}".to_string());
            let goal = m.calorie_goal.unwrap_or(DEFAULT_CALORIE_GOAL);
            format!("- {}: {}, Calorie Goal: {}", m.name, prefs, goal)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let recipe_lines = recipes
        .iter()
        .map(|r| {
            format!(
                "- {} ({}, {}, {} cal, Prep: {})",
                r.name,
                r.cuisine_type,
                r.dietary_tags.join(", "),
                r.nutrition.calories,
                r.prep_time
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Generate a weekly meal plan for a family with the following preferences:

Family Members:
{member_lines}

Available Recipes:
{recipe_lines}

Please create a balanced weekly meal plan starting from {start_date}. Consider:
1. Family dietary restrictions and preferences
2. Variety in cuisines and ingredients
3. Balanced nutrition across the week
4. Mix of prep times based on family availability
5. Avoid ingredients that family members dislike

Return a JSON object with this structure:
{{
  "monday": {{"breakfast": "Recipe Name", "lunch": "Recipe Name", "dinner": "Recipe Name"}},
  "tuesday": {{"breakfast": "Recipe Name", "lunch": "Recipe Name", "dinner": "Recipe Name"}},
  ... for all 7 days
}}

Only use recipe names from the available recipes list above."#
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneratedDay {
    #[serde(default)]
    pub breakfast: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
}

/// Parses the raw completion text as the weekday-keyed JSON object requested
/// in the prompt. Anything unparsable fails the whole generation.
pub fn parse_generated_plan(content: &str) -> anyhow::Result<HashMap<String, GeneratedDay>> {
    serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse AI meal plan response: {e}"))
}

/// Turns the parsed plan into per-date meal sets. Recipe names are matched to
/// catalog ids by exact equality; a slot naming an unknown recipe is silently
/// dropped, as is any weekday missing from the model output.
pub fn plan_writes(
    generated: &HashMap<String, GeneratedDay>,
    recipes: &[Recipe],
    start: Date,
) -> Vec<(String, MealSlots)> {
    let by_name: HashMap<&str, Uuid> = recipes.iter().map(|r| (r.name.as_str(), r.id)).collect();

    let mut writes = Vec::new();
    for (i, date) in dates::week_dates(start).into_iter().enumerate() {
        let Some(day) = generated.get(WEEKDAYS[i]) else {
            continue;
        };
        let mut slots = MealSlots::default();
        for (meal_type, name) in [
            (MealType::Breakfast, &day.breakfast),
            (MealType::Lunch, &day.lunch),
            (MealType::Dinner, &day.dinner),
        ] {
            if let Some(recipe_id) = name.as_deref().and_then(|n| by_name.get(n)) {
                slots.set(
                    meal_type,
                    Some(MealSlot {
                        recipe_id: *recipe_id,
                        requested_by: None,
                    }),
                );
            }
        }
        writes.push((date, slots));
    }
    writes
}

#[cfg(test)]
mod tests {
    use sqlx::types::Json;
    use time::OffsetDateTime;

    use super::*;

    fn recipe(name: &str, calories: f64) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            cuisine_type: "Italian".into(),
            dietary_tags: Json(vec!["vegetarian".into()]),
            prep_time: "quick".into(),
            nutrition: Json(Nutrition {
                calories,
                protein: 10.0,
                carbs: 20.0,
                fat: 5.0,
                sugar: 2.0,
            }),
            ingredients: Json(vec![]),
            instructions: Json(vec![]),
            allergens: Json(vec![]),
            estimated_cost: 10.0,
            health_score: 70,
            tags: Json(vec![]),
        }
    }

    fn member(name: &str, goal: Option<i32>) -> FamilyMember {
        FamilyMember {
            id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.into(),
            role: "admin".into(),
            calorie_goal: goal,
            health_goals: None,
            preferences: None,
            onboarding_complete: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn sum_slots_over_empty_plan_is_zero() {
        let totals = sum_slots(&MealSlots::default(), &HashMap::new());
        assert_eq!(totals, Nutrition::default());
    }

    #[test]
    fn sum_slots_accumulates_each_populated_slot() {
        let breakfast = recipe("Pancakes", 420.0);
        let dinner = recipe("Chicken Curry", 380.0);
        let by_id: HashMap<Uuid, Recipe> = [breakfast.clone(), dinner.clone()]
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let mut slots = MealSlots::default();
        slots.set(
            MealType::Breakfast,
            Some(MealSlot {
                recipe_id: breakfast.id,
                requested_by: None,
            }),
        );
        slots.set(
            MealType::Dinner,
            Some(MealSlot {
                recipe_id: dinner.id,
                requested_by: None,
            }),
        );

        let totals = sum_slots(&slots, &by_id);
        assert_eq!(totals.calories, 800.0);
        assert_eq!(totals.protein, 20.0);
    }

    #[test]
    fn sum_slots_skips_unknown_recipes() {
        let mut slots = MealSlots::default();
        slots.set(
            MealType::Lunch,
            Some(MealSlot {
                recipe_id: Uuid::new_v4(),
                requested_by: None,
            }),
        );
        let totals = sum_slots(&slots, &HashMap::new());
        assert_eq!(totals, Nutrition::default());
    }

    #[test]
    fn prompt_lists_members_and_recipes() {
        let members = vec![member("Alice", Some(1800)), member("Bob", None)];
        let recipes = vec![recipe("Greek Salad", 280.0)];
        let prompt = render_prompt(&members, &recipes, "2024-06-03");
        assert!(prompt.contains("- Alice: {}, Calorie Goal: 1800"));
        assert!(prompt.contains("- Bob: {}, Calorie Goal: 2000"));
        assert!(prompt.contains("- Greek Salad (Italian, vegetarian, 280 cal, Prep: quick)"));
        assert!(prompt.contains("starting from 2024-06-03"));
    }

    #[test]
    fn parse_rejects_non_json_output() {
        assert!(parse_generated_plan("Sure! Here is your plan:").is_err());
        assert!(parse_generated_plan("").is_err());
    }

    #[test]
    fn parse_accepts_partial_days_and_slots() {
        let parsed =
            parse_generated_plan(r#"{"monday": {"lunch": "Greek Salad"}, "friday": {}}"#).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["monday"].lunch.as_deref(), Some("Greek Salad"));
        assert!(parsed["monday"].breakfast.is_none());
    }

    #[test]
    fn plan_writes_matches_names_and_skips_unknowns() {
        let salad = recipe("Greek Salad", 280.0);
        let recipes = vec![salad.clone()];
        let parsed = parse_generated_plan(
            r#"{
                "monday": {"breakfast": "Greek Salad", "lunch": "Unknown Dish"},
                "sunday": {"dinner": "Greek Salad"}
            }"#,
        )
        .unwrap();

        let start = dates::parse_day("2024-06-03").unwrap();
        let writes = plan_writes(&parsed, &recipes, start);
        assert_eq!(writes.len(), 2);

        let (monday, monday_slots) = &writes[0];
        assert_eq!(monday, "2024-06-03");
        assert_eq!(
            monday_slots.get(MealType::Breakfast).map(|s| s.recipe_id),
            Some(salad.id)
        );
        assert!(monday_slots.get(MealType::Lunch).is_none());

        let (sunday, sunday_slots) = &writes[1];
        assert_eq!(sunday, "2024-06-09");
        assert!(sunday_slots.get(MealType::Dinner).is_some());
        assert_eq!(
            sunday_slots.get(MealType::Dinner).and_then(|s| s.requested_by),
            None
        );
    }

    #[test]
    fn plan_writes_ignores_days_missing_from_output() {
        let start = dates::parse_day("2024-06-03").unwrap();
        let writes = plan_writes(&HashMap::new(), &[], start);
        assert!(writes.is_empty());
    }
}
