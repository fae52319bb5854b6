use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use super::repo::{Ingredient, Nutrition};

/// Bundled sample catalog. Seeding is a process-wide bootstrap: the first
/// family to onboard populates the shared catalog for everyone.
const SEED_JSON: &str = include_str!("seed_recipes.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecipe {
    pub name: String,
    pub description: String,
    pub cuisine_type: String,
    pub dietary_tags: Vec<String>,
    pub prep_time: String,
    pub nutrition: Nutrition,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub allergens: Vec<String>,
    pub estimated_cost: f64,
    pub health_score: i32,
    pub tags: Vec<String>,
}

pub fn sample_recipes() -> Vec<SeedRecipe> {
    serde_json::from_str(SEED_JSON).expect("bundled seed catalog is valid")
}

/// Inserts the sample catalog when the table is empty. Idempotent: a non-empty
/// catalog (whoever seeded it) makes this a no-op.
pub async fn seed_catalog(db: &PgPool) -> anyhow::Result<bool> {
    if super::repo::count(db).await? > 0 {
        return Ok(false);
    }
    let recipes = sample_recipes();
    for recipe in &recipes {
        super::repo::insert(db, recipe).await?;
    }
    info!(count = recipes.len(), "seeded recipe catalog");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses_to_ten_recipes() {
        let recipes = sample_recipes();
        assert_eq!(recipes.len(), 10);
    }

    #[test]
    fn bundled_catalog_names_are_unique() {
        let recipes = sample_recipes();
        let mut names: Vec<_> = recipes.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), recipes.len());
    }

    #[test]
    fn every_seed_recipe_has_ingredients_and_instructions() {
        for recipe in sample_recipes() {
            assert!(!recipe.ingredients.is_empty(), "{} has none", recipe.name);
            assert!(!recipe.instructions.is_empty(), "{} has none", recipe.name);
            assert!(recipe.nutrition.calories > 0.0);
            assert!(matches!(
                recipe.prep_time.as_str(),
                "quick" | "moderate" | "long"
            ));
        }
    }
}
