use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

/// Per-serving nutrition facts carried on every catalog recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
}

impl Nutrition {
    pub fn add(&mut self, other: &Nutrition) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
        self.sugar += other.sugar;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub category: String,
}

/// Catalog recipe. The catalog is global and shared across families; rows are
/// immutable after seeding.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub cuisine_type: String,
    pub dietary_tags: Json<Vec<String>>,
    pub prep_time: String,
    pub nutrition: Json<Nutrition>,
    pub ingredients: Json<Vec<Ingredient>>,
    pub instructions: Json<Vec<String>>,
    pub allergens: Json<Vec<String>>,
    pub estimated_cost: f64,
    pub health_score: i32,
    pub tags: Json<Vec<String>>,
}

const RECIPE_COLUMNS: &str = "id, name, description, cuisine_type, dietary_tags, prep_time, \
     nutrition, ingredients, instructions, allergens, estimated_cost, health_score, tags";

pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(db)
        .await?;
    Ok(n)
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY name"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Recipe>> {
    let row = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Name substring and exact cuisine narrowing happen in SQL; dietary-tag
/// overlap is applied by the caller on the decoded rows.
pub async fn search(
    db: &PgPool,
    term: Option<&str>,
    cuisine: Option<&str>,
) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        r#"
        SELECT {RECIPE_COLUMNS}
        FROM recipes
        WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
          AND ($2::text IS NULL OR cuisine_type = $2)
        ORDER BY name
        "#
    ))
    .bind(term)
    .bind(cuisine)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, recipe: &super::seed::SeedRecipe) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO recipes (name, description, cuisine_type, dietary_tags, prep_time,
                             nutrition, ingredients, instructions, allergens,
                             estimated_cost, health_score, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id
        "#,
    )
    .bind(&recipe.name)
    .bind(&recipe.description)
    .bind(&recipe.cuisine_type)
    .bind(Json(&recipe.dietary_tags))
    .bind(&recipe.prep_time)
    .bind(Json(&recipe.nutrition))
    .bind(Json(&recipe.ingredients))
    .bind(Json(&recipe.instructions))
    .bind(Json(&recipe.allergens))
    .bind(recipe.estimated_cost)
    .bind(recipe.health_score)
    .bind(Json(&recipe.tags))
    .fetch_one(db)
    .await?;
    Ok(id)
}
