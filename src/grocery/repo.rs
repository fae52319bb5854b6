use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

/// One grocery line. Items are addressed positionally by the mutation
/// endpoints, but each carries a stable id assigned at creation so clients can
/// correlate rows across concurrent edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
    pub bought: bool,
    pub added_by: Uuid,
}

impl GroceryItem {
    pub fn new(
        name: String,
        quantity: String,
        category: String,
        recipe_id: Option<Uuid>,
        added_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            quantity,
            category,
            recipe_id,
            bought: false,
            added_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListRow {
    pub id: Uuid,
    pub family_id: Uuid,
    pub week_of: String,
    pub items: Json<Vec<GroceryItem>>,
}

pub async fn find_by_week(
    db: &PgPool,
    family_id: Uuid,
    week_of: &str,
) -> anyhow::Result<Option<GroceryListRow>> {
    let row = sqlx::query_as::<_, GroceryListRow>(
        r#"
        SELECT id, family_id, week_of, items
        FROM grocery_lists
        WHERE family_id = $1 AND week_of = $2
        "#,
    )
    .bind(family_id)
    .bind(week_of)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Writes back the full item sequence, creating the week's row on first use.
pub async fn upsert_items(
    db: &PgPool,
    family_id: Uuid,
    week_of: &str,
    items: &[GroceryItem],
) -> anyhow::Result<GroceryListRow> {
    let row = sqlx::query_as::<_, GroceryListRow>(
        r#"
        INSERT INTO grocery_lists (family_id, week_of, items)
        VALUES ($1, $2, $3)
        ON CONFLICT (family_id, week_of)
        DO UPDATE SET items = EXCLUDED.items
        RETURNING id, family_id, week_of, items
        "#,
    )
    .bind(family_id)
    .bind(week_of)
    .bind(Json(items))
    .fetch_one(db)
    .await?;
    Ok(row)
}
