use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{dates, recipes};

use super::{items, repo};

/// Folds a planned recipe's ingredients into the grocery list for the ISO week
/// containing `date`. Runs detached after a meal-plan write commits; the
/// originating request never observes its outcome.
pub async fn add_ingredients_from_recipe(
    db: &PgPool,
    family_id: Uuid,
    recipe_id: Uuid,
    added_by: Uuid,
    date: &str,
) -> anyhow::Result<()> {
    let Some(recipe) = recipes::repo::find(db, recipe_id).await? else {
        return Ok(());
    };

    let day = dates::parse_day(date)?;
    let week_of = dates::format_day(dates::monday_of_week(day));

    let mut item_list = repo::find_by_week(db, family_id, &week_of)
        .await?
        .map(|row| row.items.0)
        .unwrap_or_default();

    let added = items::merge_ingredients(&mut item_list, &recipe.ingredients, recipe_id, added_by);
    if added > 0 {
        repo::upsert_items(db, family_id, &week_of, &item_list).await?;
        info!(%family_id, %recipe_id, %week_of, added, "propagated ingredients to grocery list");
    }
    Ok(())
}

/// Fire-and-forget wrapper used by the meal-plan handlers.
pub fn spawn_propagation(db: PgPool, family_id: Uuid, recipe_id: Uuid, added_by: Uuid, date: String) {
    tokio::spawn(async move {
        if let Err(e) = add_ingredients_from_recipe(&db, family_id, recipe_id, added_by, &date).await
        {
            warn!(%family_id, %recipe_id, %date, error = %e, "ingredient propagation failed");
        }
    });
}
