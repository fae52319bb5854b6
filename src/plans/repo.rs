use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    pub recipe_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<Uuid>,
}

/// The three slots of one day's plan. Slots mutate independently; the row
/// persists even when all three are cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<MealSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<MealSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<MealSlot>,
}

impl MealSlots {
    pub fn get(&self, meal_type: MealType) -> Option<&MealSlot> {
        match meal_type {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set(&mut self, meal_type: MealType, slot: Option<MealSlot>) {
        match meal_type {
            MealType::Breakfast => self.breakfast = slot,
            MealType::Lunch => self.lunch = slot,
            MealType::Dinner => self.dinner = slot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRow {
    pub id: Uuid,
    pub family_id: Uuid,
    pub date: String,
    pub meals: Json<MealSlots>,
}

pub async fn find_by_date(
    db: &PgPool,
    family_id: Uuid,
    date: &str,
) -> anyhow::Result<Option<MealPlanRow>> {
    let row = sqlx::query_as::<_, MealPlanRow>(
        r#"
        SELECT id, family_id, date, meals
        FROM meal_plans
        WHERE family_id = $1 AND date = $2
        "#,
    )
    .bind(family_id)
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Replaces the full meal set for (family, date), creating the row if absent.
pub async fn upsert_meals(
    db: &PgPool,
    family_id: Uuid,
    date: &str,
    meals: &MealSlots,
) -> anyhow::Result<MealPlanRow> {
    let row = sqlx::query_as::<_, MealPlanRow>(
        r#"
        INSERT INTO meal_plans (family_id, date, meals)
        VALUES ($1, $2, $3)
        ON CONFLICT (family_id, date)
        DO UPDATE SET meals = EXCLUDED.meals
        RETURNING id, family_id, date, meals
        "#,
    )
    .bind(family_id)
    .bind(date)
    .bind(Json(meals))
    .fetch_one(db)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_patches_only_the_target_slot() {
        let mut slots = MealSlots::default();
        let lunch = MealSlot {
            recipe_id: Uuid::new_v4(),
            requested_by: None,
        };
        slots.set(MealType::Lunch, Some(lunch.clone()));
        assert_eq!(slots.get(MealType::Lunch), Some(&lunch));
        assert!(slots.get(MealType::Breakfast).is_none());
        assert!(slots.get(MealType::Dinner).is_none());

        let dinner = MealSlot {
            recipe_id: Uuid::new_v4(),
            requested_by: None,
        };
        slots.set(MealType::Dinner, Some(dinner));
        slots.set(MealType::Lunch, None);
        assert!(slots.get(MealType::Lunch).is_none());
        assert!(slots.get(MealType::Dinner).is_some());
    }

    #[test]
    fn meal_type_deserializes_lowercase() {
        let t: MealType = serde_json::from_str("\"lunch\"").unwrap();
        assert_eq!(t, MealType::Lunch);
        assert!(serde_json::from_str::<MealType>("\"brunch\"").is_err());
    }

    #[test]
    fn empty_slots_serialize_to_empty_object() {
        let slots = MealSlots::default();
        assert_eq!(serde_json::to_string(&slots).unwrap(), "{}");
    }
}
