use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Viewer,
    SuggestionOnly,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "viewer",
            Role::SuggestionOnly => "suggestion-only",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "viewer" => Some(Role::Viewer),
            "suggestion-only" => Some(Role::SuggestionOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPreferences {
    pub cuisines: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub favorite_ingredients: Vec<String>,
    pub disliked_ingredients: Vec<String>,
    /// "quick" | "moderate" | "long"
    pub meal_prep_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub admin_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A named household profile. Profiles created by the admin share the admin's
/// user id; they are not separate logins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: Uuid,
    pub family_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
    pub calorie_goal: Option<i32>,
    pub health_goals: Option<Json<Vec<String>>>,
    pub preferences: Option<Json<MemberPreferences>>,
    pub onboarding_complete: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl FamilyMember {
    pub fn role(&self) -> Role {
        Role::parse(&self.role).unwrap_or(Role::Viewer)
    }
}

const MEMBER_COLUMNS: &str = "id, family_id, user_id, name, role, calorie_goal, health_goals, \
     preferences, onboarding_complete, created_at";

/// Creates the family and its admin member in one transaction so the
/// "exactly one admin after creation" invariant holds even on partial failure.
pub async fn create_family_with_admin(
    db: &PgPool,
    name: &str,
    user_id: Uuid,
) -> anyhow::Result<(Family, FamilyMember)> {
    let mut tx = db.begin().await?;

    let family = sqlx::query_as::<_, Family>(
        r#"
        INSERT INTO families (name, admin_id)
        VALUES ($1, $2)
        RETURNING id, name, admin_id, created_at
        "#,
    )
    .bind(name)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    let member = sqlx::query_as::<_, FamilyMember>(&format!(
        r#"
        INSERT INTO family_members (family_id, user_id, name, role)
        VALUES ($1, $2, 'Me', 'admin')
        RETURNING {MEMBER_COLUMNS}
        "#
    ))
    .bind(family.id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((family, member))
}

pub async fn insert_member(
    db: &PgPool,
    family_id: Uuid,
    user_id: Uuid,
    name: &str,
    role: Role,
) -> anyhow::Result<FamilyMember> {
    let member = sqlx::query_as::<_, FamilyMember>(&format!(
        r#"
        INSERT INTO family_members (family_id, user_id, name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING {MEMBER_COLUMNS}
        "#
    ))
    .bind(family_id)
    .bind(user_id)
    .bind(name)
    .bind(role.as_str())
    .fetch_one(db)
    .await?;
    Ok(member)
}

pub async fn find_family(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Family>> {
    let family = sqlx::query_as::<_, Family>(
        "SELECT id, name, admin_id, created_at FROM families WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(family)
}

pub async fn find_member(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FamilyMember>> {
    let member = sqlx::query_as::<_, FamilyMember>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM family_members WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(member)
}

/// The caller's membership. A user who created several families resolves to
/// their earliest member row, matching the original lookup-by-user behavior.
pub async fn find_member_by_user(
    db: &PgPool,
    user_id: Uuid,
) -> anyhow::Result<Option<FamilyMember>> {
    let member = sqlx::query_as::<_, FamilyMember>(&format!(
        r#"
        SELECT {MEMBER_COLUMNS}
        FROM family_members
        WHERE user_id = $1
        ORDER BY created_at ASC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(member)
}

pub async fn list_members(db: &PgPool, family_id: Uuid) -> anyhow::Result<Vec<FamilyMember>> {
    let members = sqlx::query_as::<_, FamilyMember>(&format!(
        r#"
        SELECT {MEMBER_COLUMNS}
        FROM family_members
        WHERE family_id = $1
        ORDER BY created_at ASC
        "#
    ))
    .bind(family_id)
    .fetch_all(db)
    .await?;
    Ok(members)
}

/// Member profile within a family for a given user id, used to label who
/// requested a planned meal.
pub async fn find_member_in_family(
    db: &PgPool,
    family_id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<Option<FamilyMember>> {
    let member = sqlx::query_as::<_, FamilyMember>(&format!(
        r#"
        SELECT {MEMBER_COLUMNS}
        FROM family_members
        WHERE family_id = $1 AND user_id = $2
        ORDER BY created_at ASC
        LIMIT 1
        "#
    ))
    .bind(family_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(member)
}

pub async fn update_member_preferences(
    db: &PgPool,
    member_id: Uuid,
    calorie_goal: i32,
    health_goals: &[String],
    preferences: &MemberPreferences,
) -> anyhow::Result<FamilyMember> {
    let member = sqlx::query_as::<_, FamilyMember>(&format!(
        r#"
        UPDATE family_members
        SET calorie_goal = $2,
            health_goals = $3,
            preferences = $4,
            onboarding_complete = TRUE
        WHERE id = $1
        RETURNING {MEMBER_COLUMNS}
        "#
    ))
    .bind(member_id)
    .bind(calorie_goal)
    .bind(Json(health_goals))
    .bind(Json(preferences))
    .fetch_one(db)
    .await?;
    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Admin, Role::Viewer, Role::SuggestionOnly] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn role_serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Role::SuggestionOnly).unwrap(),
            "\"suggestion-only\""
        );
        let parsed: Role = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(parsed, Role::Viewer);
    }
}
