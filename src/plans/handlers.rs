use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    dates,
    error::ApiError,
    families,
    families::repo::{FamilyMember, Role},
    grocery::propagate,
    recipes,
    recipes::repo::{Nutrition, Recipe},
    state::AppState,
};

use super::{
    dto::{
        AddMealRequest, DayNutrition, GenerateRequest, GenerateResponse, MealPlanView, MealsView,
        RequesterView, SlotView, WeeklyNutritionParams, WeeklyNutritionResponse,
    },
    repo,
    repo::{MealSlot, MealType},
    service,
};

async fn require_member(state: &AppState, user_id: Uuid) -> Result<FamilyMember, ApiError> {
    families::repo::find_member_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::Forbidden("User not in a family"))
}

#[instrument(skip(state))]
pub async fn get_meal_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<Option<MealPlanView>>, ApiError> {
    let member = require_member(&state, user_id).await?;

    let Some(plan) = repo::find_by_date(&state.db, member.family_id, &date).await? else {
        return Ok(Json(None));
    };

    let mut meals = MealsView::default();
    for meal_type in MealType::ALL {
        if let Some(slot) = plan.meals.get(meal_type) {
            let recipe = recipes::repo::find(&state.db, slot.recipe_id).await?;
            let requested_by = match slot.requested_by {
                Some(requester) => {
                    families::repo::find_member_in_family(&state.db, plan.family_id, requester)
                        .await?
                        .map(|m| RequesterView {
                            id: m.id,
                            name: m.name,
                        })
                }
                None => None,
            };
            meals.set(
                meal_type,
                SlotView {
                    recipe,
                    requested_by,
                },
            );
        }
    }

    Ok(Json(Some(MealPlanView {
        id: plan.id,
        family_id: plan.family_id,
        date: plan.date,
        meals,
    })))
}

#[instrument(skip(state, body))]
pub async fn add_meal_to_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
    Json(body): Json<AddMealRequest>,
) -> Result<StatusCode, ApiError> {
    let member = require_member(&state, user_id).await?;
    if member.role() == Role::Viewer {
        return Err(ApiError::Forbidden("Viewers cannot add meals directly"));
    }

    let mut meals = repo::find_by_date(&state.db, member.family_id, &date)
        .await?
        .map(|plan| plan.meals.0)
        .unwrap_or_default();
    meals.set(
        body.meal_type,
        Some(MealSlot {
            recipe_id: body.recipe_id,
            requested_by: Some(user_id),
        }),
    );
    repo::upsert_meals(&state.db, member.family_id, &date, &meals).await?;

    // The write above is acknowledged regardless of how propagation fares.
    propagate::spawn_propagation(
        state.db.clone(),
        member.family_id,
        body.recipe_id,
        user_id,
        date,
    );

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn remove_meal_from_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((date, meal_type)): Path<(String, MealType)>,
) -> Result<StatusCode, ApiError> {
    let member = require_member(&state, user_id).await?;
    if member.role() == Role::Viewer {
        return Err(ApiError::Forbidden("Viewers cannot remove meals"));
    }

    // No plan for that date is a silent no-op, not an error.
    if let Some(plan) = repo::find_by_date(&state.db, member.family_id, &date).await? {
        let mut meals = plan.meals.0;
        meals.set(meal_type, None);
        repo::upsert_meals(&state.db, member.family_id, &date, &meals).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn get_weekly_nutrition(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<WeeklyNutritionParams>,
) -> Result<Json<WeeklyNutritionResponse>, ApiError> {
    let member = require_member(&state, user_id).await?;
    let start = dates::parse_day(&params.start).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut recipe_cache: HashMap<Uuid, Recipe> = HashMap::new();
    let mut weekly = Nutrition::default();
    let mut daily = Vec::with_capacity(7);

    for date in dates::week_dates(start) {
        let plan = repo::find_by_date(&state.db, member.family_id, &date).await?;
        let totals = match plan {
            Some(plan) => {
                for meal_type in MealType::ALL {
                    if let Some(slot) = plan.meals.get(meal_type) {
                        if !recipe_cache.contains_key(&slot.recipe_id) {
                            if let Some(recipe) =
                                recipes::repo::find(&state.db, slot.recipe_id).await?
                            {
                                recipe_cache.insert(slot.recipe_id, recipe);
                            }
                        }
                    }
                }
                service::sum_slots(&plan.meals, &recipe_cache)
            }
            None => Nutrition::default(),
        };
        weekly.add(&totals);
        daily.push(DayNutrition { date, totals });
    }

    Ok(Json(WeeklyNutritionResponse {
        weekly,
        daily,
        calorie_goal: member.calorie_goal.unwrap_or(service::DEFAULT_CALORIE_GOAL),
    }))
}

#[instrument(skip(state, body))]
pub async fn generate_ai_meal_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let member = require_member(&state, user_id).await?;
    let start =
        dates::parse_day(&body.start_date).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let members = families::repo::list_members(&state.db, member.family_id).await?;
    let recipes = recipes::repo::list_all(&state.db).await?;

    let prompt = service::render_prompt(&members, &recipes, &body.start_date);
    let content = state.ai.complete(&prompt).await?;
    let generated = service::parse_generated_plan(&content)?;

    let writes = service::plan_writes(&generated, &recipes, start);
    let days_written = writes.len();
    for (date, meals) in &writes {
        repo::upsert_meals(&state.db, member.family_id, date, meals).await?;
    }
    info!(family_id = %member.family_id, days = days_written, "AI meal plan persisted");

    Ok(Json(GenerateResponse {
        success: true,
        message: "AI meal plan generated successfully!".to_string(),
    }))
}
