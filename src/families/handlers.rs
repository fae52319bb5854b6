use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::{
    dto::{
        AddMemberRequest, CreateFamilyRequest, CreateFamilyResponse, CurrentFamilyResponse,
        UpdatePreferencesRequest, UserFamilyResponse,
    },
    repo,
    repo::FamilyMember,
};

#[instrument(skip(state, body))]
pub async fn create_family(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateFamilyRequest>,
) -> Result<(StatusCode, Json<CreateFamilyResponse>), ApiError> {
    let (family, member) = repo::create_family_with_admin(&state.db, &body.name, user_id).await?;
    info!(family_id = %family.id, "family created");
    Ok((
        StatusCode::CREATED,
        Json(CreateFamilyResponse {
            family_id: family.id,
            member_id: member.id,
        }),
    ))
}

/// Adds a household profile. Only the family admin may do this; the new row is
/// created under the admin's own user id.
#[instrument(skip(state, body))]
pub async fn add_family_member(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(family_id): Path<Uuid>,
    Json(body): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<FamilyMember>), ApiError> {
    let family = repo::find_family(&state.db, family_id).await?;
    match family {
        Some(f) if f.admin_id == user_id => {}
        // Missing family and non-admin caller are deliberately indistinct.
        _ => return Err(ApiError::Forbidden("Not authorized")),
    }

    let member = repo::insert_member(&state.db, family_id, user_id, &body.name, body.role).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[instrument(skip(state, body))]
pub async fn update_member_preferences(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(member_id): Path<Uuid>,
    Json(body): Json<UpdatePreferencesRequest>,
) -> Result<Json<FamilyMember>, ApiError> {
    let member = repo::find_member(&state.db, member_id).await?;
    match member {
        Some(m) if m.user_id == user_id => {}
        _ => return Err(ApiError::Forbidden("Not authorized")),
    }

    let updated = repo::update_member_preferences(
        &state.db,
        member_id,
        body.calorie_goal,
        &body.health_goals,
        &body.preferences,
    )
    .await?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn get_user_family(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Option<UserFamilyResponse>>, ApiError> {
    let Some(member) = repo::find_member_by_user(&state.db, user_id).await? else {
        return Ok(Json(None));
    };
    let family = repo::find_family(&state.db, member.family_id).await?;
    let all_members = repo::list_members(&state.db, member.family_id).await?;
    Ok(Json(Some(UserFamilyResponse {
        family,
        current_member: member,
        all_members,
    })))
}

#[instrument(skip(state))]
pub async fn get_current_family(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Option<CurrentFamilyResponse>>, ApiError> {
    let Some(member) = repo::find_member_by_user(&state.db, user_id).await? else {
        return Ok(Json(None));
    };
    let family = repo::find_family(&state.db, member.family_id).await?;
    Ok(Json(Some(CurrentFamilyResponse { family, member })))
}

#[instrument(skip(state))]
pub async fn get_family_members(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(family_id): Path<Uuid>,
) -> Result<Json<Vec<FamilyMember>>, ApiError> {
    let members = repo::list_members(&state.db, family_id).await?;
    Ok(Json(members))
}
