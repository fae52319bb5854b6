use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::{Family, FamilyMember, MemberPreferences, Role};

#[derive(Debug, Deserialize)]
pub struct CreateFamilyRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyResponse {
    pub family_id: Uuid,
    pub member_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub calorie_goal: i32,
    pub health_goals: Vec<String>,
    pub preferences: MemberPreferences,
}

/// Caller's family with the full member roster.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFamilyResponse {
    pub family: Option<Family>,
    pub current_member: FamilyMember,
    pub all_members: Vec<FamilyMember>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentFamilyResponse {
    pub family: Option<Family>,
    pub member: FamilyMember,
}
