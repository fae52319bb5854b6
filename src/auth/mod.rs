pub mod jwt;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

use self::jwt::JwtKeys;

pub fn router() -> Router<AppState> {
    Router::new().route("/auth/dev-token", post(dev_token))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevTokenRequest {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevTokenResponse {
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
}

/// Mints a token pair for an arbitrary user id. Only mounted behaviorally when
/// `DEV_TOKENS` is set; identity is otherwise expected from the external
/// provider sharing our JWT secret.
#[instrument(skip(state))]
async fn dev_token(
    State(state): State<AppState>,
    Json(body): Json<DevTokenRequest>,
) -> Result<Json<DevTokenResponse>, ApiError> {
    if !state.config.dev_tokens {
        return Err(ApiError::NotFound("Not found"));
    }
    let keys = JwtKeys::from_config(&state.config.jwt);
    let user_id = body.user_id.unwrap_or_else(Uuid::new_v4);
    let access_token = keys.sign_access(user_id)?;
    let refresh_token = keys.sign_refresh(user_id)?;
    Ok(Json(DevTokenResponse {
        user_id,
        access_token,
        refresh_token,
    }))
}
