use axum::{Json, extract::State, response::IntoResponse};
use tracing::{info, warn};

use candymap_types::api::{LoginRequest, RegisterRequest, SuccessResponse};
use candymap_types::models::User;

use crate::credentials::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::{AppState, blocking};

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (non_empty(req.username), non_empty(req.password))
    else {
        return Err(ApiError::validation("Missing fields"));
    };

    let role = state.moderators.role_for(&username);

    let id = blocking(&state, move |state| {
        let password_hash = hash_password(&password)?;
        Ok(state.db.create_user(&username, &password_hash, role)?)
    })
    .await
    .inspect_err(|e| {
        if matches!(e, ApiError::UsernameTaken) {
            warn!("Registration rejected: username taken");
        }
    })?;

    info!("Registered user {} as {}", id, role.as_str());
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/login
///
/// No session is created; the client keeps the returned record in memory.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = blocking(&state, move |state| {
        let row = state
            .db
            .get_user_by_username(&username)?
            .ok_or(ApiError::InvalidUsername)?;

        if !verify_password(&password, &row.password) {
            return Err(ApiError::InvalidPassword);
        }

        Ok(User {
            id: row.id,
            username: row.username,
            role: row.role,
            title: row.title,
            profile_pic: row.profile_pic,
        })
    })
    .await?;

    info!("User {} logged in", user.id);
    Ok(Json(user))
}

/// Null and empty strings both count as missing.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
