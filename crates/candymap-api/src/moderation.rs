use axum::{Json, extract::State, response::IntoResponse};
use tracing::{info, warn};

use candymap_db::Database;
use candymap_types::api::{DeleteReviewRequest, SetTitleRequest, SuccessResponse};
use candymap_types::models::Role;

use crate::credentials::hash_password;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::{AppState, AppStateInner, blocking};

/// Username granted moderator when no bootstrap list is configured.
pub const DEFAULT_MODERATOR: &str = "memegodmidas";

/// Bootstrap moderator usernames. Registering one of these names yields a
/// moderator account, and the server seeds any that are missing at startup.
#[derive(Debug, Clone)]
pub struct Moderators {
    usernames: Vec<String>,
}

impl Moderators {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }

    pub fn usernames(&self) -> &[String] {
        &self.usernames
    }

    /// Exact, case-sensitive match.
    pub fn role_for(&self, username: &str) -> Role {
        if self.usernames.iter().any(|u| u == username) {
            Role::Moderator
        } else {
            Role::User
        }
    }
}

impl Default for Moderators {
    fn default() -> Self {
        Self::new([DEFAULT_MODERATOR])
    }
}

/// Bootstrap usernames that have no account yet.
pub fn missing_moderators<'a>(
    db: &Database,
    moderators: &'a Moderators,
) -> anyhow::Result<Vec<&'a str>> {
    let mut missing = Vec::new();
    for username in moderators.usernames() {
        if db.get_user_by_username(username)?.is_none() {
            missing.push(username.as_str());
        }
    }
    Ok(missing)
}

/// Create every bootstrap moderator that does not exist yet, all sharing
/// `password`. Returns how many accounts were created.
pub fn seed_moderators(
    db: &Database,
    moderators: &Moderators,
    password: &str,
) -> anyhow::Result<usize> {
    let password_hash = hash_password(password)?;
    let mut created = 0;
    for username in moderators.usernames() {
        if db.seed_moderator(username, &password_hash)? {
            created += 1;
        }
    }
    Ok(created)
}

/// Reject unless `mod_id` names an existing moderator account.
fn require_moderator(state: &AppStateInner, mod_id: Option<i64>) -> ApiResult<i64> {
    let role = match mod_id {
        Some(id) => state.db.get_user_role(id)?,
        None => None,
    };
    match (mod_id, role) {
        (Some(id), Some(Role::Moderator)) => Ok(id),
        _ => {
            warn!("Rejected moderator action from {:?}", mod_id);
            Err(ApiError::NotAllowed)
        }
    }
}

/// POST /api/settitle
pub async fn set_title(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SetTitleRequest>,
) -> ApiResult<impl IntoResponse> {
    blocking(&state, move |state| {
        let mod_id = require_moderator(state, req.mod_id)?;
        state
            .db
            .update_user_title(req.username.as_deref(), req.title.as_deref())?;
        info!(
            "Moderator {} set title of {:?} to {:?}",
            mod_id, req.username, req.title
        );
        Ok(())
    })
    .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/deletereview
pub async fn delete_review(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DeleteReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    blocking(&state, move |state| {
        let mod_id = require_moderator(state, req.mod_id)?;
        state.db.delete_review(req.review_id)?;
        info!("Moderator {} deleted review {:?}", mod_id, req.review_id);
        Ok(())
    })
    .await?;

    Ok(Json(SuccessResponse::ok()))
}
