use std::sync::Arc;

use tracing::error;

use candymap_db::Database;

use crate::error::{ApiError, ApiResult};
use crate::moderation::Moderators;
use crate::uploads::Storage;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub storage: Storage,
    pub moderators: Moderators,
}

/// Run blocking work (SQLite statements, password hashing) off the async
/// runtime. The statement completes before the handler builds its response.
pub async fn blocking<F, T>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&AppStateInner) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })?
}
