use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use tracing::info;

use candymap_db::models::UserField;
use candymap_types::api::UploadResponse;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiPath;
use crate::state::{AppState, blocking};
use crate::uploads::UploadedFile;

/// POST /api/profilepic/{id} — multipart, file part named `file`.
///
/// The id comes from the URL and is trusted as-is; there is no session to
/// check it against.
pub async fn upload_profile_pic(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") && upload.is_none() {
            upload = UploadedFile::from_field(field).await?;
        }
    }
    let upload = upload.ok_or_else(|| ApiError::validation("Missing file"))?;

    let path = state
        .storage
        .store(&upload.bytes, &upload.file_name)
        .await?;

    let stored = path.clone();
    blocking(&state, move |state| {
        Ok(state
            .db
            .update_user_field(id, UserField::ProfilePic, Some(&stored))?)
    })
    .await?;

    info!("User {} profile picture set to {}", id, path);
    Ok(Json(UploadResponse {
        success: true,
        path,
    }))
}
