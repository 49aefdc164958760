use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use tracing::info;

use candymap_db::models::ReviewRow;
use candymap_types::api::{CreateReviewRequest, SuccessResponse};
use candymap_types::models::Review;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::{AppState, blocking};

/// POST /api/reviews — any caller may post; ids are taken on trust.
pub async fn create_review(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = blocking(&state, move |state| {
        Ok(state
            .db
            .create_review(req.house_id, req.user_id, req.review.as_deref())?)
    })
    .await?;

    info!("Review {} created", id);
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/reviews/{house_id}
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(house_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Review>>> {
    let rows = blocking(&state, move |state| {
        Ok(state.db.list_reviews_for_house(house_id)?)
    })
    .await?;

    Ok(Json(rows.into_iter().map(review_from_row).collect()))
}

fn review_from_row(row: ReviewRow) -> Review {
    Review {
        id: row.id,
        house_id: row.house_id,
        user_id: row.user_id,
        review: row.review,
        username: row.author_username,
        title: row.author_title,
        profile_pic: row.author_profile_pic,
    }
}
