pub mod auth;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod houses;
pub mod moderation;
pub mod reviews;
pub mod state;
pub mod uploads;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// All JSON endpoints, mounted under `/api`. Static files are the
/// server's concern.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profilepic/{id}", post(users::upload_profile_pic))
        .route("/houses", get(houses::list_houses).post(houses::create_house))
        .route("/reviews", post(reviews::create_review))
        .route("/reviews/{house_id}", get(reviews::list_reviews))
        .route("/settitle", post(moderation::set_title))
        .route("/deletereview", post(moderation::delete_review))
        .with_state(state);

    Router::new().nest("/api", api)
}
