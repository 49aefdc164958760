//! Database row types — these map directly to SQLite rows.
//! Distinct from candymap-types API models to keep the DB layer independent.

use candymap_types::models::Role;

pub struct UserRow {
    pub id: i64,
    pub username: String,
    /// Password hash, never the plaintext.
    pub password: String,
    pub title: Option<String>,
    pub profile_pic: Option<String>,
    pub role: Role,
}

/// Columns a user row may have rewritten after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Title,
    ProfilePic,
}

impl UserField {
    pub(crate) fn column(&self) -> &'static str {
        match self {
            UserField::Title => "title",
            UserField::ProfilePic => "profile_pic",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct NewHouse {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<String>,
    pub gluten_free: bool,
    pub sugar_free: bool,
    pub lactose_free: bool,
    pub other: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<i64>,
    pub image: Option<String>,
}

/// House joined with its owner. Owner columns are NULL when the
/// referenced user does not exist.
pub struct HouseRow {
    pub id: i64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<String>,
    pub gluten_free: bool,
    pub sugar_free: bool,
    pub lactose_free: bool,
    pub other: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<i64>,
    pub image: Option<String>,
    pub owner_username: Option<String>,
    pub owner_title: Option<String>,
    pub owner_profile_pic: Option<String>,
}

pub struct ReviewRow {
    pub id: i64,
    pub house_id: Option<i64>,
    pub user_id: Option<i64>,
    pub review: Option<String>,
    pub author_username: Option<String>,
    pub author_title: Option<String>,
    pub author_profile_pic: Option<String>,
}
