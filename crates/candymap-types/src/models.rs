use serde::{Deserialize, Serialize};

/// Account role. Only bootstrap moderators ever hold `Moderator`; clients
/// can never choose their own role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
        }
    }

    /// Anything other than the literal `moderator` is an ordinary user.
    pub fn parse(s: &str) -> Self {
        match s {
            "moderator" => Role::Moderator,
            _ => Role::User,
        }
    }
}

/// The logged-in user as the client keeps it in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub title: Option<String>,
    pub profile_pic: Option<String>,
}

/// A pin on the map, joined with whoever dropped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: i64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<String>,
    #[serde(rename = "glutenFree")]
    pub gluten_free: bool,
    #[serde(rename = "sugarFree")]
    pub sugar_free: bool,
    #[serde(rename = "lactoseFree")]
    pub lactose_free: bool,
    pub other: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<i64>,
    pub image: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
    pub profile_pic: Option<String>,
}

/// A review joined with its author's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub house_id: Option<i64>,
    pub user_id: Option<i64>,
    pub review: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
    pub profile_pic: Option<String>,
}
