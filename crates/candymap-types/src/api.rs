use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

// -- Auth --

/// Fields are optional so that a missing field is a validation error
/// rather than a JSON rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// -- Houses --

/// JSON form of a pin drop. The multipart form uses the same field names.
#[derive(Debug, Default, Deserialize)]
pub struct CreateHouseRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<String>,
    #[serde(rename = "glutenFree", default, deserialize_with = "flag")]
    pub gluten_free: bool,
    #[serde(rename = "sugarFree", default, deserialize_with = "flag")]
    pub sugar_free: bool,
    #[serde(rename = "lactoseFree", default, deserialize_with = "flag")]
    pub lactose_free: bool,
    pub other: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<i64>,
}

/// Spellings accepted for a dietary flag, in JSON strings and form fields.
pub fn parse_flag_word(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "off" | "no" => Some(false),
        "1" | "true" | "on" | "yes" => Some(true),
        _ => None,
    }
}

/// Booleans, numbers (non-zero is true), flag words, and null (false).
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, a number, or a yes/no string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        Ok(v != 0)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        Ok(v != 0)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
        Ok(v != 0.0)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        parse_flag_word(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_none<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHouseResponse {
    pub id: i64,
}

// -- Reviews --

#[derive(Debug, Default, Deserialize)]
pub struct CreateReviewRequest {
    pub house_id: Option<i64>,
    pub user_id: Option<i64>,
    pub review: Option<String>,
}

// -- Moderation --

#[derive(Debug, Default, Deserialize)]
pub struct SetTitleRequest {
    pub mod_id: Option<i64>,
    pub username: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteReviewRequest {
    pub mod_id: Option<i64>,
    pub review_id: Option<i64>,
}

// -- Shared responses --

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
