use std::str::FromStr;

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
};
use tracing::info;

use candymap_db::models::{HouseRow, NewHouse};
use candymap_types::api::{CreateHouseRequest, CreateHouseResponse, parse_flag_word};
use candymap_types::models::House;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::{AppState, blocking};
use crate::uploads::UploadedFile;

/// Pin-drop body: multipart form (browser client, optional `image` part)
/// or plain JSON with the same field names.
pub struct HouseForm {
    pub house: CreateHouseRequest,
    pub image: Option<UploadedFile>,
}

impl<S> FromRequest<S> for HouseForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let ApiJson(house) = ApiJson::<CreateHouseRequest>::from_request(req, state).await?;
            return Ok(Self { house, image: None });
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let mut house = CreateHouseRequest::default();
        let mut image = None;

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name == "image" {
                if image.is_none() {
                    image = UploadedFile::from_field(field).await?;
                }
                continue;
            }
            let value = field.text().await?;
            apply_form_field(&mut house, &name, &value)?;
        }

        Ok(Self { house, image })
    }
}

fn apply_form_field(house: &mut CreateHouseRequest, name: &str, value: &str) -> ApiResult<()> {
    match name {
        "lat" => house.lat = parse_number(name, value)?,
        "lng" => house.lng = parse_number(name, value)?,
        "user_id" => house.user_id = parse_number(name, value)?,
        "glutenFree" => house.gluten_free = parse_flag(name, value)?,
        "sugarFree" => house.sugar_free = parse_flag(name, value)?,
        "lactoseFree" => house.lactose_free = parse_flag(name, value)?,
        "rating" => house.rating = Some(value.to_string()),
        "other" => house.other = Some(value.to_string()),
        "description" => house.description = Some(value.to_string()),
        _ => {}
    }
    Ok(())
}

/// Blank means absent.
fn parse_number<T: FromStr>(name: &str, value: &str) -> ApiResult<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ApiError::validation(format!("Invalid {}", name)))
}

fn parse_flag(name: &str, value: &str) -> ApiResult<bool> {
    parse_flag_word(value).ok_or_else(|| ApiError::validation(format!("Invalid {}", name)))
}

/// POST /api/houses
///
/// The image is written before the row is inserted; if the insert fails
/// the file stays on disk.
pub async fn create_house(
    State(state): State<AppState>,
    form: HouseForm,
) -> ApiResult<impl IntoResponse> {
    let image = match form.image {
        Some(file) => Some(state.storage.store(&file.bytes, &file.file_name).await?),
        None => None,
    };

    let req = form.house;
    let new_house = NewHouse {
        lat: req.lat,
        lng: req.lng,
        rating: req.rating,
        gluten_free: req.gluten_free,
        sugar_free: req.sugar_free,
        lactose_free: req.lactose_free,
        other: req.other,
        description: req.description,
        user_id: req.user_id,
        image,
    };

    let id = blocking(&state, move |state| Ok(state.db.create_house(&new_house)?)).await?;

    info!("House {} created", id);
    Ok(Json(CreateHouseResponse { id }))
}

/// GET /api/houses
pub async fn list_houses(State(state): State<AppState>) -> ApiResult<Json<Vec<House>>> {
    let rows = blocking(&state, |state| Ok(state.db.list_houses()?)).await?;
    Ok(Json(rows.into_iter().map(house_from_row).collect()))
}

fn house_from_row(row: HouseRow) -> House {
    House {
        id: row.id,
        lat: row.lat,
        lng: row.lng,
        rating: row.rating,
        gluten_free: row.gluten_free,
        sugar_free: row.sugar_free,
        lactose_free: row.lactose_free,
        other: row.other,
        description: row.description,
        user_id: row.user_id,
        image: row.image,
        username: row.owner_username,
        title: row.owner_title,
        profile_pic: row.owner_profile_pic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_parse_into_request() {
        let mut house = CreateHouseRequest::default();
        apply_form_field(&mut house, "lat", "40.7128").unwrap();
        apply_form_field(&mut house, "lng", " -74.006 ").unwrap();
        apply_form_field(&mut house, "user_id", "3").unwrap();
        apply_form_field(&mut house, "sugarFree", "On").unwrap();
        apply_form_field(&mut house, "rating", "bag").unwrap();
        apply_form_field(&mut house, "unexpected", "ignored").unwrap();

        assert_eq!(house.lat, Some(40.7128));
        assert_eq!(house.lng, Some(-74.006));
        assert_eq!(house.user_id, Some(3));
        assert!(house.sugar_free);
        assert!(!house.gluten_free);
        assert_eq!(house.rating.as_deref(), Some("bag"));
    }

    #[test]
    fn blank_numbers_are_absent() {
        assert_eq!(parse_number::<f64>("lat", "  ").unwrap(), None);
    }

    #[test]
    fn bad_numbers_name_the_field() {
        let err = parse_number::<f64>("lat", "north").unwrap_err();
        assert_eq!(err.to_string(), "Invalid lat");
    }

    #[test]
    fn flags_accept_common_spellings() {
        for yes in ["1", "true", "TRUE", "on", "yes"] {
            assert!(parse_flag("glutenFree", yes).unwrap(), "{yes}");
        }
        for no in ["", "0", "false", "off", "no"] {
            assert!(!parse_flag("glutenFree", no).unwrap(), "{no}");
        }
        assert!(parse_flag("glutenFree", "maybe").is_err());
    }
}
