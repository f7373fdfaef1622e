use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{patch, post},
    Json, Router,
};
use database::models::{BoardItem, ItemKind};
use database::repositories::ItemRepository;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use super::ServiceError;
use crate::services::items::{self, ItemPatch, ItemUpdate, NewItemInput};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boards/:id/items", post(create_item))
        .route("/boards/:id/items/:item_id", patch(update_item))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub kind: ItemKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub color_hex: Option<String>,
    pub meta: Option<JsonValue>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
    pub created_by: Option<Uuid>,
}

async fn create_item(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(body): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<BoardItem>), ServiceError> {
    check_length("title", body.title.as_deref(), 120)?;
    check_length("description", body.description.as_deref(), 400)?;
    check_length("contentUrl", body.content_url.as_deref(), 500)?;
    if let Some(url) = &body.content_url {
        validate_content_url(url)?;
    }
    let color_hex = body.color_hex.as_deref().map(normalize_hex).transpose()?;

    let input = NewItemInput {
        kind: body.kind,
        title: body.title,
        description: body.description,
        content_url: body.content_url,
        color_hex,
        meta: body.meta.unwrap_or_else(|| json!({})),
        pos_x: body.pos_x.unwrap_or(0.0),
        pos_y: body.pos_y.unwrap_or(0.0),
        rotation: body.rotation.unwrap_or(0.0),
        z_index: body.z_index.unwrap_or(0),
        created_by: body.created_by,
    };

    let repo = ItemRepository::new(state.db.pool.clone());
    let item = items::create_item(&repo, board_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
}

async fn update_item(
    State(state): State<AppState>,
    Path((board_id, item_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Response, ServiceError> {
    check_length("title", body.title.as_ref().and_then(|t| t.as_deref()), 120)?;
    check_length(
        "description",
        body.description.as_ref().and_then(|d| d.as_deref()),
        400,
    )?;

    let patch = ItemPatch {
        title: body.title,
        description: body.description,
        pos_x: body.pos_x,
        pos_y: body.pos_y,
        rotation: body.rotation,
        z_index: body.z_index,
    };

    let repo = ItemRepository::new(state.db.pool.clone());
    match items::update_item(&repo, board_id, item_id, patch).await? {
        ItemUpdate::Noop => Ok(Json(json!({ "ok": true })).into_response()),
        ItemUpdate::Updated(item) => Ok(Json(item).into_response()),
        ItemUpdate::NotFound => Err(ServiceError::NotFound("Item not found".to_string())),
    }
}

/// Distinguishes an absent field from an explicit null: this runs only when
/// the key is present, so present-but-null becomes `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), ServiceError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ServiceError::BadRequest(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

fn validate_content_url(url: &str) -> Result<(), ServiceError> {
    let uri: Uri = url
        .parse()
        .map_err(|_| ServiceError::BadRequest("contentUrl must be a valid URL".to_string()))?;
    match uri.scheme_str() {
        Some("http") | Some("https") => Ok(()),
        _ => Err(ServiceError::BadRequest(
            "contentUrl must be an http(s) URL".to_string(),
        )),
    }
}

fn normalize_hex(hex: &str) -> Result<String, ServiceError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(format!("#{digits}"))
    } else {
        Err(ServiceError::BadRequest(
            "colorHex must be a 6-digit hex color".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_gain_a_leading_hash() {
        assert_eq!(normalize_hex("aabbcc").unwrap(), "#aabbcc");
        assert_eq!(normalize_hex("#AABBCC").unwrap(), "#AABBCC");
        assert!(normalize_hex("abc").is_err());
        assert!(normalize_hex("#12345g").is_err());
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: UpdateItemRequest = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(patch.title, Some(None));
        assert!(patch.description.is_none());

        let patch: UpdateItemRequest =
            serde_json::from_str(r#"{"title": "Dusk", "posX": 4.5}"#).unwrap();
        assert_eq!(patch.title, Some(Some("Dusk".to_string())));
        assert_eq!(patch.pos_x, Some(4.5));
    }

    #[test]
    fn content_urls_must_be_http() {
        assert!(validate_content_url("https://example.com/a.png").is_ok());
        assert!(validate_content_url("ftp://example.com/a.png").is_err());
        assert!(validate_content_url("not a url").is_err());
    }
}
