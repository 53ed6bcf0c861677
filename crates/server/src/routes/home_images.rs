use axum::{extract::{Multipart, Path, State}, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::{ApiError, ErrorStyle};
use crate::routes::collect_upload;
use crate::routes::gallery::ReorderBody;
use crate::state::ServerState;

fn to_public(m: &models::home_image::Model) -> serde_json::Value {
    serde_json::json!({
        "id": m.id,
        "url": m.image_url,
        "caption": m.caption,
        "order": m.display_order,
    })
}

/// `POST /api/home-images`: `image` part plus optional `caption` and
/// `display_order` fields.
pub async fn upload(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (file, fields) = collect_upload(multipart).await?;
    let Some(file) = file else {
        return Err(ApiError::asset(StatusCode::BAD_REQUEST, "No image"));
    };
    let caption = fields.get("caption").map(String::as_str).unwrap_or("");
    let display_order = fields
        .get("display_order")
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(0);
    let row = state
        .assets
        .upload_home(file, caption, display_order)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "url": row.image_url,
        "public_id": row.public_id,
        "id": row.id,
    })))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<serde_json::Value>, ApiError> {
    let rows = state
        .assets
        .list_home()
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Plain, e))?;
    Ok(Json(serde_json::Value::Array(rows.iter().map(to_public).collect())))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state
        .assets
        .delete_home(id)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    if !existed {
        return Err(ApiError::asset(StatusCode::NOT_FOUND, "Image not found"));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
pub struct OrderBody {
    pub display_order: i32,
}

/// `PUT /api/home-images/{id}/order`: single-row position update kept from
/// the original dashboard.
pub async fn set_order(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(body): Json<OrderBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state
        .assets
        .set_home_order(id, body.display_order)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    if !existed {
        return Err(ApiError::asset(StatusCode::NOT_FOUND, "Image not found"));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn reorder(
    State(state): State<ServerState>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .assets
        .reorder_home(&body.ids)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
