use axum::{extract::{Multipart, Path, State}, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::{ApiError, ErrorStyle};
use crate::routes::collect_upload;
use crate::state::ServerState;

fn to_public(m: &models::gallery_image::Model) -> serde_json::Value {
    serde_json::json!({
        "id": m.id,
        "url": m.image_url,
        "public_id": m.public_id,
        "caption": m.caption,
        "order": m.display_order,
    })
}

/// `POST /api/upload`: single `image` part plus an optional `caption`.
pub async fn upload(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (file, fields) = collect_upload(multipart).await?;
    let Some(file) = file else {
        return Err(ApiError::asset(StatusCode::BAD_REQUEST, "No image"));
    };
    let caption = fields.get("caption").map(String::as_str).unwrap_or("");
    let row = state
        .assets
        .upload_gallery(file, caption)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    Ok(Json(serde_json::json!({ "ok": true, "url": row.image_url, "public_id": row.public_id })))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<serde_json::Value>, ApiError> {
    let rows = state
        .assets
        .list_gallery()
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Plain, e))?;
    Ok(Json(serde_json::Value::Array(rows.iter().map(to_public).collect())))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(public_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state
        .assets
        .delete_gallery(&public_id)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    if !existed {
        return Err(ApiError::asset(StatusCode::NOT_FOUND, "Image not found"));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
    pub ids: Vec<i32>,
}

/// `PUT /api/gallery/reorder`: the body lists every image id in its target
/// position; the whole permutation applies or nothing does.
pub async fn reorder(
    State(state): State<ServerState>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .assets
        .reorder_gallery(&body.ids)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
