use axum::{extract::{Multipart, State}, http::StatusCode, Json};
use serde_json::{Map, Value};

use crate::errors::{ApiError, ErrorStyle};
use crate::routes::collect_upload;
use crate::state::ServerState;

/// `GET /api/site-assets`: map of asset type to its current image.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let rows = state
        .assets
        .list_site_assets()
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Plain, e))?;
    let mut assets = Map::new();
    for row in rows {
        assets.insert(
            row.asset_type,
            serde_json::json!({ "url": row.image_url, "alt_text": row.alt_text }),
        );
    }
    Ok(Json(Value::Object(assets)))
}

/// `POST /api/site-assets`: upsert keyed by `asset_type` (logo slot).
pub async fn upsert(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (file, fields) = collect_upload(multipart).await?;
    let Some(file) = file else {
        return Err(ApiError::asset(StatusCode::BAD_REQUEST, "No image"));
    };
    let Some(asset_type) = fields.get("asset_type").filter(|v| !v.trim().is_empty()) else {
        return Err(ApiError::asset(StatusCode::BAD_REQUEST, "Asset type required"));
    };
    let alt_text = fields.get("alt_text").map(String::as_str).unwrap_or("");
    let row = state
        .assets
        .upsert_site_asset(asset_type, alt_text, file)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Asset, e))?;
    Ok(Json(serde_json::json!({ "ok": true, "url": row.image_url, "public_id": row.public_id })))
}
