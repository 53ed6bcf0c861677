use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::Deserialize;

use service::booking::domain::BookingInput;

use crate::errors::{ApiError, ErrorStyle};
use crate::state::ServerState;

/// Dashboard listing cap inherited from the original admin API.
pub const BOOKINGS_LIST_LIMIT: u64 = 100;

#[utoipa::path(post, path = "/api/book", tag = "booking",
    request_body = crate::openapi::BookingRequestDoc,
    responses((status = 200, description = "Booking stored"), (status = 400, description = "Validation failed")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<BookingInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let receipt = state
        .bookings
        .intake(input)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Booking, e))?;
    Ok(Json(serde_json::json!({
        "success": true,
        "booking_id": receipt.booking_id,
        "wa_link": receipt.wa_link,
        "message": "Booking confirmed!",
    })))
}

#[utoipa::path(get, path = "/api/bookings", tag = "booking",
    responses((status = 200, description = "Newest bookings, capped at 100"), (status = 401, description = "No session")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<serde_json::Value>, ApiError> {
    let bookings = state
        .bookings
        .list_recent(BOOKINGS_LIST_LIMIT)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Plain, e))?;
    Ok(Json(serde_json::json!({ "bookings": bookings })))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

#[utoipa::path(put, path = "/api/bookings/{id}/status", tag = "booking",
    request_body = crate::openapi::StatusBodyDoc,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "No such booking"),
        (status = 409, description = "Transition not allowed"),
    ))]
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(body): Json<StatusBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .bookings
        .transition(id, &body.status)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Plain, e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state
        .bookings
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(ErrorStyle::Plain, e))?;
    if !existed {
        return Err(ApiError::plain(StatusCode::NOT_FOUND, format!("booking {id} not found")));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}
