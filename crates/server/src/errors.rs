use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Which error envelope the endpoint family speaks. The booking API reports
/// `{"success": false, ...}`, the asset API `{"ok": false, ...}`, everything
/// else a bare `{"error": ...}`.
#[derive(Debug, Clone, Copy)]
pub enum ErrorStyle {
    Booking,
    Asset,
    Plain,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    style: ErrorStyle,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, style: ErrorStyle, message: impl Into<String>) -> Self {
        Self { status, style, message: message.into() }
    }

    pub fn booking(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, ErrorStyle::Booking, message)
    }

    pub fn asset(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, ErrorStyle::Asset, message)
    }

    pub fn plain(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, ErrorStyle::Plain, message)
    }

    /// Map a service failure to a response. Validation details go back to
    /// the caller; storage/database causes are logged and replaced with a
    /// generic message.
    pub fn from_service(style: ErrorStyle, err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, style, msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, style, msg),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, style, msg),
            ServiceError::Storage(msg) => {
                error!(error = %msg, "storage error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, style, "Upload failed")
            }
            ServiceError::Db(msg) => {
                error!(error = %msg, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, style, "Database error")
            }
        }
    }

    /// Auth failures collapse to 401 for anything credential-shaped.
    pub fn from_auth(err: AuthError) -> Self {
        let code = err.code();
        match err {
            AuthError::Validation(msg) => Self::plain(StatusCode::BAD_REQUEST, msg),
            AuthError::Unauthorized | AuthError::NotFound => {
                Self::plain(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            AuthError::TokenError(msg) => {
                error!(code, error = %msg, "token rejected");
                Self::plain(StatusCode::UNAUTHORIZED, "Invalid or expired session")
            }
            AuthError::HashError(msg) | AuthError::Repository(msg) => {
                error!(code, error = %msg, "auth backend error");
                Self::plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.style {
            ErrorStyle::Booking => serde_json::json!({"success": false, "error": self.message}),
            ErrorStyle::Asset => serde_json::json!({"ok": false, "error": self.message}),
            ErrorStyle::Plain => serde_json::json!({"error": self.message}),
        };
        (self.status, Json(body)).into_response()
    }
}
