use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use axum::middleware;
use common::types::Health;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod admin;
pub mod bookings;
pub mod gallery;
pub mod home_images;
pub mod site_assets;

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::http::StatusCode;
use service::assets::domain::UploadedFile;

use crate::errors::ApiError;

/// Drain a multipart form into the single `image` file plus its text
/// fields. The whole file is buffered in memory before storage sees it.
pub(crate) async fn collect_upload(
    mut multipart: Multipart,
) -> Result<(Option<UploadedFile>, HashMap<String, String>), ApiError> {
    let mut file = None;
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::asset(StatusCode::BAD_REQUEST, format!("malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or("upload.bin").to_string();
            let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::asset(StatusCode::BAD_REQUEST, format!("malformed upload: {e}")))?;
            file = Some(UploadedFile { name: file_name, content_type, bytes: bytes.to_vec() });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::asset(StatusCode::BAD_REQUEST, format!("malformed upload: {e}")))?;
            fields.insert(name, value);
        }
    }
    Ok((file, fields))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health(
    axum::extract::State(state): axum::extract::State<ServerState>,
) -> Json<Health> {
    Json(Health {
        status: "ok",
        whatsapp: state.whatsapp_number.clone(),
        storage: state.assets.backend_name(),
    })
}

/// Build the full application router: public site endpoints, the booking
/// intake, and the admin surface behind the session gate.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes: health, intake, read-only listings, login
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/book", post(bookings::create))
        .route("/api/gallery", get(gallery::list))
        .route("/api/home-images", get(home_images::list))
        .route("/api/site-assets", get(site_assets::list))
        .route("/admin_login", post(admin::login))
        .route("/logout", get(admin::logout));

    // Admin routes behind the session gate
    let gated = Router::new()
        .route("/api/bookings", get(bookings::list))
        .route("/api/bookings/:id/status", put(bookings::set_status))
        .route("/api/bookings/:id", delete(bookings::remove))
        .route("/api/upload", post(gallery::upload))
        // kept alias: some dashboard builds post straight to the collection
        .route("/api/gallery", post(gallery::upload))
        .route("/api/gallery/reorder", put(gallery::reorder))
        .route("/api/gallery/:public_id", delete(gallery::remove))
        .route("/api/home-images", post(home_images::upload))
        .route("/api/home-images/reorder", put(home_images::reorder))
        .route("/api/home-images/:id", delete(home_images::remove))
        .route("/api/home-images/:id/order", put(home_images::set_order))
        .route("/api/site-assets", post(site_assets::upsert))
        .route("/change_password", post(admin::change_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin::require_admin));

    public
        .merge(gated)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
