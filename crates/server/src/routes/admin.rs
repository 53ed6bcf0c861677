use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use service::auth::domain::{AdminClaims, ChangePasswordInput, LoginInput};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Session cookie carrying the signed admin token.
pub const ADMIN_COOKIE: &str = "admin_token";

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(ADMIN_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/admin_login", tag = "admin",
    request_body = crate::openapi::LoginRequestDoc,
    responses((status = 200, description = "Session cookie set"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    let token = state.auth.login(input).await.map_err(ApiError::from_auth)?;
    let jar = jar.add(session_cookie(token));
    Ok((jar, Json(serde_json::json!({ "ok": true }))))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(Cookie::from(ADMIN_COOKIE));
    (jar, Json(serde_json::json!({ "ok": true })))
}

/// `POST /change_password`: re-verifies the old password and persists the
/// new hash; the acting admin comes from the session claims.
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(claims): Extension<AdminClaims>,
    Json(input): Json<ChangePasswordInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .auth
        .change_password(&claims.sub, input)
        .await
        .map_err(ApiError::from_auth)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Middleware: every admin route requires a valid, unexpired session token.
/// The verified claims are stashed in request extensions for handlers.
pub async fn require_admin(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(ADMIN_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::plain(StatusCode::UNAUTHORIZED, "Authentication required"))?;
    let claims = state.auth.verify_token(&token).map_err(ApiError::from_auth)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
