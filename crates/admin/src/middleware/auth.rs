//! Authentication middleware and extractors for admin.
//!
//! Admin accounts are regular users with the admin role, created through
//! the CLI - there is no built-in credential pair. The session token is the
//! same opaque-cookie mechanism the storefront uses; the extractor
//! additionally enforces the role.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use boostline_core::types::SessionToken;
use boostline_core::user::User;

use crate::state::AppState;

/// Session cookie name (shared with the storefront - one login, role-gated
/// surfaces).
pub const SESSION_COOKIE_NAME: &str = "bl_session";

/// Session lifetime in days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Build the session cookie for a freshly issued token.
#[must_use]
pub fn session_cookie(token: &SessionToken) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Build the removal cookie used at logout.
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Read the session token from the request's cookies.
pub(crate) fn session_token(parts: &Parts) -> Option<SessionToken> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| SessionToken::from_raw(c.value()))
}

/// Extractor that requires admin authentication.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdminAuth(admin): RequireAdminAuth) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdminAuth(pub User);

/// Error returned when admin authentication fails.
pub enum AdminAuthRejection {
    /// No valid session.
    Unauthorized,
    /// Valid session, but not an admin account.
    Forbidden,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "login required", "redirect": "/auth/login" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "admin access required" })),
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(AdminAuthRejection::Unauthorized)?;
        let record = state
            .store()
            .sessions()
            .get(&token)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        if !record.user.role.is_admin() {
            return Err(AdminAuthRejection::Forbidden);
        }

        Ok(Self(record.user))
    }
}
