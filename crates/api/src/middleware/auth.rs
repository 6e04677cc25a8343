//! Bearer-token extractor shared by the `/goals/*` handlers and
//! `/core/profile`.
//!
//! The token only proves identity. Board roles are looked up per request
//! by the handlers, so a role change takes effect without reissuing tokens.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use goalboard_core::error::CoreError;
use goalboard_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind `Authorization: Bearer <access_token>`.
///
/// Rejects with 401 `UNAUTHORIZED` before the handler runs when the header
/// is missing, malformed, expired or signed with another secret.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `users.id`, matched against `board_participants.user_id` and the
    /// author of comments.
    pub user_id: DbId,
    /// Username at token issue time, used in board mutation logs.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}
