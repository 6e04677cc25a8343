//! Route definitions for the `/core` account endpoints (signup, login, profile).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/core`.
///
/// ```text
/// POST   /signup     -> signup (public)
/// POST   /login      -> login (public)
/// GET    /profile    -> profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/profile", get(auth::profile))
}
