pub mod account;
pub mod goals;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /core/signup                        signup (public)
/// /core/login                         login (public)
/// /core/profile                       current user
///
/// /goals/board/...                    boards and participants
/// /goals/goal_category/...            categories
/// /goals/goal/...                     goals
/// /goals/goal_comment/...             comments
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/core", account::router())
        .nest("/goals", goals::router())
}
