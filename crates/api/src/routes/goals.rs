//! Route definitions for the `/goals` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{board, category, comment, goal};
use crate::state::AppState;

/// Routes mounted at `/goals`. Every resource has the same shape:
///
/// ```text
/// POST   /{resource}/create   -> create
/// GET    /{resource}/list     -> list
/// GET    /{resource}/{id}     -> retrieve
/// PUT    /{resource}/{id}     -> update
/// DELETE /{resource}/{id}     -> destroy
/// ```
///
/// where `{resource}` is `board`, `goal_category`, `goal` or `goal_comment`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/board/create", post(board::create))
        .route("/board/list", get(board::list))
        .route(
            "/board/{id}",
            get(board::retrieve).put(board::update).delete(board::destroy),
        )
        .route("/goal_category/create", post(category::create))
        .route("/goal_category/list", get(category::list))
        .route(
            "/goal_category/{id}",
            get(category::retrieve)
                .put(category::update)
                .delete(category::destroy),
        )
        .route("/goal/create", post(goal::create))
        .route("/goal/list", get(goal::list))
        .route(
            "/goal/{id}",
            get(goal::retrieve).put(goal::update).delete(goal::destroy),
        )
        .route("/goal_comment/create", post(comment::create))
        .route("/goal_comment/list", get(comment::list))
        .route(
            "/goal_comment/{id}",
            get(comment::retrieve)
                .put(comment::update)
                .delete(comment::destroy),
        )
}
