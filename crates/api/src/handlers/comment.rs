//! Handlers for the `/goals/goal_comment` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::permissions::{require, require_author, Access};
use goalboard_core::types::DbId;
use goalboard_core::validation::validate_comment_text;
use goalboard_db::models::comment::{Comment, CreateComment, UpdateComment};
use goalboard_db::models::page::Page;
use goalboard_db::repositories::{CommentRepo, ParticipantRepo};
use goalboard_db::DbPool;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::CommentListQuery;
use crate::state::AppState;

/// POST /api/v1/goals/goal_comment/create
///
/// Requires write access to the board of a non-archived goal.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    validate_comment_text(&input.text)?;
    let role = ParticipantRepo::role_for_goal(&state.pool, input.goal_id, auth.user_id).await?;
    require(role, Access::Write)?;

    let comment = CommentRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(
        comment_id = comment.id,
        goal_id = comment.goal_id,
        user_id = auth.user_id,
        "Comment created"
    );
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/goals/goal_comment/list
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CommentListQuery>,
) -> AppResult<Json<Page<Comment>>> {
    let page = CommentRepo::list_for_user(&state.pool, auth.user_id, &query.into_filter()).await?;
    Ok(Json(page))
}

/// GET /api/v1/goals/goal_comment/{id}
pub async fn retrieve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Comment>> {
    Ok(Json(find_visible(&state.pool, id, auth.user_id).await?))
}

/// PUT /api/v1/goals/goal_comment/{id}
///
/// Author only.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<Comment>> {
    let comment = find_visible(&state.pool, id, auth.user_id).await?;
    require_author(comment.user_id, auth.user_id)?;
    if let Some(text) = &input.text {
        validate_comment_text(text)?;
    }

    let comment = CommentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("GoalComment", id))?;
    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment updated");
    Ok(Json(comment))
}

/// DELETE /api/v1/goals/goal_comment/{id}
///
/// Author only. Removes the row; responds 204.
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = find_visible(&state.pool, id, auth.user_id).await?;
    require_author(comment.user_id, auth.user_id)?;

    if !CommentRepo::delete(&state.pool, id).await? {
        return Err(not_found("GoalComment", id));
    }
    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_visible(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Comment> {
    CommentRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or_else(|| not_found("GoalComment", id))
}
