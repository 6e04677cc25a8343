//! Handlers for the `/goals/board` resource.
//!
//! Visibility comes from the scoped repository lookups (404 when the caller
//! is not a participant); role checks come from the permission predicate
//! (403).

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::error::CoreError;
use goalboard_core::permissions::{require, Access};
use goalboard_core::status::BoardRole;
use goalboard_core::types::DbId;
use goalboard_core::validation::{validate_assignable_role, validate_title};
use goalboard_db::models::board::{Board, BoardDetail, CreateBoard, ParticipantInput, UpdateBoard};
use goalboard_db::models::page::Page;
use goalboard_db::repositories::{BoardRepo, ParticipantRepo, UserRepo};
use goalboard_db::DbPool;

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::BoardListQuery;
use crate::state::AppState;

/// POST /api/v1/goals/board/create
///
/// The caller becomes the board's owner.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBoard>,
) -> AppResult<(StatusCode, Json<BoardDetail>)> {
    validate_title(&input.title)?;

    let board = BoardRepo::create(&state.pool, auth.user_id, &input.title).await?;
    tracing::info!(
        board_id = board.id,
        user_id = auth.user_id,
        username = %auth.username,
        "Board created"
    );

    let detail = with_participants(&state.pool, board).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/goals/board/list
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BoardListQuery>,
) -> AppResult<Json<Page<Board>>> {
    let page = BoardRepo::list_for_user(&state.pool, auth.user_id, &query.into_params()).await?;
    Ok(Json(page))
}

/// GET /api/v1/goals/board/{id}
pub async fn retrieve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<BoardDetail>> {
    let board = find_visible(&state.pool, id, auth.user_id).await?;
    Ok(Json(with_participants(&state.pool, board).await?))
}

/// PUT /api/v1/goals/board/{id}
///
/// Writers may rename the board; only the owner may replace participants.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBoard>,
) -> AppResult<Json<BoardDetail>> {
    find_visible(&state.pool, id, auth.user_id).await?;
    let role = ParticipantRepo::role_for_board(&state.pool, id, auth.user_id).await?;
    require(role, Access::Write)?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let participants = match &input.participants {
        Some(entries) => {
            require(role, Access::Own)?;
            Some(resolve_participants(&state.pool, entries).await?)
        }
        None => None,
    };

    let board = BoardRepo::update(
        &state.pool,
        id,
        input.title.as_deref(),
        participants.as_deref(),
    )
    .await?
    .ok_or_else(|| not_found("Board", id))?;

    tracing::info!(
        board_id = id,
        user_id = auth.user_id,
        username = %auth.username,
        participants_replaced = participants.is_some(),
        "Board updated"
    );
    Ok(Json(with_participants(&state.pool, board).await?))
}

/// DELETE /api/v1/goals/board/{id}
///
/// Owner only. Soft-deletes the board, its categories and archives their
/// goals in one transaction; responds with the deleted board.
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Board>> {
    find_visible(&state.pool, id, auth.user_id).await?;
    let role = ParticipantRepo::role_for_board(&state.pool, id, auth.user_id).await?;
    require(role, Access::Own)?;

    let board = BoardRepo::soft_delete_cascade(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Board", id))?;

    tracing::info!(
        board_id = id,
        user_id = auth.user_id,
        username = %auth.username,
        "Board destroyed"
    );
    Ok(Json(board))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_visible(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Board> {
    BoardRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or_else(|| not_found("Board", id))
}

async fn with_participants(pool: &DbPool, board: Board) -> AppResult<BoardDetail> {
    let participants = ParticipantRepo::list_for_board(pool, board.id).await?;
    Ok(BoardDetail {
        board,
        participants,
    })
}

/// Map `{user: username, role}` entries to `(user_id, role)` pairs.
///
/// Owner cannot be assigned, every username must exist and appear once.
async fn resolve_participants(
    pool: &DbPool,
    entries: &[ParticipantInput],
) -> AppResult<Vec<(DbId, BoardRole)>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut resolved = Vec::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.user.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "User '{}' is listed more than once",
                entry.user
            ))));
        }
        let role = validate_assignable_role(entry.role)?;
        let user = UserRepo::find_by_username(pool, &entry.user)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "User '{}' does not exist",
                    entry.user
                )))
            })?;
        resolved.push((user.id, role));
    }
    Ok(resolved)
}
