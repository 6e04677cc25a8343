//! Handlers for the `/goals/goal_category` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::permissions::{require, Access};
use goalboard_core::types::DbId;
use goalboard_core::validation::validate_title;
use goalboard_db::models::category::{Category, CreateCategory, UpdateCategory};
use goalboard_db::models::page::Page;
use goalboard_db::repositories::{CategoryRepo, ParticipantRepo};
use goalboard_db::DbPool;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::CategoryListQuery;
use crate::state::AppState;

/// POST /api/v1/goals/goal_category/create
///
/// Requires write access to a non-deleted board. A board the caller cannot
/// see is reported as 403, not 404.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_title(&input.title)?;
    let role = ParticipantRepo::role_for_board(&state.pool, input.board_id, auth.user_id).await?;
    require(role, Access::Write)?;

    let category = CategoryRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(
        category_id = category.id,
        board_id = category.board_id,
        user_id = auth.user_id,
        "Category created"
    );
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/goals/goal_category/list
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CategoryListQuery>,
) -> AppResult<Json<Page<Category>>> {
    let page = CategoryRepo::list_for_user(&state.pool, auth.user_id, &query.into_filter()).await?;
    Ok(Json(page))
}

/// GET /api/v1/goals/goal_category/{id}
pub async fn retrieve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    Ok(Json(find_visible(&state.pool, id, auth.user_id).await?))
}

/// PUT /api/v1/goals/goal_category/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    find_visible(&state.pool, id, auth.user_id).await?;
    let role = ParticipantRepo::role_for_category(&state.pool, id, auth.user_id).await?;
    require(role, Access::Write)?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("GoalCategory", id))?;
    tracing::info!(category_id = id, user_id = auth.user_id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/v1/goals/goal_category/{id}
///
/// Soft-deletes the category and archives its goals in one transaction;
/// responds with the deleted category.
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    find_visible(&state.pool, id, auth.user_id).await?;
    let role = ParticipantRepo::role_for_category(&state.pool, id, auth.user_id).await?;
    require(role, Access::Write)?;

    let category = CategoryRepo::soft_delete_cascade(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("GoalCategory", id))?;
    tracing::info!(category_id = id, user_id = auth.user_id, "Category destroyed");
    Ok(Json(category))
}

async fn find_visible(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Category> {
    CategoryRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or_else(|| not_found("GoalCategory", id))
}
