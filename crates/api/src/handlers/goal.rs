//! Handlers for the `/goals/goal` resource.
//!
//! Destroy archives; archived goals disappear from every read here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::permissions::{require, Access};
use goalboard_core::types::DbId;
use goalboard_core::validation::{
    validate_new_goal_status, validate_priority, validate_status, validate_title,
};
use goalboard_db::models::goal::{CreateGoal, Goal, UpdateGoal};
use goalboard_db::models::page::Page;
use goalboard_db::repositories::{GoalRepo, ParticipantRepo};
use goalboard_db::DbPool;

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::GoalListQuery;
use crate::state::AppState;

/// POST /api/v1/goals/goal/create
///
/// Requires write access to the category's board. Status defaults to
/// to_do and may not be archived; priority defaults to medium.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateGoal>,
) -> AppResult<(StatusCode, Json<Goal>)> {
    validate_title(&input.title)?;
    let status = validate_new_goal_status(input.status)?;
    let priority = validate_priority(input.priority)?.unwrap_or_default();

    let role =
        ParticipantRepo::role_for_category(&state.pool, input.category_id, auth.user_id).await?;
    require(role, Access::Write)?;

    let goal = GoalRepo::create(&state.pool, auth.user_id, &input, status, priority).await?;
    tracing::info!(
        goal_id = goal.id,
        category_id = goal.category_id,
        user_id = auth.user_id,
        "Goal created"
    );
    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/v1/goals/goal/list
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<GoalListQuery>,
) -> AppResult<Json<Page<Goal>>> {
    let filter = query.into_filter()?;
    let page = GoalRepo::list_for_user(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(page))
}

/// GET /api/v1/goals/goal/{id}
pub async fn retrieve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Goal>> {
    Ok(Json(find_visible(&state.pool, id, auth.user_id).await?))
}

/// PUT /api/v1/goals/goal/{id}
///
/// Moving the goal to another category also requires write access to the
/// target category's board.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGoal>,
) -> AppResult<Json<Goal>> {
    let current = find_visible(&state.pool, id, auth.user_id).await?;
    let role = ParticipantRepo::role_for_goal(&state.pool, id, auth.user_id).await?;
    require(role, Access::Write)?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    validate_status(input.status)?;
    validate_priority(input.priority)?;

    if let Some(target) = input.category_id.filter(|&c| c != current.category_id) {
        let target_role =
            ParticipantRepo::role_for_category(&state.pool, target, auth.user_id).await?;
        require(target_role, Access::Write)?;
    }

    let goal = GoalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Goal", id))?;
    tracing::info!(goal_id = id, user_id = auth.user_id, status = goal.status, "Goal updated");
    Ok(Json(goal))
}

/// DELETE /api/v1/goals/goal/{id}
///
/// Archives the goal; the row is kept. Responds with the archived goal.
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Goal>> {
    find_visible(&state.pool, id, auth.user_id).await?;
    let role = ParticipantRepo::role_for_goal(&state.pool, id, auth.user_id).await?;
    require(role, Access::Write)?;

    let goal = GoalRepo::archive(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Goal", id))?;
    tracing::info!(goal_id = id, user_id = auth.user_id, "Goal archived");
    Ok(Json(goal))
}

async fn find_visible(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Goal> {
    GoalRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or_else(|| not_found("Goal", id))
}
