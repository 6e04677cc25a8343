//! HTTP-level integration tests for `/api/v1/goals/goal_comment`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, result_ids, token_for};
use goalboard_core::status::BoardRole;
use goalboard_db::repositories::GoalRepo;
use goalboard_test_utils as factory;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_writer_comments_on_goal(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let writer = factory::create_user(&pool).await;
    factory::add_participant(&pool, &tree.board, &writer, BoardRole::Writer).await;
    let goal = &tree.goals[0][0];
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/goals/goal_comment/create",
        json!({"text": "On it", "goal_id": goal.id}),
        &token_for(&writer),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user_id"], writer.id);
    assert_eq!(json["goal_id"], goal.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reader_cannot_comment(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let reader = factory::create_user(&pool).await;
    factory::add_participant(&pool, &tree.board, &reader, BoardRole::Reader).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/goals/goal_comment/create",
        json!({"text": "Hi", "goal_id": tree.goals[0][0].id}),
        &token_for(&reader),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_comment_on_archived_goal(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[0][0];
    GoalRepo::archive(&pool, goal.id).await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/goals/goal_comment/create",
        json!({"text": "Too late", "goal_id": goal.id}),
        &token_for(&tree.owner),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_newest_first_filtered_by_goal(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[0][0];
    let older = factory::create_comment(&pool, goal, &tree.owner).await;
    let newer = factory::create_comment(&pool, goal, &tree.owner).await;
    factory::create_comment(&pool, &tree.goals[1][0], &tree.owner).await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        &format!("/api/v1/goals/goal_comment/list?goal={}", goal.id),
        &token_for(&tree.owner),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(result_ids(&json), vec![newer.id, older.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_author_may_edit_or_delete(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let writer = factory::create_user(&pool).await;
    factory::add_participant(&pool, &tree.board, &writer, BoardRole::Writer).await;
    let comment = factory::create_comment(&pool, &tree.goals[0][0], &writer).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/goals/goal_comment/{}", comment.id);
    let owner_token = token_for(&tree.owner);
    let writer_token = token_for(&writer);

    // Even the board owner is not the author.
    let response = put_json_auth(app.clone(), &uri, json!({"text": "edited"}), &owner_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(app.clone(), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, json!({"text": "edited"}), &writer_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["text"], "edited");

    let response = delete_auth(app.clone(), &uri, &writer_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &writer_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comments_stay_readable_after_goal_archived(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[0][0];
    let comment = factory::create_comment(&pool, goal, &tree.owner).await;
    GoalRepo::archive(&pool, goal.id).await.unwrap();
    let app = common::build_test_app(pool);
    let token = token_for(&tree.owner);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/goals/goal_comment/{}", comment.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], comment.id);

    let response = get_auth(
        app,
        &format!("/api/v1/goals/goal_comment/list?goal={}", goal.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(result_ids(&body_json(response).await), vec![comment.id]);
}
