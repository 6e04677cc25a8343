//! HTTP-level integration tests for `/api/v1/goals/goal`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, result_ids, token_for};
use goalboard_core::status::{BoardRole, GoalPriority, GoalStatus};
use goalboard_db::repositories::GoalRepo;
use goalboard_test_utils::{self as factory, GoalAttrs};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let user = factory::create_user(&pool).await;
    let board = factory::create_board(&pool, &user).await;
    let category = factory::create_category(&pool, &board, &user).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/goals/goal/create",
        json!({"title": "Wash dishes", "category_id": category.id, "due_date": "2026-11-01"}),
        &token_for(&user),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], GoalStatus::ToDo.id());
    assert_eq!(json["priority"], GoalPriority::Medium.id());
    assert_eq!(json["due_date"], "2026-11-01");
    assert_eq!(json["user_id"], user.id);
    assert!(json["description"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_archived_and_unknown_status(pool: PgPool) {
    let user = factory::create_user(&pool).await;
    let board = factory::create_board(&pool, &user).await;
    let category = factory::create_category(&pool, &board, &user).await;
    let app = common::build_test_app(pool);
    let token = token_for(&user);

    for status in [GoalStatus::Archived.id(), 9] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/goals/goal/create",
            json!({"title": "Nope", "category_id": category.id, "status": status}),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "status {status}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reader_cannot_create(pool: PgPool) {
    let owner = factory::create_user(&pool).await;
    let reader = factory::create_user(&pool).await;
    let board = factory::create_board(&pool, &owner).await;
    let category = factory::create_category(&pool, &board, &owner).await;
    factory::add_participant(&pool, &board, &reader, BoardRole::Reader).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/goals/goal/create",
        json!({"title": "Sneaky", "category_id": category.id}),
        &token_for(&reader),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_default_ordering(pool: PgPool) {
    let user = factory::create_user(&pool).await;
    let board = factory::create_board(&pool, &user).await;
    let home = factory::create_category(&pool, &board, &user).await;
    let work = factory::create_category(&pool, &board, &user).await;

    let critical = factory::create_goal_with(
        &pool,
        &home,
        &user,
        GoalAttrs {
            priority: GoalPriority::Critical,
            ..Default::default()
        },
    )
    .await;
    let done = factory::create_goal_with(
        &pool,
        &home,
        &user,
        GoalAttrs {
            status: GoalStatus::Done,
            priority: GoalPriority::Low,
            ..Default::default()
        },
    )
    .await;
    let elsewhere = factory::create_goal(&pool, &work, &user).await;
    let app = common::build_test_app(pool);
    let token = token_for(&user);

    let response = get_auth(app.clone(), "/api/v1/goals/goal/list", &token).await;
    let json = body_json(response).await;
    assert_eq!(result_ids(&json), vec![critical.id, elsewhere.id, done.id]);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/goals/goal/list?category={}&status=1,2", home.id),
        &token,
    )
    .await;
    assert_eq!(result_ids(&body_json(response).await), vec![critical.id]);

    let response = get_auth(
        app.clone(),
        "/api/v1/goals/goal/list?priority=1&ordering=title",
        &token,
    )
    .await;
    assert_eq!(result_ids(&body_json(response).await), vec![done.id]);

    let response = get_auth(app, "/api/v1/goals/goal/list?status=one", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_destroy_archives_and_hides(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[0][0];
    let app = common::build_test_app(pool.clone());
    let token = token_for(&tree.owner);
    let uri = format!("/api/v1/goals/goal/{}", goal.id);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], GoalStatus::Archived.id());

    let stored = GoalRepo::find_by_id(&pool, goal.id).await.unwrap();
    assert!(stored.is_some(), "archived goal stays in storage");

    let response = get_auth(app.clone(), "/api/v1/goals/goal/list", &token).await;
    assert!(!result_ids(&body_json(response).await).contains(&goal.id));

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_moves_goal_only_to_writable_category(pool: PgPool) {
    let user = factory::create_user(&pool).await;
    let other_owner = factory::create_user(&pool).await;
    let board = factory::create_board(&pool, &user).await;
    let source = factory::create_category(&pool, &board, &user).await;
    let target = factory::create_category(&pool, &board, &user).await;
    let foreign_board = factory::create_board(&pool, &other_owner).await;
    let foreign = factory::create_category(&pool, &foreign_board, &other_owner).await;
    factory::add_participant(&pool, &foreign_board, &user, BoardRole::Reader).await;
    let goal = factory::create_goal(&pool, &source, &user).await;
    let app = common::build_test_app(pool);
    let token = token_for(&user);
    let uri = format!("/api/v1/goals/goal/{}", goal.id);

    let response = put_json_auth(app.clone(), &uri, json!({"category_id": foreign.id}), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app,
        &uri,
        json!({"category_id": target.id, "status": GoalStatus::InProgress.id()}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["category_id"], target.id);
    assert_eq!(json["status"], GoalStatus::InProgress.id());
    assert_eq!(json["title"], goal.title.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_due_date_and_description_with_null(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[0][0];
    let app = common::build_test_app(pool.clone());
    let token = token_for(&tree.owner);
    let uri = format!("/api/v1/goals/goal/{}", goal.id);

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({"due_date": "2030-01-01", "description": "x"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["due_date"], "2030-01-01");
    assert_eq!(json["description"], "x");

    // A payload without the keys leaves them alone.
    let response = put_json_auth(app.clone(), &uri, json!({"title": "renamed"}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["due_date"], "2030-01-01");
    assert_eq!(json["description"], "x");

    let response = put_json_auth(
        app,
        &uri,
        json!({"due_date": null, "description": null}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["due_date"].is_null());
    assert!(json["description"].is_null());

    let stored = GoalRepo::find_by_id(&pool, goal.id).await.unwrap().unwrap();
    assert_eq!(stored.due_date, None);
    assert_eq!(stored.description, None);
    assert_eq!(stored.title, "renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_to_archived_hides_goal(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[1][1];
    let app = common::build_test_app(pool);
    let token = token_for(&tree.owner);
    let uri = format!("/api/v1/goals/goal/{}", goal.id);

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({"status": GoalStatus::Archived.id()}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
