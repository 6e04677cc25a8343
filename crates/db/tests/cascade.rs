//! Integration tests for the destroy cascades.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Board destroy soft-deletes the board and its categories and archives
//!   every goal under them
//! - Category destroy archives only its own goals
//! - Goal destroy is a status change; the row is kept
//! - A second destroy is a no-op returning `None`
//! - An uncommitted cascade leaves no trace (all-or-nothing)

use goalboard_core::status::GoalStatus;
use goalboard_db::models::page::ListParams;
use goalboard_db::repositories::{BoardRepo, CategoryRepo, GoalRepo};
use goalboard_test_utils as factory;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn board_is_deleted(pool: &PgPool, id: i64) -> bool {
    sqlx::query_scalar("SELECT is_deleted FROM boards WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn category_is_deleted(pool: &PgPool, id: i64) -> bool {
    sqlx::query_scalar("SELECT is_deleted FROM goal_categories WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn goal_status(pool: &PgPool, id: i64) -> GoalStatus {
    let raw: i16 = sqlx::query_scalar("SELECT status FROM goals WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap();
    GoalStatus::try_from(raw).unwrap()
}

// ---------------------------------------------------------------------------
// Board cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_board_destroy_cascades_to_categories_and_goals(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;

    let deleted = BoardRepo::soft_delete_cascade(&pool, tree.board.id)
        .await
        .unwrap()
        .expect("board should be deleted");
    assert!(deleted.is_deleted);

    assert!(board_is_deleted(&pool, tree.board.id).await);
    for category in &tree.categories {
        assert!(category_is_deleted(&pool, category.id).await);
    }
    for goal in tree.goals.iter().flatten() {
        assert_eq!(goal_status(&pool, goal.id).await, GoalStatus::Archived);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_board_destroy_leaves_other_boards_alone(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let other = factory::create_board_tree(&pool).await;

    BoardRepo::soft_delete_cascade(&pool, tree.board.id)
        .await
        .unwrap();

    assert!(!board_is_deleted(&pool, other.board.id).await);
    for category in &other.categories {
        assert!(!category_is_deleted(&pool, category.id).await);
    }
    for goal in other.goals.iter().flatten() {
        assert_eq!(goal_status(&pool, goal.id).await, GoalStatus::ToDo);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_board_destroy_twice_is_noop(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;

    assert!(BoardRepo::soft_delete_cascade(&pool, tree.board.id)
        .await
        .unwrap()
        .is_some());
    let second = BoardRepo::soft_delete_cascade(&pool, tree.board.id)
        .await
        .unwrap();
    assert!(second.is_none(), "second destroy should find nothing to delete");
    assert!(board_is_deleted(&pool, tree.board.id).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uncommitted_board_cascade_rolls_back_entirely(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;

    {
        let mut tx = pool.begin().await.unwrap();
        let board = BoardRepo::soft_delete_cascade_in(&mut tx, tree.board.id)
            .await
            .unwrap();
        assert!(board.is_some());
        // Dropped without commit: simulates a failure after all three updates.
    }

    assert!(!board_is_deleted(&pool, tree.board.id).await);
    for category in &tree.categories {
        assert!(!category_is_deleted(&pool, category.id).await);
    }
    for goal in tree.goals.iter().flatten() {
        assert_eq!(goal_status(&pool, goal.id).await, GoalStatus::ToDo);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_board_hidden_from_owner_list(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;

    BoardRepo::soft_delete_cascade(&pool, tree.board.id)
        .await
        .unwrap();

    let page = BoardRepo::list_for_user(&pool, tree.owner.id, &ListParams::default())
        .await
        .unwrap();
    assert_eq!(page.count, 0);
    assert!(BoardRepo::find_for_user(&pool, tree.board.id, tree.owner.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Category cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_destroy_archives_only_its_goals(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let target = &tree.categories[0];
    let sibling = &tree.categories[1];

    let deleted = CategoryRepo::soft_delete_cascade(&pool, target.id)
        .await
        .unwrap()
        .expect("category should be deleted");
    assert!(deleted.is_deleted);

    assert!(category_is_deleted(&pool, target.id).await);
    assert!(!category_is_deleted(&pool, sibling.id).await);
    assert!(!board_is_deleted(&pool, tree.board.id).await);

    for goal in &tree.goals[0] {
        assert_eq!(goal_status(&pool, goal.id).await, GoalStatus::Archived);
    }
    for goal in &tree.goals[1] {
        assert_eq!(goal_status(&pool, goal.id).await, GoalStatus::ToDo);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uncommitted_category_cascade_rolls_back(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let target = &tree.categories[0];

    {
        let mut tx = pool.begin().await.unwrap();
        CategoryRepo::soft_delete_cascade_in(&mut tx, target.id)
            .await
            .unwrap();
        tx.rollback().await.unwrap();
    }

    assert!(!category_is_deleted(&pool, target.id).await);
    for goal in &tree.goals[0] {
        assert_eq!(goal_status(&pool, goal.id).await, GoalStatus::ToDo);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_destroy_twice_is_noop(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let target = &tree.categories[0];

    assert!(CategoryRepo::soft_delete_cascade(&pool, target.id)
        .await
        .unwrap()
        .is_some());
    assert!(CategoryRepo::soft_delete_cascade(&pool, target.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Goal archival
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_goal_destroy_archives_and_keeps_row(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[0][0];

    let archived = GoalRepo::archive(&pool, goal.id)
        .await
        .unwrap()
        .expect("goal should be archived");
    assert_eq!(archived.status, GoalStatus::Archived.id());

    let stored = GoalRepo::find_by_id(&pool, goal.id).await.unwrap();
    assert!(stored.is_some(), "archived goal must remain in storage");

    let visible = GoalRepo::find_for_user(&pool, goal.id, tree.owner.id)
        .await
        .unwrap();
    assert!(visible.is_none(), "archived goal must be hidden");

    // Siblings untouched.
    assert_eq!(goal_status(&pool, tree.goals[0][1].id).await, GoalStatus::ToDo);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_goal_destroy_twice_is_noop(pool: PgPool) {
    let tree = factory::create_board_tree(&pool).await;
    let goal = &tree.goals[1][1];

    assert!(GoalRepo::archive(&pool, goal.id).await.unwrap().is_some());
    assert!(GoalRepo::archive(&pool, goal.id).await.unwrap().is_none());
    assert_eq!(goal_status(&pool, goal.id).await, GoalStatus::Archived);
}
