//! Model factories for goalboard integration tests.
//!
//! Every factory inserts through the real repositories so rows obey the
//! same invariants as production writes (e.g. a board always has an owner
//! participant). Titles and usernames carry a process-wide sequence number
//! so factories can be called repeatedly within one test database.

use std::sync::atomic::{AtomicU64, Ordering};

use goalboard_core::status::{BoardRole, GoalPriority, GoalStatus};
use goalboard_core::types::Date;
use goalboard_db::models::board::Board;
use goalboard_db::models::category::{Category, CreateCategory};
use goalboard_db::models::comment::{Comment, CreateComment};
use goalboard_db::models::goal::{CreateGoal, Goal};
use goalboard_db::models::user::{CreateUser, User};
use goalboard_db::repositories::{
    BoardRepo, CategoryRepo, CommentRepo, GoalRepo, ParticipantRepo, UserRepo,
};
use sqlx::PgPool;

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_seq() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Placeholder stored by [`create_user`]; it is not a valid PHC string, so
/// factory users cannot log in with a password.
pub const UNUSABLE_PASSWORD_HASH: &str = "!unusable";

/// Insert a user named `user_<n>`.
pub async fn create_user(pool: &PgPool) -> User {
    create_user_named(pool, &format!("user_{}", next_seq())).await
}

/// Insert a user with a specific username.
pub async fn create_user_named(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: UNUSABLE_PASSWORD_HASH.to_string(),
        },
    )
    .await
    .expect("user factory insert")
}

/// Insert a board owned by `owner`.
pub async fn create_board(pool: &PgPool, owner: &User) -> Board {
    create_board_titled(pool, owner, &format!("Board {}", next_seq())).await
}

/// Insert a board with a specific title, owned by `owner`.
pub async fn create_board_titled(pool: &PgPool, owner: &User, title: &str) -> Board {
    BoardRepo::create(pool, owner.id, title)
        .await
        .expect("board factory insert")
}

/// Add `user` to `board` with `role`.
pub async fn add_participant(pool: &PgPool, board: &Board, user: &User, role: BoardRole) {
    let mut conn = pool.acquire().await.expect("acquire connection");
    ParticipantRepo::insert(&mut conn, board.id, user.id, role)
        .await
        .expect("participant factory insert");
}

/// Insert a category on `board`, created by `user`.
pub async fn create_category(pool: &PgPool, board: &Board, user: &User) -> Category {
    create_category_titled(pool, board, user, &format!("Category {}", next_seq())).await
}

/// Insert a category with a specific title.
pub async fn create_category_titled(
    pool: &PgPool,
    board: &Board,
    user: &User,
    title: &str,
) -> Category {
    CategoryRepo::create(
        pool,
        user.id,
        &CreateCategory {
            title: title.to_string(),
            board_id: board.id,
        },
    )
    .await
    .expect("category factory insert")
}

/// Optional attributes for [`create_goal_with`].
#[derive(Debug, Clone, Default)]
pub struct GoalAttrs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    pub due_date: Option<Date>,
}

/// Insert a to-do, medium-priority goal in `category`, created by `user`.
pub async fn create_goal(pool: &PgPool, category: &Category, user: &User) -> Goal {
    create_goal_with(pool, category, user, GoalAttrs::default()).await
}

/// Insert a goal with explicit attributes.
pub async fn create_goal_with(
    pool: &PgPool,
    category: &Category,
    user: &User,
    attrs: GoalAttrs,
) -> Goal {
    let input = CreateGoal {
        title: attrs
            .title
            .unwrap_or_else(|| format!("Goal {}", next_seq())),
        description: attrs.description,
        category_id: category.id,
        status: Some(attrs.status.id()),
        priority: Some(attrs.priority.id()),
        due_date: attrs.due_date,
    };
    GoalRepo::create(pool, user.id, &input, attrs.status, attrs.priority)
        .await
        .expect("goal factory insert")
}

/// Insert a comment on `goal` authored by `user`.
pub async fn create_comment(pool: &PgPool, goal: &Goal, user: &User) -> Comment {
    CommentRepo::create(
        pool,
        user.id,
        &CreateComment {
            text: format!("Comment {}", next_seq()),
            goal_id: goal.id,
        },
    )
    .await
    .expect("comment factory insert")
}

/// A board with two categories and two goals in each, all owned by `owner`.
pub struct BoardTree {
    pub owner: User,
    pub board: Board,
    pub categories: Vec<Category>,
    /// Goals grouped per category, same order as `categories`.
    pub goals: Vec<Vec<Goal>>,
}

/// Build a [`BoardTree`] for cascade tests.
pub async fn create_board_tree(pool: &PgPool) -> BoardTree {
    let owner = create_user(pool).await;
    let board = create_board(pool, &owner).await;
    let mut categories = Vec::new();
    let mut goals = Vec::new();
    for _ in 0..2 {
        let category = create_category(pool, &board, &owner).await;
        let mut in_category = Vec::new();
        for _ in 0..2 {
            in_category.push(create_goal(pool, &category, &owner).await);
        }
        categories.push(category);
        goals.push(in_category);
    }
    BoardTree {
        owner,
        board,
        categories,
        goals,
    }
}

/// Parse a `YYYY-MM-DD` literal for test fixtures.
pub fn date(s: &str) -> Date {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid fixture date")
}
