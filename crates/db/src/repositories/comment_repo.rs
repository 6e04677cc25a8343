//! Repository for the `goal_comments` table.
//!
//! Comments have no tombstone: destroy removes the row. A comment is
//! visible to every participant of its goal's board, including after the
//! goal is archived. New comments on archived goals are refused upstream.

use goalboard_core::listing::{clamp_limit, clamp_offset, OrderingSpec, DEFAULT_LIMIT, MAX_LIMIT};
use goalboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentFilter, CreateComment, UpdateComment};
use crate::models::page::Page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, goal_id, user_id, created_at, updated_at";

/// Same columns, qualified for the joined visibility queries.
const GC_COLUMNS: &str = "gc.id, gc.text, gc.goal_id, gc.user_id, gc.created_at, gc.updated_at";

/// Comments on goals whose board the user participates in. `$1` = user id.
const VISIBLE_FROM: &str = "FROM goal_comments gc
     JOIN goals g ON g.id = gc.goal_id
     JOIN goal_categories c ON c.id = g.category_id
     JOIN board_participants bp ON bp.board_id = c.board_id AND bp.user_id = $1";

const ORDERING: OrderingSpec = OrderingSpec {
    allowed: &[("created", "gc.created_at")],
    default: "-created",
    tiebreak: "gc.id",
};

/// Provides scoped CRUD operations for goal comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment authored by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO goal_comments (text, goal_id, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(&input.text)
            .bind(input.goal_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// List visible comments, newest first by default.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        filter: &CommentFilter,
    ) -> Result<Page<Comment>, sqlx::Error> {
        let limit = clamp_limit(filter.list.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(filter.list.offset);
        let order_by = ORDERING.order_by(filter.list.ordering.as_deref());
        let goal_filter = "WHERE ($2::bigint IS NULL OR gc.goal_id = $2)";

        let count_query = format!("SELECT COUNT(*) {VISIBLE_FROM} {goal_filter}");
        let count: i64 = sqlx::query_scalar(&count_query)
            .bind(user_id)
            .bind(filter.goal_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {GC_COLUMNS} {VISIBLE_FROM} {goal_filter}
             ORDER BY {order_by} LIMIT $3 OFFSET $4"
        );
        let results = sqlx::query_as::<_, Comment>(&query)
            .bind(user_id)
            .bind(filter.goal_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page { count, results })
    }

    /// Find a visible comment by id.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {GC_COLUMNS} {VISIBLE_FROM} WHERE gc.id = $2");
        sqlx::query_as::<_, Comment>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a comment's text. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE goal_comments SET text = COALESCE($2, text)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(&input.text)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goal_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
