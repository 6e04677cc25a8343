//! Repository for the `boards` table, including the board destroy cascade.

use goalboard_core::listing::{clamp_limit, clamp_offset, OrderingSpec, DEFAULT_LIMIT, MAX_LIMIT};
use goalboard_core::status::{BoardRole, GoalStatus};
use goalboard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::board::Board;
use crate::models::page::{ListParams, Page};
use crate::repositories::ParticipantRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "b.id, b.title, b.is_deleted, b.created_at, b.updated_at";

/// Boards the user participates in that are not deleted. `$1` = user id.
const VISIBLE_FROM: &str = "FROM boards b
     JOIN board_participants bp ON bp.board_id = b.id AND bp.user_id = $1
     WHERE b.is_deleted = FALSE";

const ORDERING: OrderingSpec = OrderingSpec {
    allowed: &[("title", "b.title"), ("created", "b.created_at")],
    default: "title",
    tiebreak: "b.id",
};

/// Provides scoped CRUD operations for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert a new board and make `owner_id` its owner, in one transaction.
    pub async fn create(pool: &PgPool, owner_id: DbId, title: &str) -> Result<Board, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board = sqlx::query_as::<_, Board>(
            "INSERT INTO boards (title) VALUES ($1)
             RETURNING id, title, is_deleted, created_at, updated_at",
        )
        .bind(title)
        .fetch_one(&mut *tx)
        .await?;

        ParticipantRepo::insert(&mut tx, board.id, owner_id, BoardRole::Owner).await?;

        tx.commit().await?;
        Ok(board)
    }

    /// List non-deleted boards the user participates in.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &ListParams,
    ) -> Result<Page<Board>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);
        let order_by = ORDERING.order_by(params.ordering.as_deref());

        let count_query = format!("SELECT COUNT(*) {VISIBLE_FROM}");
        let count: i64 = sqlx::query_scalar(&count_query)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} {VISIBLE_FROM} ORDER BY {order_by} LIMIT $2 OFFSET $3"
        );
        let results = sqlx::query_as::<_, Board>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page { count, results })
    }

    /// Find a non-deleted board the user participates in.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {VISIBLE_FROM} AND b.id = $2");
        sqlx::query_as::<_, Board>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a board's title and optionally replace its non-owner participants.
    ///
    /// Both changes are applied in one transaction. Returns `None` if the
    /// board does not exist or is deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        title: Option<&str>,
        participants: Option<&[(DbId, BoardRole)]>,
    ) -> Result<Option<Board>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board = sqlx::query_as::<_, Board>(
            "UPDATE boards SET title = COALESCE($2, title)
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING id, title, is_deleted, created_at, updated_at",
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(board) = board else {
            return Ok(None);
        };

        if let Some(participants) = participants {
            ParticipantRepo::replace_non_owners(&mut tx, board.id, participants).await?;
        }

        tx.commit().await?;
        Ok(Some(board))
    }

    /// Soft-delete a board and cascade to its categories and goals.
    ///
    /// Sets `boards.is_deleted`, then `goal_categories.is_deleted` for every
    /// category on the board, then archives every goal in those categories.
    /// All three updates commit together or not at all. Returns `None` (and
    /// changes nothing) if the board is missing or already deleted.
    pub async fn soft_delete_cascade(pool: &PgPool, id: DbId) -> Result<Option<Board>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let board = Self::soft_delete_cascade_in(&mut tx, id).await?;
        if board.is_some() {
            tx.commit().await?;
        }
        Ok(board)
    }

    /// The cascade body, run on a caller-owned connection or transaction.
    ///
    /// Callers are responsible for committing; dropping an uncommitted
    /// transaction rolls back every update made here.
    pub async fn soft_delete_cascade_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Board>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            "UPDATE boards SET is_deleted = TRUE
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING id, title, is_deleted, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(board) = board else {
            return Ok(None);
        };

        let categories = sqlx::query(
            "UPDATE goal_categories SET is_deleted = TRUE
             WHERE board_id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        let goals = sqlx::query(
            "UPDATE goals SET status = $2
             WHERE category_id IN (SELECT id FROM goal_categories WHERE board_id = $1)
               AND status <> $2",
        )
        .bind(id)
        .bind(GoalStatus::Archived.id())
        .execute(&mut *conn)
        .await?
        .rows_affected();

        tracing::info!(
            board_id = id,
            categories_deleted = categories,
            goals_archived = goals,
            "Board soft-deleted with cascade"
        );

        Ok(Some(board))
    }
}
