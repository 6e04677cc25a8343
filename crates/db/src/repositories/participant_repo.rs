//! Repository for the `board_participants` table and role resolution.
//!
//! Every `role_for_*` lookup applies the same visibility rules as the list
//! queries: the board must not be deleted, and for categories and goals the
//! intermediate rows must be live too. `None` therefore means "not visible
//! to this user", which handlers report as not found or forbidden.

use goalboard_core::status::{BoardRole, GoalStatus};
use goalboard_core::types::{DbId, StatusId};
use sqlx::{PgConnection, PgPool};

use crate::models::board::BoardParticipant;

/// Column list for participant queries joined with `users u`.
const COLUMNS: &str =
    "bp.id, bp.board_id, bp.user_id, u.username, bp.role, bp.created_at, bp.updated_at";

/// Provides participant listing, replacement and role lookups.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Add a participant. Used for the owner row on board creation.
    pub async fn insert(
        conn: &mut PgConnection,
        board_id: DbId,
        user_id: DbId,
        role: BoardRole,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO board_participants (board_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(board_id)
            .bind(user_id)
            .bind(role.id())
            .execute(conn)
            .await?;
        Ok(())
    }

    /// List a board's participants, owner first.
    pub async fn list_for_board(
        pool: &PgPool,
        board_id: DbId,
    ) -> Result<Vec<BoardParticipant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM board_participants bp
             JOIN users u ON u.id = bp.user_id
             WHERE bp.board_id = $1
             ORDER BY bp.role, u.username"
        );
        sqlx::query_as::<_, BoardParticipant>(&query)
            .bind(board_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every non-owner participant with `participants`.
    ///
    /// Owner rows are never touched; an entry naming an existing owner is
    /// skipped. Runs on the caller's connection so board updates can wrap it
    /// in the same transaction as the title change.
    pub async fn replace_non_owners(
        conn: &mut PgConnection,
        board_id: DbId,
        participants: &[(DbId, BoardRole)],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM board_participants WHERE board_id = $1 AND role <> $2")
            .bind(board_id)
            .bind(BoardRole::Owner.id())
            .execute(&mut *conn)
            .await?;

        for &(user_id, role) in participants {
            sqlx::query(
                "INSERT INTO board_participants (board_id, user_id, role) VALUES ($1, $2, $3)
                 ON CONFLICT (board_id, user_id) DO NOTHING",
            )
            .bind(board_id)
            .bind(user_id)
            .bind(role.id())
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// The user's role on a non-deleted board.
    pub async fn role_for_board(
        pool: &PgPool,
        board_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role: Option<StatusId> = sqlx::query_scalar(
            "SELECT bp.role FROM board_participants bp
             JOIN boards b ON b.id = bp.board_id
             WHERE bp.board_id = $1 AND bp.user_id = $2 AND b.is_deleted = FALSE",
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(to_role(role))
    }

    /// The user's role on the board owning a live category.
    pub async fn role_for_category(
        pool: &PgPool,
        category_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role: Option<StatusId> = sqlx::query_scalar(
            "SELECT bp.role FROM goal_categories c
             JOIN boards b ON b.id = c.board_id
             JOIN board_participants bp ON bp.board_id = b.id
             WHERE c.id = $1 AND bp.user_id = $2
               AND c.is_deleted = FALSE AND b.is_deleted = FALSE",
        )
        .bind(category_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(to_role(role))
    }

    /// The user's role on the board owning a live (non-archived) goal.
    pub async fn role_for_goal(
        pool: &PgPool,
        goal_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role: Option<StatusId> = sqlx::query_scalar(
            "SELECT bp.role FROM goals g
             JOIN goal_categories c ON c.id = g.category_id
             JOIN boards b ON b.id = c.board_id
             JOIN board_participants bp ON bp.board_id = b.id
             WHERE g.id = $1 AND bp.user_id = $2
               AND g.status <> $3 AND c.is_deleted = FALSE AND b.is_deleted = FALSE",
        )
        .bind(goal_id)
        .bind(user_id)
        .bind(GoalStatus::Archived.id())
        .fetch_optional(pool)
        .await?;
        Ok(to_role(role))
    }
}

/// Map a stored role to the enum. The CHECK constraint keeps values in range.
fn to_role(raw: Option<StatusId>) -> Option<BoardRole> {
    raw.and_then(|r| BoardRole::try_from(r).ok())
}
