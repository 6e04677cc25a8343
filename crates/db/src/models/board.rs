//! Board and board participant models and DTOs.

use goalboard_core::types::{DbId, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A board row from the `boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: DbId,
    pub title: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A participant row joined with the participant's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoardParticipant {
    pub id: DbId,
    pub board_id: DbId,
    pub user_id: DbId,
    pub username: String,
    /// See [`goalboard_core::status::BoardRole`].
    pub role: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Board with its participant list, returned by retrieve and update.
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub participants: Vec<BoardParticipant>,
}

/// DTO for creating a new board. The creator becomes its owner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoard {
    pub title: String,
}

/// A participant entry in [`UpdateBoard::participants`], addressed by username.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantInput {
    pub user: String,
    pub role: StatusId,
}

/// DTO for updating a board. All fields are optional.
///
/// When `participants` is `Some`, every non-owner participant is replaced by
/// the given list.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub participants: Option<Vec<ParticipantInput>>,
}
