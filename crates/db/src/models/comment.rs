//! Goal comment model and DTOs.

use goalboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::page::ListParams;

/// A comment row from the `goal_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub text: String,
    pub goal_id: DbId,
    /// The comment's author.
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment on a goal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub text: String,
    pub goal_id: DbId,
}

/// DTO for updating a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub text: Option<String>,
}

/// Filters for the scoped comment list.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub goal_id: Option<DbId>,
    pub list: ListParams,
}
