//! Goal category model and DTOs.

use goalboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::page::ListParams;

/// A category row from the `goal_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub board_id: DbId,
    /// The user who created the category.
    pub user_id: DbId,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category on a board.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    pub board_id: DbId,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
}

/// Filters for the scoped category list.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub board_id: Option<DbId>,
    pub list: ListParams,
}
