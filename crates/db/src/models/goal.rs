//! Goal model and DTOs.

use goalboard_core::types::{Date, DbId, StatusId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::models::page::ListParams;

/// A goal row from the `goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: DbId,
    /// The user who created the goal.
    pub user_id: DbId,
    /// See [`goalboard_core::status::GoalStatus`].
    pub status: StatusId,
    /// See [`goalboard_core::status::GoalPriority`].
    pub priority: StatusId,
    pub due_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new goal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGoal {
    pub title: String,
    pub description: Option<String>,
    pub category_id: DbId,
    /// Defaults to 1 (to_do) if omitted.
    pub status: Option<StatusId>,
    /// Defaults to 2 (medium) if omitted.
    pub priority: Option<StatusId>,
    pub due_date: Option<Date>,
}

/// DTO for updating a goal. All fields are optional.
///
/// `description` and `due_date` are nullable columns: an absent key keeps
/// the stored value, an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGoal {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub category_id: Option<DbId>,
    pub status: Option<StatusId>,
    pub priority: Option<StatusId>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<Date>>,
}

/// Marks a key that appeared in the payload, even with a `null` value.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Filters for the scoped goal list.
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    pub category_ids: Option<Vec<DbId>>,
    pub statuses: Option<Vec<StatusId>>,
    pub priorities: Option<Vec<StatusId>>,
    pub due_date_gte: Option<Date>,
    pub due_date_lte: Option<Date>,
    pub list: ListParams,
}
