//! Input validation shared by the repository and API layers.
//!
//! Each function returns `CoreError::Validation` with a message naming the
//! offending field, mirroring how the API reports `VALIDATION_ERROR`.

use crate::error::CoreError;
use crate::status::{BoardRole, GoalPriority, GoalStatus};
use crate::types::StatusId;

/// Maximum length of board, category and goal titles (`VARCHAR(255)`).
pub const MAX_TITLE_LEN: usize = 255;

/// Validate a board, category or goal title: non-blank, at most 255 chars.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be blank".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate comment text: non-blank.
pub fn validate_comment_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("text must not be blank".into()));
    }
    Ok(())
}

/// Validate the status a goal is created with.
///
/// Goals cannot be born archived; archival only happens through destroy,
/// an explicit status update, or a parent cascade.
pub fn validate_new_goal_status(status: Option<StatusId>) -> Result<GoalStatus, CoreError> {
    let status = match status {
        Some(id) => GoalStatus::try_from(id)?,
        None => GoalStatus::default(),
    };
    if !status.is_live() {
        return Err(CoreError::Validation(
            "A goal cannot be created in archived status".into(),
        ));
    }
    Ok(status)
}

/// Validate an optional priority value.
pub fn validate_priority(priority: Option<StatusId>) -> Result<Option<GoalPriority>, CoreError> {
    priority.map(GoalPriority::try_from).transpose()
}

/// Validate an optional status value on update.
pub fn validate_status(status: Option<StatusId>) -> Result<Option<GoalStatus>, CoreError> {
    status.map(GoalStatus::try_from).transpose()
}

/// Validate a role assigned through a board's participant list.
///
/// Only writer and reader can be granted; ownership is fixed at creation.
pub fn validate_assignable_role(role: StatusId) -> Result<BoardRole, CoreError> {
    match BoardRole::try_from(role)? {
        BoardRole::Owner => Err(CoreError::Validation(
            "The owner role cannot be assigned to participants".into(),
        )),
        other => Ok(other),
    }
}
