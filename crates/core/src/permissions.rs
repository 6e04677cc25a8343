//! Board-scoped access control.
//!
//! Every goals resource (board, category, goal, comment) is authorized by
//! the caller's role on the owning board. The check is a pure function of
//! the role so it can be tested without a database; repositories resolve
//! the role, handlers call [`require`].

use crate::error::CoreError;
use crate::status::BoardRole;
use crate::types::DbId;

/// Access level an operation needs on the owning board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Access {
    /// Retrieve and list. Any participant.
    Read,
    /// Create, update and destroy children. Owner or writer.
    Write,
    /// Destroy the board or change its participants. Owner only.
    Own,
}

impl BoardRole {
    /// Highest access level this role grants.
    pub fn access(self) -> Access {
        match self {
            BoardRole::Owner => Access::Own,
            BoardRole::Writer => Access::Write,
            BoardRole::Reader => Access::Read,
        }
    }
}

/// Whether a participant with `role` may perform an operation needing `required`.
///
/// `None` means the user is not a participant of the board at all.
pub fn has_access(role: Option<BoardRole>, required: Access) -> bool {
    match role {
        Some(role) => role.access() >= required,
        None => false,
    }
}

/// Like [`has_access`] but returns `CoreError::Forbidden` on denial.
pub fn require(role: Option<BoardRole>, required: Access) -> Result<(), CoreError> {
    if has_access(role, required) {
        return Ok(());
    }
    let msg = match required {
        Access::Read => "You are not a participant of this board",
        Access::Write => "Owner or writer role on the board is required",
        Access::Own => "Owner role on the board is required",
    };
    Err(CoreError::Forbidden(msg.into()))
}

/// Comments are edited and deleted by their author only.
pub fn require_author(author_id: DbId, user_id: DbId) -> Result<(), CoreError> {
    if author_id == user_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the author can modify this comment".into(),
        ))
    }
}
