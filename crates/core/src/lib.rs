//! Goalboard domain layer.
//!
//! Pure types and rules with no I/O: ids and timestamps, the error taxonomy,
//! goal status / priority / board role enums, the board permission predicate,
//! list helpers and input validation. Used by both `goalboard-db` and
//! `goalboard-api`.

pub mod error;
pub mod listing;
pub mod permissions;
pub mod status;
pub mod types;
pub mod validation;
