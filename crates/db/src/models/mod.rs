//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A filter struct for the scoped list query, where the resource has one

pub mod board;
pub mod category;
pub mod comment;
pub mod goal;
pub mod page;
pub mod user;
