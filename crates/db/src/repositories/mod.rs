//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a caller-owned `&mut PgConnection` for work that
//! must share a transaction) as the first argument. `*_for_user` methods
//! apply board-membership and soft-delete scoping.

pub mod board_repo;
pub mod category_repo;
pub mod comment_repo;
pub mod goal_repo;
pub mod participant_repo;
pub mod user_repo;

pub use board_repo::BoardRepo;
pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use goal_repo::GoalRepo;
pub use participant_repo::ParticipantRepo;
pub use user_repo::UserRepo;
