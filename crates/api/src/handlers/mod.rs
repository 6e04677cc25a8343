pub mod auth;
pub mod board;
pub mod category;
pub mod comment;
pub mod goal;
