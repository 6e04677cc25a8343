//! Telegram Bot API data-transfer objects for goalboard.
//!
//! - [`messages`] -- the update/message/response shapes.
//! - [`codec`] -- JSON decoding with an explicit unknown-field policy.
//!
//! No network transport lives here; callers feed in response bodies.

pub mod codec;
pub mod messages;

pub use codec::{decode, decode_lenient, TgError, UnknownFields};
