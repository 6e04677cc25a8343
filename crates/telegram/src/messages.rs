//! Bot API shapes used by the goalboard bot.
//!
//! Optional fields serialize as `null` rather than being skipped; the
//! strict decoder relies on every known key reappearing on re-encode.

use serde::{Deserialize, Serialize};

/// The sender of a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFrom {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub first_name: Option<String>,
    pub username: Option<String>,
    /// `private`, `group`, `supergroup` or `channel`.
    #[serde(rename = "type")]
    pub chat_type: String,
}

/// A formatting span inside [`Message::text`], e.g. a `bot_command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub offset: i64,
    pub length: i64,
    #[serde(rename = "type")]
    pub entity_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(rename = "from")]
    pub message_from: MessageFrom,
    pub chat: Chat,
    /// Unix timestamp, seconds.
    pub date: i64,
    pub text: String,
    pub entities: Option<Vec<Entity>>,
}

impl Message {
    /// The leading `/command` if the message starts with a bot command entity.
    pub fn command(&self) -> Option<&str> {
        let entity = self
            .entities
            .as_deref()?
            .iter()
            .find(|e| e.entity_type == "bot_command" && e.offset == 0)?;
        let end = usize::try_from(entity.length).ok()?;
        self.text.get(..end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateObj {
    pub update_id: i64,
    pub message: Message,
}

/// Envelope returned by `sendMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    pub result: Message,
}

/// Envelope returned by `getUpdates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUpdatesResponse {
    pub ok: bool,
    pub result: Vec<UpdateObj>,
}

impl GetUpdatesResponse {
    /// The offset to pass to the next `getUpdates` call.
    pub fn next_offset(&self) -> Option<i64> {
        self.result.iter().map(|u| u.update_id.saturating_add(1)).max()
    }
}
