//! Events exchanged between a participant and the room.
//!
//! Every event travels as `{"event": <name>, "data": <payload>}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum InboundEvent {
    Join(String),
    ChatMessage(ChatMessageRequest),
    Typing(bool),
    Disconnect,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessageRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum OutboundEvent {
    UserJoined(String),
    UserLeft(String),
    UserList(Vec<String>),
    ChatMessage(ChatMessage),
    Typing(TypingNotice),
    Error(ErrorNotice),
}

impl OutboundEvent {
    pub fn error(message: impl ToString) -> Self {
        OutboundEvent::Error(ErrorNotice {
            message: message.to_string(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypingNotice {
    pub username: String,
    pub is_typing: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub message: String,
}
