use serde::{Deserialize, Serialize};

use crate::entity::{chat_messages, chats, games};

/// A game together with its chat history, as read in one go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: games::Model,
    pub chat: Option<ChatSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSnapshot {
    pub chat: chats::Model,
    pub messages: Vec<chat_messages::Model>,
}
