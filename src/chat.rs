//! Append-only chat channel for a board session.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

/// A single chat message. Ordering is arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub user: String,
    pub text: String,
}

/// The board's chat log.
#[derive(Debug, Default)]
pub struct ChatChannel {
    messages: Vec<ChatMessage>,
}

impl ChatChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Replace the whole log with a history snapshot from the relay.
    pub fn load_history(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    /// All messages in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no messages have arrived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
