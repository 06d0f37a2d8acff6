use tracing::debug;

use crate::error::{Error, Result};

use super::{prompts, AssistantPanel, ChatMessage, Reply};

/// A chat transcript, opened by the assistant's greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a conversation with the greeting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::model(prompts::GREETING)],
        }
    }

    /// The transcript, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `message` and append both it and the reply.
    ///
    /// The reply is appended as a model turn whether it was generated or is
    /// the fallback text.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank message, or
    /// [`Error::RequestInFlight`] if the panel is busy. The transcript is
    /// unchanged in both cases.
    pub async fn send(&mut self, panel: &AssistantPanel, message: &str) -> Result<Reply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::validation("message", "must not be blank"));
        }

        let reply = panel.chat(&self.messages, message).await?;
        debug!(
            "Chat turn {} answered{}",
            self.messages.len(),
            if reply.is_fallback() { " with fallback" } else { "" }
        );
        self.messages.push(ChatMessage::user(message));
        self.messages.push(ChatMessage::model(reply.text()));
        Ok(reply)
    }
}
