//! Message types for agent conversations
//!
//! This module defines the conversation history handed to the adapter by the
//! host framework: roles, content blocks, messages and the chat context.

use serde::{Deserialize, Serialize};

/// Message role in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        url: String,
    },
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Create a new user message
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Create a new assistant message
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Create a new system message
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Text of the message, if its content is made up only of text blocks
    ///
    /// Returns `None` for empty content or when any block is not text.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        if self.content.is_empty() {
            return None;
        }

        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Image { .. } => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join("\n"))
    }
}

/// Ordered conversation history owned by the host framework
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub messages: Vec<Message>,
}

impl ChatContext {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, builder style
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Last message in the history
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Remove and return the last message
    pub fn pop(&mut self) -> Option<Message> {
        self.messages.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<Message>> for ChatContext {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.as_text().as_deref(), Some("Hello"));
    }

    #[test]
    fn test_multiple_text_blocks_are_joined() {
        let msg = Message {
            role: Role::User,
            content: vec![
                ContentBlock::Text { text: "first".into() },
                ContentBlock::Text { text: "second".into() },
            ],
        };
        assert_eq!(msg.as_text().as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn test_image_content_is_not_text() {
        let msg = Message {
            role: Role::User,
            content: vec![
                ContentBlock::Text { text: "look".into() },
                ContentBlock::Image {
                    url: "https://example.com/cat.png".into(),
                },
            ],
        };
        assert!(msg.as_text().is_none());
    }

    #[test]
    fn test_empty_content_is_not_text() {
        let msg = Message {
            role: Role::User,
            content: Vec::new(),
        };
        assert!(msg.as_text().is_none());
    }

    #[test]
    fn test_context_pop_on_clone_leaves_original() {
        let ctx = ChatContext::new()
            .with_message(Message::system("be brief"))
            .with_message(Message::user("hello"));

        let mut copy = ctx.clone();
        let last = copy.pop().unwrap();

        assert_eq!(last.role, Role::User);
        assert_eq!(copy.len(), 1);
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_equal_contexts_compare_equal() {
        let a = ChatContext::new().with_message(Message::user("hello"));
        let b = ChatContext::new().with_message(Message::user("hello"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
