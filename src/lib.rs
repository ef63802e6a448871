//! lexicon-llm: agent chat adapter for a remote Lexicon chatbot
//!
//! This library lets a voice/chat agent framework delegate text generation to
//! a remote chatbot HTTP endpoint. It takes the conversation history, sends the
//! latest user message to the chatbot, and hands the reply back as a single
//! chat-delta event.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod services;

// Re-exports for convenience
pub use config::{LexiconConfig, RequestStrategy};
pub use error::{LexiconError, Result};
pub use services::{ChatChunk, ChatModel, ChatTurn, LexiconAdapter};
