//! Service layer for remote chat backends
//!
//! This module defines the contract between the host agent framework and a
//! chat backend: per-call options, the chat-delta events delivered back to
//! the host, and the [`ChatModel`] / [`ChatTurn`] traits implemented by
//! adapters such as [`lexicon::LexiconAdapter`].

pub mod lexicon;

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::{
    error::Result,
    messages::{ChatContext, Role},
};

pub use lexicon::{LexiconAdapter, LexiconStream};

/// Connection policy chosen by the host framework
///
/// Adapters carry these along but do not enforce them; retries and timeouts
/// are the host's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectOptions {
    /// Maximum number of retries the host may attempt
    pub max_retry: u32,

    /// Delay between host retries
    pub retry_interval: Duration,

    /// Per-attempt timeout applied by the host
    pub timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            max_retry: 3,
            retry_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Tool selection hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    Auto,
    Required,
    None,
    /// Force a specific function by name
    Function(String),
}

/// Generation parameters passed with every turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            temperature: None,
            n: Some(1),
            parallel_tool_calls: None,
            tool_choice: None,
        }
    }
}

/// A callable function exposed by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Set of functions the host offers for tool calling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionContext {
    pub functions: Vec<FunctionInfo>,
}

impl FunctionContext {
    /// Names of the registered functions
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Incremental content of a single choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDelta {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One choice in a chat chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub delta: ChoiceDelta,
    pub index: usize,
}

/// Chat-delta event delivered to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatChunk {
    pub request_id: String,
    pub choices: Vec<Choice>,
}

impl ChatChunk {
    /// A complete assistant reply carried in a single chunk
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            request_id: String::new(),
            choices: vec![Choice {
                delta: ChoiceDelta {
                    role: Role::Assistant,
                    content: Some(content.into()),
                },
                index: 0,
            }],
        }
    }

    /// Content of the first choice, if any
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
    }
}

/// Host-side delivery channel for chat events
pub type EventSender = mpsc::UnboundedSender<ChatChunk>;

/// Lazy event stream type
pub type ChatChunkStream = Pin<Box<dyn Stream<Item = Result<ChatChunk>> + Send>>;

/// A single chat turn, created by [`ChatModel::chat`]
///
/// No network activity happens until the turn is run or its stream polled.
#[async_trait]
pub trait ChatTurn: Send + Sync {
    /// Context this turn was started with
    fn chat_ctx(&self) -> &ChatContext;

    /// Connection policy supplied by the host
    fn conn_options(&self) -> &ConnectOptions;

    /// Execute the turn and push its events into `event_tx`
    async fn run(&self, event_tx: &EventSender) -> Result<()>;

    /// Turn the call into a lazily evaluated event stream
    fn into_stream(self: Box<Self>) -> ChatChunkStream;
}

/// Core trait for chat backends
pub trait ChatModel: Send + Sync {
    /// Get the provider name
    fn provider(&self) -> &str;

    /// Begin a chat turn for the given context
    ///
    /// # Errors
    ///
    /// Returns [`crate::LexiconError::InvalidArgument`] if the context does not
    /// end in a text user message.
    fn chat(
        &self,
        chat_ctx: ChatContext,
        conn_options: ConnectOptions,
        fnc_ctx: Option<FunctionContext>,
        params: ChatParams,
    ) -> Result<Box<dyn ChatTurn>>;
}
