//! Lexicon chatbot adapter
//!
//! Forwards the latest user message of a chat context to a remote Lexicon
//! chatbot and hands its reply back to the host as a single chat chunk.
//!
//! Supports:
//! - `GET {base_url}?message=...` ([`RequestStrategy::QueryParam`])
//! - `POST {base_url}/chat` with a form body ([`RequestStrategy::FormPost`])

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Dispatch};

use crate::{
    config::{LexiconConfig, RequestStrategy},
    error::{LexiconError, Result},
    messages::{ChatContext, Message, Role},
};

use super::{
    ChatChunk, ChatChunkStream, ChatModel, ChatParams, ChatTurn, ConnectOptions, EventSender,
    FunctionContext,
};

/// Lexicon chatbot adapter
pub struct LexiconAdapter {
    client: Client,
    config: Arc<LexiconConfig>,
    dispatch: Dispatch,
}

impl LexiconAdapter {
    /// Create a new adapter
    ///
    /// Logging goes to whichever dispatcher is the default at construction time.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised
    pub fn new(config: LexiconConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("lexicon-llm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LexiconError::connection("failed to build HTTP client", e))?;

        Ok(Self::with_client(config, client))
    }

    /// Create an adapter on top of an existing HTTP client
    #[must_use]
    pub fn with_client(config: LexiconConfig, client: Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
            dispatch: tracing::dispatcher::get_default(Dispatch::clone),
        }
    }

    /// Route this adapter's diagnostics to `dispatch`
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Configuration the adapter was built with
    #[must_use]
    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// Begin a chat turn
    ///
    /// Tool calling is not supported: a supplied `fnc_ctx` is ignored with a
    /// warning. Generation parameters are accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::InvalidArgument`] if the context does not end
    /// in a user message with text content.
    pub fn begin_chat(
        &self,
        chat_ctx: ChatContext,
        conn_options: ConnectOptions,
        fnc_ctx: Option<FunctionContext>,
        params: ChatParams,
    ) -> Result<LexiconStream> {
        tracing::dispatcher::with_default(&self.dispatch, || {
            if let Some(fnc_ctx) = &fnc_ctx {
                warn!(
                    functions = ?fnc_ctx.names(),
                    "function calling is not supported by the lexicon adapter, ignoring fnc_ctx"
                );
            }
            debug!(?params, "ignoring generation parameters");
        });

        user_text(chat_ctx.last())?;

        Ok(LexiconStream {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
            dispatch: self.dispatch.clone(),
            chat_ctx,
            conn_options,
        })
    }
}

impl ChatModel for LexiconAdapter {
    fn provider(&self) -> &str {
        "lexicon"
    }

    fn chat(
        &self,
        chat_ctx: ChatContext,
        conn_options: ConnectOptions,
        fnc_ctx: Option<FunctionContext>,
        params: ChatParams,
    ) -> Result<Box<dyn ChatTurn>> {
        let stream = self.begin_chat(chat_ctx, conn_options, fnc_ctx, params)?;
        Ok(Box::new(stream))
    }
}

/// One chat turn against the Lexicon chatbot
pub struct LexiconStream {
    client: Client,
    config: Arc<LexiconConfig>,
    dispatch: Dispatch,
    chat_ctx: ChatContext,
    conn_options: ConnectOptions,
}

impl LexiconStream {
    /// Perform the request and build the reply chunk without delivering it
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::InvalidArgument`] for a malformed last message
    /// and [`LexiconError::ApiConnection`] for any failure talking to the chatbot.
    pub async fn complete(&self) -> Result<ChatChunk> {
        let mut chat_ctx = self.chat_ctx.clone();
        let user_msg = chat_ctx.pop();
        let text = user_text(user_msg.as_ref())?;

        let reply = self.send(&text).await?;
        Ok(ChatChunk::assistant(reply))
    }

    async fn send(&self, text: &str) -> Result<String> {
        let strategy = self.config.strategy;
        self.log(|| debug!(%strategy, base_url = %self.config.base_url, "sending chat turn"));

        let response = build_request(&self.client, &self.config, text)
            .send()
            .await
            .map_err(|e| LexiconError::connection("request to chatbot failed", e))?;

        let status = response.status();
        self.log(|| debug!(%status, "chatbot responded"));

        if !strategy.accepts(status) {
            return Err(LexiconError::connection(
                format!("chatbot returned HTTP {status}"),
                format!("unexpected status {status} for {strategy} request"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LexiconError::connection("failed to read chatbot reply", e))?;

        let reply: ChatReply = serde_json::from_slice(&body)
            .map_err(|e| LexiconError::connection("invalid chatbot reply", e))?;

        Ok(reply.message)
    }

    fn log(&self, f: impl FnOnce()) {
        tracing::dispatcher::with_default(&self.dispatch, f);
    }
}

#[async_trait]
impl ChatTurn for LexiconStream {
    fn chat_ctx(&self) -> &ChatContext {
        &self.chat_ctx
    }

    fn conn_options(&self) -> &ConnectOptions {
        &self.conn_options
    }

    async fn run(&self, event_tx: &EventSender) -> Result<()> {
        let chunk = self.complete().await?;
        event_tx
            .send(chunk)
            .map_err(|e| LexiconError::connection("event channel closed", e))
    }

    fn into_stream(self: Box<Self>) -> ChatChunkStream {
        Box::pin(stream::once(async move { self.complete().await }))
    }
}

/// Text of the user turn, or an argument error
fn user_text(message: Option<&Message>) -> Result<String> {
    let message = message.ok_or_else(|| {
        LexiconError::InvalidArgument("the chat context must contain at least one message".into())
    })?;

    if message.role != Role::User {
        return Err(LexiconError::InvalidArgument(format!(
            "the last message in the chat context must be from the user, got {}",
            message.role
        )));
    }

    message.as_text().ok_or_else(|| {
        LexiconError::InvalidArgument("user message content must be text".into())
    })
}

fn build_request(client: &Client, config: &LexiconConfig, text: &str) -> RequestBuilder {
    match config.strategy {
        RequestStrategy::QueryParam => client.get(&config.base_url).query(&[("message", text)]),
        RequestStrategy::FormPost => client
            .post(format!("{}/chat", config.base_url.trim_end_matches('/')))
            .form(&ChatForm {
                agent_id: &config.agent_id,
                user_id: &config.user_id,
                chat_id: &config.chat_id,
                chatbot_id: &config.chatbot_id,
                message: text,
            }),
    }
}

// Lexicon API types

#[derive(Debug, Serialize)]
struct ChatForm<'a> {
    agent_id: &'a str,
    user_id: &'a str,
    chat_id: &'a str,
    chatbot_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    message: String,
}
