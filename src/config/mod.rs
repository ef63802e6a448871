//! Configuration for the Lexicon chat adapter
//!
//! The adapter is configured once and the value never changes afterwards.
//! It can be resolved from:
//! 1. An explicit JSON file
//! 2. `LEXICON_*` environment variables
//! 3. The default file (`<config dir>/lexicon/config.json`)

pub mod strategy;

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

pub use self::strategy::RequestStrategy;
use crate::error::{LexiconError, Result};

/// Environment variable names read by [`LexiconConfig::from_env`]
pub const ENV_BASE_URL: &str = "LEXICON_BASE_URL";
pub const ENV_AGENT_ID: &str = "LEXICON_AGENT_ID";
pub const ENV_USER_ID: &str = "LEXICON_USER_ID";
pub const ENV_CHAT_ID: &str = "LEXICON_CHAT_ID";
pub const ENV_CHATBOT_ID: &str = "LEXICON_CHATBOT_ID";
pub const ENV_STRATEGY: &str = "LEXICON_STRATEGY";

const ENV_VARS: [&str; 6] = [
    ENV_BASE_URL,
    ENV_AGENT_ID,
    ENV_USER_ID,
    ENV_CHAT_ID,
    ENV_CHATBOT_ID,
    ENV_STRATEGY,
];

/// Static configuration of the remote chatbot
///
/// The identifiers are opaque and passed through to the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Endpoint of the remote chatbot
    pub base_url: String,

    pub agent_id: String,

    pub user_id: String,

    pub chat_id: String,

    pub chatbot_id: String,

    /// Request shape used for every turn
    #[serde(default)]
    pub strategy: RequestStrategy,
}

impl LexiconConfig {
    /// Create a configuration using the query-parameter request shape
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        agent_id: impl Into<String>,
        user_id: impl Into<String>,
        chat_id: impl Into<String>,
        chatbot_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            agent_id: agent_id.into(),
            user_id: user_id.into(),
            chat_id: chat_id.into(),
            chatbot_id: chatbot_id.into(),
            strategy: RequestStrategy::default(),
        }
    }

    /// Select the request shape
    #[must_use]
    pub fn with_strategy(mut self, strategy: RequestStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Get the default config file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexicon")
            .join("config.json")
    }

    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a required field is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| LexiconError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| LexiconError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from `LEXICON_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or the strategy is unknown
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing or the strategy is unknown
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                LexiconError::ConfigValidation(format!("missing environment variable {key}"))
            })
        };

        let strategy = match lookup(ENV_STRATEGY) {
            Some(value) => value.parse()?,
            None => RequestStrategy::default(),
        };

        Ok(Self {
            base_url: required(ENV_BASE_URL)?,
            agent_id: required(ENV_AGENT_ID)?,
            user_id: required(ENV_USER_ID)?,
            chat_id: required(ENV_CHAT_ID)?,
            chatbot_id: required(ENV_CHATBOT_ID)?,
            strategy,
        })
    }

    /// Resolve configuration: explicit file, then environment, then default file
    ///
    /// # Errors
    ///
    /// Returns an error if no source yields a complete configuration
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        Self::resolve_with(path, |key| std::env::var(key).ok(), &Self::default_path())
    }

    /// Resolve configuration against an arbitrary key lookup and default file
    ///
    /// Once any `LEXICON_*` key is present the environment is authoritative:
    /// an incomplete or invalid environment is reported rather than falling
    /// back to the default file.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen source is incomplete or no source exists
    pub fn resolve_with<F>(path: Option<&Path>, lookup: F, default_path: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        if ENV_VARS.iter().any(|key| lookup(key).is_some()) {
            return Self::from_lookup(lookup);
        }

        if default_path.exists() {
            return Self::load_from(default_path);
        }

        Err(LexiconError::ConfigValidation(format!(
            "no configuration found: pass --config, set {ENV_BASE_URL} and friends, or create {}",
            default_path.display()
        )))
    }
}
