//! Request shapes understood by the remote chatbot

use std::str::FromStr;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

/// How a user turn is sent to the remote chatbot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStrategy {
    /// `GET {base_url}?message=...`
    #[default]
    #[serde(alias = "query")]
    QueryParam,

    /// `POST {base_url}/chat` with a form body carrying the conversation ids
    #[serde(alias = "form")]
    FormPost,
}

impl RequestStrategy {
    /// Short name used on the command line and in the environment
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QueryParam => "query",
            Self::FormPost => "form",
        }
    }

    /// Whether a response status counts as a usable reply
    #[must_use]
    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            Self::QueryParam => status == StatusCode::OK,
            Self::FormPost => status.is_success(),
        }
    }
}

impl std::fmt::Display for RequestStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStrategy {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" | "query_param" | "query-param" => Ok(Self::QueryParam),
            "form" | "form_post" | "form-post" => Ok(Self::FormPost),
            other => Err(LexiconError::ConfigValidation(format!(
                "unknown request strategy: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!("query".parse::<RequestStrategy>().unwrap(), RequestStrategy::QueryParam);
        assert_eq!("Form-Post".parse::<RequestStrategy>().unwrap(), RequestStrategy::FormPost);
        assert!("websocket".parse::<RequestStrategy>().is_err());
    }

    #[test]
    fn test_status_acceptance() {
        assert!(RequestStrategy::QueryParam.accepts(StatusCode::OK));
        assert!(!RequestStrategy::QueryParam.accepts(StatusCode::CREATED));
        assert!(RequestStrategy::FormPost.accepts(StatusCode::CREATED));
        assert!(!RequestStrategy::FormPost.accepts(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_serde_aliases() {
        let strategy: RequestStrategy = serde_json::from_str("\"form\"").unwrap();
        assert_eq!(strategy, RequestStrategy::FormPost);
        assert_eq!(
            serde_json::to_string(&RequestStrategy::QueryParam).unwrap(),
            "\"query_param\""
        );
    }
}
