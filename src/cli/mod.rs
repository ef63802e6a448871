//! CLI argument parsing and command routing

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::RequestStrategy;

/// Lexicon: talk to a remote Lexicon chatbot through the agent adapter
#[derive(Debug, Parser)]
#[command(name = "lexicon")]
#[command(about = "Send chat turns to a Lexicon chatbot endpoint", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file (defaults to LEXICON_* env, then the user config dir)
    #[arg(short, long, global = true, env = "LEXICON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured request shape
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a single user message and print the reply
    Chat {
        /// The user message
        message: String,

        /// Optional system message placed before the user turn
        #[arg(long)]
        system: Option<String>,
    },

    /// Print the resolved configuration
    Config,
}

/// Request shape as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// GET with the message as a query parameter
    Query,
    /// POST a form to `{base_url}/chat`
    Form,
}

impl From<StrategyArg> for RequestStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Query => Self::QueryParam,
            StrategyArg::Form => Self::FormPost,
        }
    }
}

impl Cli {
    /// Parse CLI arguments from environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat() {
        let cli = Cli::try_parse_from([
            "lexicon", "--strategy", "form", "chat", "hello", "--system", "be brief",
        ])
        .unwrap();

        assert_eq!(cli.strategy.map(RequestStrategy::from), Some(RequestStrategy::FormPost));
        match cli.command {
            Commands::Chat { message, system } => {
                assert_eq!(message, "hello");
                assert_eq!(system.as_deref(), Some("be brief"));
            }
            Commands::Config => panic!("Expected chat command"),
        }
    }

    #[test]
    fn test_chat_requires_message() {
        assert!(Cli::try_parse_from(["lexicon", "chat"]).is_err());
    }
}
