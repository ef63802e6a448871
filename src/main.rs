//! lexicon binary entry point

use color_eyre::{eyre::eyre, Result};
use lexicon_llm::{
    cli::{Cli, Commands},
    config::LexiconConfig,
    messages::{ChatContext, Message},
    services::{ChatModel, ChatParams, ChatTurn, ConnectOptions, LexiconAdapter},
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install error handler
    color_eyre::install()?;

    // Pick up LEXICON_* from a local .env if present
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("lexicon_llm=debug")
            .init();
    }

    let mut config = LexiconConfig::resolve(cli.config.as_deref())?;
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy.into();
    }

    match cli.command {
        Commands::Chat { message, system } => {
            let mut chat_ctx = ChatContext::new();
            if let Some(system) = system {
                chat_ctx.push(Message::system(system));
            }
            chat_ctx.push(Message::user(message));

            let adapter = LexiconAdapter::new(config)?;
            let turn = adapter.chat(
                chat_ctx,
                ConnectOptions::default(),
                None,
                ChatParams::default(),
            )?;

            let (event_tx, mut event_rx) = mpsc::unbounded_channel();
            turn.run(&event_tx).await?;
            drop(event_tx);

            let chunk = event_rx
                .recv()
                .await
                .ok_or_else(|| eyre!("chatbot produced no reply"))?;
            println!("{}", chunk.content().unwrap_or_default());
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
