/// Mixtape - chat your way to a playlist
use anyhow::Context;
use clap::{Parser, Subcommand};
use mixtape::{config::AppConfig, logging, render, repl, Outcome, PlaylistAssistant};
use mixtape_client::AssistantClient;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mixtape")]
#[command(about = "Build playlists by chatting with an AI suggestion service", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./mixtape.toml when present)
    #[arg(short, long, global = true, env = "MIXTAPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Chat,
    /// Generate one playlist from a prompt and print it
    Generate {
        /// What the playlist should sound like
        #[arg(required = true)]
        prompt: Vec<String>,

        /// Print the session state as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    logging::init(&config.logging.filter);
    tracing::info!(base_url = %config.api.base_url, "Starting mixtape");

    let client = AssistantClient::new(config.client_config())?;
    let mut assistant = PlaylistAssistant::new(client);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let stdin = io::stdin();
            repl::run(&mut assistant, stdin.lock(), io::stdout()).await?;
        }
        Commands::Generate { prompt, json } => {
            let outcome = assistant.send_message(&prompt.join(" ")).await?;
            if let Outcome::Failed(message) = outcome {
                anyhow::bail!(message);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(assistant.state())?);
            } else {
                print!("{}", render::playlist(assistant.state()));
            }
        }
    }

    Ok(())
}
