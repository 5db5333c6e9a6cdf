//! OpenIE CLI - Command-line interface
//!
//! Usage:
//!   openie extract "Obama gave a speech on Tuesday."
//!   echo "The dog bit the man." | openie extract --pretty
//!   openie extract --engine remote --remote-url http://nlp:8000/extract "..."

use std::io::Read;

use anyhow::Context;
use clap::{Parser, Subcommand};
use openie_core::{serialize, EngineBackend, EngineConfig};

#[derive(Parser)]
#[command(name = "openie")]
#[command(about = "Open information extraction from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract facts from text and print them as JSON
    Extract {
        /// Input text (read from stdin when omitted)
        text: Option<String>,

        /// Extraction backend
        #[arg(long, default_value = "pattern")]
        engine: EngineBackend,

        /// Endpoint of the remote backend
        #[arg(long)]
        remote_url: Option<String>,

        /// Drop extractions below this confidence
        #[arg(long, default_value_t = 0.0)]
        min_confidence: f64,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            text,
            engine,
            remote_url,
            min_confidence,
            pretty,
        } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read text from stdin")?;
                    buf
                }
            };

            let mut config = EngineConfig {
                backend: engine,
                min_confidence,
                ..Default::default()
            };
            if let Some(url) = remote_url {
                config.remote_url = url;
            }

            let engine = openie_extractor::build_engine(&config)?;
            tracing::info!(engine = engine.name(), "Running extraction");

            let extractions = engine.extract(&text).await?;
            let output = if pretty {
                serialize::serialize_pretty(&extractions)?
            } else {
                serialize(&extractions)?
            };
            println!("{output}");
        }
    }

    Ok(())
}
