//! Main entry point for the document translation proxy

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use document_translation_proxy::cli::commands::{self, Commands};
use document_translation_proxy::core::config::AppConfig;

/// Document Translation Proxy - English to Japanese document translation via Azure Translator
#[derive(Parser, Debug)]
#[command(name = "document-translation-proxy", version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML, YAML or JSON); environment variables take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={},tower_http={}",
                    env!("CARGO_CRATE_NAME"),
                    log_level,
                    log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(args.config.as_deref())?;

    match args.command {
        Some(Commands::Serve { host, port }) => {
            commands::handle_serve(host, port, config).await?;
        }
        Some(Commands::Translate {
            url,
            name,
            mime_type,
            output,
        }) => {
            commands::handle_translate(url, name, mime_type, output, config).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
