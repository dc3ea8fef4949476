//! CLI command definitions and handlers

use base64::{engine::general_purpose, Engine as _};
use clap::Subcommand;
use std::path::PathBuf;

use crate::core::config::AppConfig;

/// Commands for the document translation proxy
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP API server
    Serve {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },

    /// Translate a single remote document and save it locally
    Translate {
        /// Download link of the source document (required)
        #[arg(short, long)]
        url: String,

        /// File name sent to the translation service (required)
        #[arg(short, long)]
        name: String,

        /// Media type of the source document (required)
        #[arg(short, long)]
        mime_type: String,

        /// Output directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

/// Handle server command
pub async fn handle_serve(host: String, port: u16, config: AppConfig) -> anyhow::Result<()> {
    use crate::server::api::{run_server, OPENAPI_PATH};
    use tracing::info;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📊 OpenAPI document: http://{}:{}{}", host, port, OPENAPI_PATH);

    run_server(host, port, config).await?;

    Ok(())
}

/// Handle one-off translation command
pub async fn handle_translate(
    url: String,
    name: String,
    mime_type: String,
    output: PathBuf,
    config: AppConfig,
) -> anyhow::Result<()> {
    use crate::core::models::{FileReference, FileReferenceList};
    use crate::core::pipeline::TranslationPipeline;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::{Duration, Instant};
    use tracing::info;

    let start_time = Instant::now();

    info!("Input: {}", url);
    info!("Output: {}", output.display());

    let pipeline = TranslationPipeline::from_config(&config)?;
    let request = FileReferenceList::new(vec![FileReference::new(name, mime_type, url)]);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message("Translating...");

    let translated = match pipeline.translate(&request, &config.credentials()).await {
        Ok(file) => file,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };

    pb.finish_with_message("Completed");

    let content = general_purpose::STANDARD.decode(&translated.content)?;
    tokio::fs::create_dir_all(&output).await?;
    let path = output.join(&translated.name);
    tokio::fs::write(&path, &content).await?;

    let duration = start_time.elapsed();
    info!("Wrote {} bytes to {} in {:?}", content.len(), path.display(), duration);

    println!("\n✅ Translation completed!");
    println!("   Output: {}", path.display());
    println!("   Type: {}", translated.mime_type);
    println!("   Time: {:?}", duration);

    Ok(())
}
