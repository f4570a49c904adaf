use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use gloss_recognizer::config::AppConfig;
use gloss_recognizer::context::GlossService;
use gloss_recognizer::http::{resolve_bind_addr, run_http_server};

#[derive(Parser, Debug)]
#[command(name = "gloss_server", about = "HTTP translation service for sign gloss recognition")]
struct Args {
    /// JSON configuration file (defaults to assets/gloss_config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Signature store, overriding the configured path
    #[arg(long)]
    signatures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = args
        .config
        .as_deref()
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);
    if let Some(signatures) = args.signatures {
        config.store.signatures_path = signatures;
    }

    let service = GlossService::from_config(&config)?;
    tracing::info!(
        "Loaded {} signatures from {}",
        service.signature_count(),
        config.store.signatures_path.display()
    );

    let addr = resolve_bind_addr(&config.server);
    run_http_server(Arc::new(service), addr).await
}
