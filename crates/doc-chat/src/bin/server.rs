//! Document chat server binary
//!
//! Run with: cargo run -p doc-chat --bin doc-chat-server -- --config doc-chat.toml

use clap::Parser;
use doc_chat::{config::AppConfig, server::DocServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "doc-chat-server", version, about = "Chat with your uploaded documents")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "DOC_CHAT_CONFIG")]
    config: Option<PathBuf>,

    /// `.env` file read for API keys and overrides, when present
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if args.env_file.is_file() {
        config.apply_dotenv(&args.env_file)?;
        tracing::info!("Loaded environment from {}", args.env_file.display());
    } else {
        config.apply_env()?;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Database: {}", config.storage.database_path.display());
    tracing::info!("  - Upload dir: {}", config.ingestion.upload_dir.display());
    tracing::info!(
        "  - Completion: {:?} {} at {}",
        config.completion.backend,
        config.completion.model,
        config.completion.base_url
    );
    tracing::info!("  - Access mode: {:?}", config.access.mode);

    let server = DocServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
