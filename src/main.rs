//! Penwright application entry point.
//!
//! Initializes tracing, loads configuration, builds the upstream text editor
//! when an API key is available, sets up the Axum router and starts the HTTP
//! server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use penwright::config::{AppConfig, DEFAULT_LOG_FILTER};
use penwright::editor::{OpenAiEditor, TextEditor};
use penwright::http::start_server;
use penwright::{create_router, AppState};

/// Penwright: backend for an AI-assisted text editor
#[derive(Parser, Debug)]
#[command(name = "penwright", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "penwright=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration is loaded first so the log format is known
    let config = AppConfig::resolve(args.config.as_deref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        addr = %config.http.addr(),
        endpoint = %config.editor.endpoint,
        model = %config.editor.model,
        "Loaded configuration"
    );

    let editor: Option<Arc<dyn TextEditor>> = match config.editor.resolve_api_key() {
        Some(api_key) => {
            let editor: Arc<dyn TextEditor> =
                Arc::new(OpenAiEditor::new(&config.editor, api_key)?);
            tracing::info!("Initialized text editor");
            Some(editor)
        }
        None => {
            tracing::warn!(
                env = %config.editor.api_key_env,
                "No API key found, /proc will answer 503 until one is configured"
            );
            None
        }
    };

    let state = AppState::new(editor);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
