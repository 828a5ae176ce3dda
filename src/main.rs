mod cli;

use anyhow::Context;
use parley::{AppState, ChatService, ParleyConfig, build_app, utils::logging::init_logging};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse_args();

    let loaded = ParleyConfig::load_optional(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let from_file = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    cli.apply(&mut config);

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if from_file {
        tracing::info!("Loaded configuration from {}", cli.config.display());
    } else {
        tracing::info!("No config file at {}, using defaults", cli.config.display());
    }

    let provider = config.provider()?;
    let client = provider.create_client()?;
    tracing::info!(
        provider = provider.name(),
        model = client.model_name(),
        api_base = %config.completion.api_base,
        "Completion client ready"
    );

    let addr = config.bind_address();
    let chat_service = ChatService::new(client).with_params(config.reply_params());
    let state = AppState {
        config: Arc::new(config),
        chat_service: Arc::new(chat_service),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Parley listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
