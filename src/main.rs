use anyhow::Context;
use tracing::{info, warn};

use mentor_relay::{config::Config, init_tracing, routes::build_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal on hosted platforms.
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    info!(?config, "Configuration loaded");

    if config.groq_configured() {
        info!(model = %config.groq_model, "Groq API key found, AI responses enabled");
    } else if config.fallback_enabled {
        warn!("GROQ_API_KEY not set, answering from fallback responses");
    } else {
        warn!("GROQ_API_KEY not set, chat endpoints will report a configuration error");
    }

    let address = config.bind_address();
    let state = AppState::shared(config);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!("Chat relay listening on http://{}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
