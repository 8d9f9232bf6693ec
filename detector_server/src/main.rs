pub mod handlers;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use emotion_detection::config::{ClassifierBackend, ServerConfig};
use emotion_detection::service::CommonService;
use handlers::{emotion_detector, render_index_page};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;


#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let config = ServerConfig::from_env()?;

    let sdk_config = match config.classifier {
        ClassifierBackend::Bedrock => Some(aws_config::load_from_env().await),
        ClassifierBackend::Watson => None,
    };
    let service = CommonService::from_config(&config, sdk_config.as_ref())?;

    let listener = TcpListener::bind(config.address()).await
        .with_context(|| format!("Error binding {}", config.address()))?;
    tracing::info!(address = %config.address(), classifier = ?config.classifier, "emotion detector listening");

    axum::serve(listener, build_router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error serving emotion detector")?;

    tracing::info!("emotion detector stopped");
    Ok(())
}


pub fn build_router(service: CommonService) -> Router {
    Router::new()
        .route("/", get(render_index_page))
        .route("/emotionDetector", get(emotion_detector))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}


async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
