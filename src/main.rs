//! RelayChat server - relays chat turns to a completion provider

use relaychat::api::{create_router, AppState};
use relaychat::config::RelayConfig;
use relaychat::llm::{LoggingService, OpenAIService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relaychat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = RelayConfig::from_env();

    if config.credential().is_none() {
        tracing::warn!(
            "No usable API credential configured. Set RELAYCHAT_API_KEY; \
             chat requests will fail until it is."
        );
    }

    tracing::info!(
        api_base = %config.api_base,
        model = %config.model,
        "Provider configured"
    );

    // Provider client, wrapped with request logging
    let service = OpenAIService::new(
        config.api_key.clone().unwrap_or_default(),
        &config.api_base,
        config.model.clone(),
    );
    let chat = Arc::new(LoggingService::new(Arc::new(service)));

    // Create application state and router
    let port = config.port;
    let state = AppState::new(chat, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("RelayChat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
