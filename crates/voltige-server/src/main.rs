mod api;
mod middleware;
mod sessions;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use voltige_storefront::StorefrontClient;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    sessions::SessionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(voltige_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let storefront = StorefrontClient::from_config(&config)?.map(Arc::new);
    if storefront.is_none() {
        tracing::warn!("no storefront configured; the gateway serves the demo catalog");
    }

    let state = AppState {
        config: Arc::clone(&config),
        storefront,
        sessions: SessionStore::default(),
    };
    let app = build_app(state, default_rate_limit_state());

    tracing::info!(addr = %config.bind_addr, env = %config.env, "voltige gateway listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
