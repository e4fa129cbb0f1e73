// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, sync::Mutex};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_refresher::DashboardRefresher;
use crate::application::tile_container::TileContainer;
use crate::application::view_switcher::ViewSwitcher;
use crate::infrastructure::config::load_console_config;
use crate::infrastructure::container::SharedContainer;
use crate::infrastructure::http_feed_source::HttpFeedSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{console_page, health_check, navigate};
use crate::presentation::markup::HtmlTileRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let console = load_console_config()?;

    // Feed client and render target (infrastructure layer)
    let source = Arc::new(HttpFeedSource::new(
        &console.endpoints.base_url,
        &console.endpoints.streams_path,
        &console.endpoints.metrics_path,
        console.refresh.request_timeout(),
    )?);
    let container: Arc<dyn TileContainer> =
        Arc::new(SharedContainer::new(console.render.container_id.clone()));

    // Refresh loop and view state (application layer)
    let refresher = Arc::new(DashboardRefresher::new(
        source,
        container.clone(),
        Arc::new(HtmlTileRenderer),
    ));
    let refresh = refresher.clone().start(console.refresh.interval());
    let switcher = ViewSwitcher::new(
        console.navigation.bindings.clone(),
        &console.navigation.default_view,
    )?;

    let state = Arc::new(AppState {
        refresher,
        container,
        switcher: Arc::new(Mutex::new(switcher)),
        host_view: console.render.host_view.clone(),
        reload_every: console.refresh.interval(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(console_page))
        .route("/healthz", get(health_check))
        .route("/nav/:control_id", get(navigate))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = console.server.bind.parse()?;
    tracing::info!(
        %addr,
        feeds = %console.endpoints.base_url,
        "starting qstreams console"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
