//! Dashboard crate for the MovieMind recommender.
//!
//! Serves one HTML page (user-id form, history panel, recommendation
//! cards) plus a small JSON API over the same two queries.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod store;

pub use config::Config;
pub use error::{DashboardError, DashboardResult};
pub use routes::{AppState, RecommendationView, create_router};
pub use store::StoreHandle;

use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

/// Run the dashboard until Ctrl-C, then release the graph store
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(StoreHandle::new(config.data_dir.clone()));
    let state = AppState::new(Arc::clone(&store), config.recommendation_limit);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Serving MovieMind dashboard on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    match Arc::try_unwrap(store) {
        Ok(store) => store.close(),
        Err(shared) => warn!(
            "Graph store still referenced ({} handles), dropping without close",
            Arc::strong_count(&shared)
        ),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
