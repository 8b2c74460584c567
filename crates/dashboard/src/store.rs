//! Process-wide handle to the graph store.
//!
//! The store is loaded lazily on the first request that needs it. Whatever
//! the first load produced, the loaded store or the error, is kept for the
//! life of the process; a failed load is not retried.

use graph_store::GraphStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::error::DashboardError;

type LoadOutcome = Result<Arc<GraphStore>, String>;

#[derive(Debug)]
pub struct StoreHandle {
    data_dir: PathBuf,
    cell: OnceCell<LoadOutcome>,
}

impl StoreHandle {
    /// Create an unconnected handle for a dataset directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cell: OnceCell::new(),
        }
    }

    #[cfg(test)]
    fn preloaded(store: Arc<GraphStore>) -> Self {
        Self {
            data_dir: PathBuf::new(),
            cell: OnceCell::new_with(Some(Ok(store))),
        }
    }

    /// Return the store, loading it on first use
    ///
    /// Concurrent first callers wait on the same load.
    pub async fn connect(&self) -> Result<Arc<GraphStore>, DashboardError> {
        let outcome = self
            .cell
            .get_or_init(|| async {
                let data_dir = self.data_dir.clone();
                info!("Loading graph store from {}", data_dir.display());

                let loaded =
                    tokio::task::spawn_blocking(move || GraphStore::load_from_dir(&data_dir)).await;
                match loaded {
                    Ok(Ok(store)) => Ok(Arc::new(store)),
                    Ok(Err(e)) => {
                        error!("Failed to load graph store: {}", e);
                        Err(e.to_string())
                    }
                    Err(e) => {
                        error!("Graph store loader panicked: {}", e);
                        Err(format!("loader task failed: {}", e))
                    }
                }
            })
            .await;

        outcome.clone().map_err(DashboardError::StoreUnavailable)
    }

    /// True once a load has succeeded
    pub fn is_connected(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    /// Release the store
    pub fn close(self) {
        match self.cell.into_inner() {
            Some(Ok(store)) => {
                let (users, movies, ratings) = store.counts();
                drop(store);
                info!(
                    "Graph store closed ({} users, {} movies, {} ratings released)",
                    users, movies, ratings
                );
            }
            Some(Err(_)) => info!("Graph store closed (never loaded successfully)"),
            None => info!("Graph store closed (never opened)"),
        }
    }
}
