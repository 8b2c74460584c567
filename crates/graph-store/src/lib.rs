//! # Graph Store Crate
//!
//! Loads a MovieLens dataset into an in-memory rating graph.
//!
//! ## Main Components
//!
//! - **types**: Graph nodes and edges (Movie, Rating, Genre, GraphStore)
//! - **parser**: Parse `.dat` and `.csv` files into Rust structs
//! - **index**: Layout detection, index building and validation
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use graph_store::GraphStore;
//! use std::path::Path;
//!
//! let store = GraphStore::load_from_dir(Path::new("data/ml-latest-small"))?;
//! let ratings = store.get_user_ratings(1);
//! println!("User 1 rated {} movies", ratings.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{Result, StoreError};
pub use index::{DatasetLayout, MAX_RATING, MIN_RATING};
pub use types::{Genre, GraphStore, Movie, MovieId, Rating, UserId};
