//! # Scoring Crate
//!
//! The two queries behind the dashboard, evaluated against the in-memory
//! rating graph from `graph-store`.
//!
//! ## Components
//!
//! ### Hybrid recommendations
//! - Neighbours: users who liked more than two of the same movies (rating
//!   >= 4.0 on both sides) with a cosine similarity above 0.6
//! - Collaborative score: neighbour ratings weighted by similarity
//! - Genre bonus: 0.7 per genre shared with the target's liked movies
//!
//! ### History
//! - The target's five highest-rated movies
//!
//! ## Example Usage
//!
//! ```ignore
//! use scoring::HybridScorer;
//! use graph_store::GraphStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(GraphStore::load_from_dir(path)?);
//! let scorer = HybridScorer::new(store);
//!
//! let history = scorer.history(1);
//! let recommendations = scorer.recommend(1, 12);
//! ```

pub mod config;
pub mod history;
pub mod hybrid;
pub mod neighbors;
pub mod similarity;
pub mod types;
pub mod user_profile;

pub use config::ScoringConfig;
pub use hybrid::HybridScorer;
pub use types::{HistoryEntry, Neighbor, Recommendation, UserProfile};
