//! Result rows and the per-request user profile.

use graph_store::{Genre, MovieId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// One ranked recommendation row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    /// First genre of the movie, `None` if it has none
    pub genre: Option<String>,
    /// `cf_score + matching_genres * genre_weight`
    pub raw_score: f64,
    /// Sum of neighbour rating times neighbour similarity
    pub cf_score: f64,
    /// Distinct genres shared with the target's liked movies
    pub matching_genres: u32,
}

/// One row of a user's rating history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub movie_id: MovieId,
    pub title: String,
    pub rating: f32,
    pub genre: Option<String>,
}

/// A user whose taste is close enough to the target's to contribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user_id: UserId,
    /// Movies both users rated at or above the liked threshold
    pub common_movies: usize,
    /// Cosine similarity over the co-liked ratings
    pub similarity: f64,
}

/// What the scorer needs to know about the target user
///
/// Gathered once per request so the neighbour scan and the genre bonus do
/// not re-walk the target's edges.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub user_id: UserId,
    /// Every movie the user rated, at any value
    pub rated_movies: HashSet<MovieId>,
    /// Movies rated at or above the liked threshold, with the rating, in load order
    pub liked_movies: Vec<(MovieId, f32)>,
    /// Genres of the liked movies
    pub liked_genres: BTreeSet<Genre>,
}

impl UserProfile {
    /// Create an empty profile
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// True when the user has no rating edges at all
    pub fn is_empty(&self) -> bool {
        self.rated_movies.is_empty()
    }
}
