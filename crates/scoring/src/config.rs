//! Tunable thresholds for neighbour discovery and hybrid scoring.

/// Thresholds and weights used by [`HybridScorer`](crate::HybridScorer)
/// and the history lookup.
///
/// Defaults reproduce the dashboard's fixed query: ratings of 4.0 and up
/// count as "liked", a neighbour needs more than 2 co-liked movies and a
/// cosine similarity above 0.6, and each shared genre adds 0.7.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Minimum rating for an edge to count as "liked"
    pub high_rating_threshold: f32,
    /// A neighbour must share strictly more than this many liked movies
    pub min_common_movies: usize,
    /// A neighbour's similarity must be strictly greater than this
    pub similarity_threshold: f64,
    /// Bonus per genre shared with the target's liked movies
    pub genre_weight: f64,
    /// Number of recommendations when the caller does not choose
    pub default_limit: usize,
    /// Number of history rows returned
    pub history_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            high_rating_threshold: 4.0,
            min_common_movies: 2,
            similarity_threshold: 0.6,
            genre_weight: 0.7,
            default_limit: 12,
            history_limit: 5,
        }
    }
}

impl ScoringConfig {
    /// Configure the liked-rating threshold (default: 4.0)
    pub fn with_high_rating_threshold(mut self, threshold: f32) -> Self {
        self.high_rating_threshold = threshold;
        self
    }

    /// Configure the co-liked movie floor (default: 2, compared with `>`)
    pub fn with_min_common_movies(mut self, min: usize) -> Self {
        self.min_common_movies = min;
        self
    }

    /// Configure the similarity floor (default: 0.6, compared with `>`)
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Configure the per-genre bonus (default: 0.7)
    pub fn with_genre_weight(mut self, weight: f64) -> Self {
        self.genre_weight = weight;
        self
    }

    /// Configure the default recommendation count (default: 12)
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Configure the history length (default: 5)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
