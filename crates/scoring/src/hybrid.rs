//! Hybrid scorer: collaborative filtering plus a genre-overlap bonus.
//!
//! ## Algorithm
//! 1. Build the target's profile (rated movies, liked movies, liked genres)
//! 2. Find neighbours (see [`crate::neighbors`])
//! 3. For every movie a neighbour rated and the target did not:
//!    `cf_score += neighbour_rating * neighbour_similarity`
//! 4. `matching_genres` = distinct genres the candidate shares with the
//!    target's liked movies
//! 5. `raw_score = cf_score + matching_genres * genre_weight`
//! 6. Sort by `raw_score` descending (ties: lower movie id first), keep `limit`

use crate::config::ScoringConfig;
use crate::history::user_history;
use crate::neighbors::find_neighbors;
use crate::types::{HistoryEntry, Neighbor, Recommendation, UserProfile};
use crate::user_profile::build_user_profile;
use graph_store::{Genre, GraphStore, MovieId, UserId};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Runs both dashboard queries against a shared, read-only [`GraphStore`]
#[derive(Debug, Clone)]
pub struct HybridScorer {
    store: Arc<GraphStore>,
    config: ScoringConfig,
}

impl HybridScorer {
    /// Create a scorer with the default thresholds
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self {
            store,
            config: ScoringConfig::default(),
        }
    }

    /// Replace the thresholds
    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        &self.store
    }

    /// Top `limit` recommendations for `user_id`
    ///
    /// An empty result is a valid answer: the user has no ratings, no
    /// neighbour passed the thresholds, or the neighbours rated nothing new.
    #[instrument(skip(self))]
    pub fn recommend(&self, user_id: UserId, limit: usize) -> Vec<Recommendation> {
        let profile = build_user_profile(&self.store, user_id, self.config.high_rating_threshold);
        if profile.is_empty() || limit == 0 {
            debug!("No ratings for user {} (or zero limit)", user_id);
            return Vec::new();
        }

        let neighbors = find_neighbors(&self.store, &profile, &self.config);
        if neighbors.is_empty() {
            return Vec::new();
        }

        let cf_scores = self.collaborative_scores(&neighbors, &profile);
        debug!("Scoring {} candidate movies", cf_scores.len());

        let mut recommendations: Vec<Recommendation> = cf_scores
            .into_iter()
            .filter_map(|(movie_id, cf_score)| self.score_candidate(movie_id, cf_score, &profile))
            .collect();

        rank_recommendations(&mut recommendations, limit);
        debug!("Returning {} recommendations", recommendations.len());
        recommendations
    }

    /// Recommendations with the configured default limit
    pub fn recommend_default(&self, user_id: UserId) -> Vec<Recommendation> {
        self.recommend(user_id, self.config.default_limit)
    }

    /// The user's top-rated movies (history panel)
    #[instrument(skip(self))]
    pub fn history(&self, user_id: UserId) -> Vec<HistoryEntry> {
        user_history(&self.store, user_id, self.config.history_limit)
    }

    /// Sum of `rating * similarity` per unrated movie
    ///
    /// Contributions are computed per neighbour in parallel and summed in
    /// neighbour order, so the floating-point result is the same on every run.
    fn collaborative_scores(
        &self,
        neighbors: &[Neighbor],
        profile: &UserProfile,
    ) -> HashMap<MovieId, f64> {
        let contributions: Vec<Vec<(MovieId, f64)>> = neighbors
            .par_iter()
            .map(|neighbor| {
                self.store
                    .get_user_ratings(neighbor.user_id)
                    .iter()
                    .filter(|r| !profile.rated_movies.contains(&r.movie_id))
                    .map(|r| (r.movie_id, f64::from(r.rating) * neighbor.similarity))
                    .collect()
            })
            .collect();

        let mut scores: HashMap<MovieId, f64> = HashMap::new();
        for (movie_id, contribution) in contributions.into_iter().flatten() {
            *scores.entry(movie_id).or_insert(0.0) += contribution;
        }
        scores
    }

    fn score_candidate(
        &self,
        movie_id: MovieId,
        cf_score: f64,
        profile: &UserProfile,
    ) -> Option<Recommendation> {
        let movie = self.store.get_movie(movie_id)?;
        let matching_genres = count_matching_genres(&movie.genres, &profile.liked_genres);

        Some(Recommendation {
            movie_id,
            title: movie.title.clone(),
            genre: self.store.genre_label(movie_id),
            raw_score: cf_score + f64::from(matching_genres) * self.config.genre_weight,
            cf_score,
            matching_genres,
        })
    }
}

/// Number of distinct genres of a candidate that the target also liked
pub fn count_matching_genres(genres: &[Genre], liked_genres: &BTreeSet<Genre>) -> u32 {
    let shared: BTreeSet<Genre> = genres
        .iter()
        .copied()
        .filter(|g| liked_genres.contains(g))
        .collect();
    shared.len() as u32
}

/// Sort by `raw_score` descending, lower movie id first on ties, then truncate
pub fn rank_recommendations(recommendations: &mut Vec<Recommendation>, limit: usize) {
    recommendations.sort_by(|a, b| {
        b.raw_score
            .total_cmp(&a.raw_score)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    recommendations.truncate(limit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;
    use graph_store::{Movie, Rating};

    fn rate(store: &mut GraphStore, user_id: UserId, movie_id: MovieId, rating: f32) {
        store.insert_rating(Rating {
            user_id,
            movie_id,
            rating,
            timestamp: 1000000,
        });
    }

    /// Target user 1 likes 1, 2, 3 and rated 4 poorly.
    /// User 2 shares 1, 2, 3 with identical ratings and also rated 4, 5, 6.
    /// User 3 shares only 1, 2. User 4 rated 1, 2, 3 below the liked threshold.
    fn create_test_store() -> GraphStore {
        let mut store = GraphStore::new();
        let movies = [
            (1, vec![Genre::Action]),
            (2, vec![Genre::Comedy]),
            (3, vec![Genre::Action, Genre::Drama]),
            (4, vec![Genre::Horror]),
            (5, vec![Genre::Horror, Genre::Action]),
            (6, vec![Genre::Comedy, Genre::Drama, Genre::Action]),
            (7, vec![Genre::Action]),
            (8, vec![Genre::War]),
        ];
        for (id, genres) in movies {
            store.insert_movie(Movie {
                id,
                title: format!("Movie {}", id),
                genres,
            });
        }

        rate(&mut store, 1, 1, 5.0);
        rate(&mut store, 1, 2, 4.0);
        rate(&mut store, 1, 3, 5.0);
        rate(&mut store, 1, 4, 2.0);

        rate(&mut store, 2, 1, 5.0);
        rate(&mut store, 2, 2, 4.0);
        rate(&mut store, 2, 3, 5.0);
        rate(&mut store, 2, 4, 5.0);
        rate(&mut store, 2, 5, 4.0);
        rate(&mut store, 2, 6, 2.0);

        rate(&mut store, 3, 1, 5.0);
        rate(&mut store, 3, 2, 5.0);
        rate(&mut store, 3, 7, 5.0);

        rate(&mut store, 4, 1, 3.0);
        rate(&mut store, 4, 2, 3.0);
        rate(&mut store, 4, 3, 3.0);
        rate(&mut store, 4, 8, 5.0);

        store
    }

    fn scorer() -> HybridScorer {
        HybridScorer::new(Arc::new(create_test_store()))
    }

    #[test]
    fn test_recommend_scores_and_order() {
        let recs = scorer().recommend(1, 12);

        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![5, 6]);

        // Movie 5: 4.0 * 1.0 + 1 shared genre (Action) * 0.7
        assert!((recs[0].cf_score - 4.0).abs() < 1e-9);
        assert_eq!(recs[0].matching_genres, 1);
        assert!((recs[0].raw_score - 4.7).abs() < 1e-9);

        // Movie 6: 2.0 * 1.0 + 3 shared genres * 0.7, despite the low rating
        assert_eq!(recs[1].matching_genres, 3);
        assert!((recs[1].raw_score - 4.1).abs() < 1e-9);
        assert_eq!(recs[1].genre.as_deref(), Some("Comedy"));
    }

    #[test]
    fn test_recommend_skips_already_rated() {
        let recs = scorer().recommend(1, 12);
        // Movie 4 was rated 2.0 by the target; rated at any value means seen
        assert!(recs.iter().all(|r| ![1, 2, 3, 4].contains(&r.movie_id)));
    }

    #[test]
    fn test_recommend_ignores_non_neighbors() {
        let recs = scorer().recommend(1, 12);
        // 7 only comes from user 3 (2 co-liked), 8 only from user 4 (none)
        assert!(recs.iter().all(|r| r.movie_id != 7 && r.movie_id != 8));
    }

    #[test]
    fn test_third_common_movie_makes_neighbor_eligible() {
        let mut store = create_test_store();
        rate(&mut store, 3, 3, 5.0);
        let recs = HybridScorer::new(Arc::new(store)).recommend(1, 12);

        assert!(recs.iter().any(|r| r.movie_id == 7));
    }

    #[test]
    fn test_similarity_equal_to_threshold_is_excluded() {
        let exact = cosine_similarity(&[5.0, 4.0, 5.0], &[5.0, 4.0, 5.0]).unwrap();
        let store = Arc::new(create_test_store());

        let at_threshold = HybridScorer::new(Arc::clone(&store))
            .with_config(ScoringConfig::default().with_similarity_threshold(exact));
        assert!(at_threshold.recommend(1, 12).is_empty());

        let below_threshold = HybridScorer::new(store)
            .with_config(ScoringConfig::default().with_similarity_threshold(exact - 0.01));
        assert_eq!(below_threshold.recommend(1, 12).len(), 2);
    }

    #[test]
    fn test_limit_truncates() {
        let recs = scorer().recommend(1, 1);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie_id, 5);

        assert!(scorer().recommend(1, 0).is_empty());
    }

    #[test]
    fn test_user_without_ratings_gets_nothing() {
        let scorer = scorer();
        assert!(scorer.recommend(99, 12).is_empty());
        assert!(scorer.history(99).is_empty());
    }

    #[test]
    fn test_history_uses_configured_limit() {
        let scorer = scorer().with_config(ScoringConfig::default().with_history_limit(2));
        let history = scorer.history(1);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].rating, 5.0);
    }

    #[test]
    fn test_count_matching_genres_is_distinct() {
        let liked: BTreeSet<Genre> = [Genre::Action, Genre::Drama].into_iter().collect();
        assert_eq!(
            count_matching_genres(&[Genre::Action, Genre::Action, Genre::Drama], &liked),
            2
        );
        assert_eq!(count_matching_genres(&[Genre::War], &liked), 0);
    }

    #[test]
    fn test_rank_breaks_ties_by_movie_id() {
        let rec = |movie_id, raw_score| Recommendation {
            movie_id,
            title: String::new(),
            genre: None,
            raw_score,
            cf_score: raw_score,
            matching_genres: 0,
        };
        let mut recs = vec![rec(9, 1.0), rec(3, 2.0), rec(4, 1.0)];
        rank_recommendations(&mut recs, 10);

        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![3, 4, 9]);
    }
}
