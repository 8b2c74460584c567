//! Neighbour discovery: "users who liked what you liked, the same way".
//!
//! ## Algorithm
//! 1. For each movie the target liked (rating >= threshold), walk its
//!    incoming RATED edges and keep other users who also liked it
//! 2. Collect, per other user, the position-aligned pair of rating vectors
//!    (target rating, other rating) over those co-liked movies
//! 3. Keep users with strictly more than `min_common_movies` co-liked movies
//! 4. Keep users whose cosine similarity is strictly above the threshold;
//!    an undefined similarity (zero norm) disqualifies the user

use crate::config::ScoringConfig;
use crate::similarity::{cosine_similarity, exceeds_threshold};
use crate::types::{Neighbor, UserProfile};
use graph_store::{GraphStore, UserId};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Rating vectors of the target and one other user over their co-liked movies
#[derive(Debug, Default)]
struct CoRatings {
    target: Vec<f64>,
    other: Vec<f64>,
}

/// Find the neighbours of the profile's user, ordered by user id
pub fn find_neighbors(
    store: &GraphStore,
    profile: &UserProfile,
    config: &ScoringConfig,
) -> Vec<Neighbor> {
    let co_ratings = collect_co_ratings(store, profile, config);
    let scanned = co_ratings.len();

    let mut eligible: Vec<(UserId, CoRatings)> = co_ratings
        .into_iter()
        .filter(|(_, pair)| pair.target.len() > config.min_common_movies)
        .collect();
    eligible.sort_unstable_by_key(|(user_id, _)| *user_id);
    let enough_overlap = eligible.len();

    let neighbors: Vec<Neighbor> = eligible
        .par_iter()
        .filter_map(|(user_id, pair)| {
            let similarity = cosine_similarity(&pair.target, &pair.other)?;
            exceeds_threshold(similarity, config.similarity_threshold).then_some(Neighbor {
                user_id: *user_id,
                common_movies: pair.target.len(),
                similarity,
            })
        })
        .collect();

    debug!(
        "User {}: {} co-raters, {} with enough overlap, {} neighbours",
        profile.user_id,
        scanned,
        enough_overlap,
        neighbors.len()
    );
    neighbors
}

/// Build the co-liked rating vectors for every other user
///
/// The per-movie scan runs in parallel; `collect` keeps the liked-movie
/// order so vector positions line up the same way on every run.
fn collect_co_ratings(
    store: &GraphStore,
    profile: &UserProfile,
    config: &ScoringConfig,
) -> HashMap<UserId, CoRatings> {
    let per_movie: Vec<Vec<(UserId, f64, f64)>> = profile
        .liked_movies
        .par_iter()
        .map(|&(movie_id, target_rating)| {
            store
                .get_movie_ratings(movie_id)
                .iter()
                .filter(|r| {
                    r.user_id != profile.user_id && r.rating >= config.high_rating_threshold
                })
                .map(|r| (r.user_id, f64::from(target_rating), f64::from(r.rating)))
                .collect()
        })
        .collect();

    let mut co_ratings: HashMap<UserId, CoRatings> = HashMap::new();
    for (user_id, target_rating, other_rating) in per_movie.into_iter().flatten() {
        let entry = co_ratings.entry(user_id).or_default();
        entry.target.push(target_rating);
        entry.other.push(other_rating);
    }
    co_ratings
}
