//! History lookup: a user's top-rated movies.

use crate::types::HistoryEntry;
use graph_store::{GraphStore, Rating, UserId};

/// Up to `limit` of the user's rated movies, highest rating first
///
/// The sort is stable, so equal ratings keep the order in which the
/// edges were loaded.
pub fn user_history(store: &GraphStore, user_id: UserId, limit: usize) -> Vec<HistoryEntry> {
    let mut ratings: Vec<&Rating> = store.get_user_ratings(user_id).iter().collect();
    ratings.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    ratings
        .into_iter()
        .filter_map(|rating| {
            let movie = store.get_movie(rating.movie_id)?;
            Some(HistoryEntry {
                movie_id: movie.id,
                title: movie.title.clone(),
                rating: rating.rating,
                genre: store.genre_label(movie.id),
            })
        })
        .take(limit)
        .collect()
}
