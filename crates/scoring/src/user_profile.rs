//! Build a [`UserProfile`] from the rating graph.

use crate::types::UserProfile;
use graph_store::{GraphStore, UserId};

/// Build the profile of `user_id`
///
/// A user with no ratings yields an empty profile rather than an error:
/// the graph has no user node apart from its edges, so "unknown" and
/// "never rated anything" are the same thing.
pub fn build_user_profile(
    store: &GraphStore,
    user_id: UserId,
    high_rating_threshold: f32,
) -> UserProfile {
    let mut profile = UserProfile::new(user_id);

    for rating in store.get_user_ratings(user_id) {
        profile.rated_movies.insert(rating.movie_id);

        if rating.rating >= high_rating_threshold {
            profile.liked_movies.push((rating.movie_id, rating.rating));

            if let Some(movie) = store.get_movie(rating.movie_id) {
                profile.liked_genres.extend(movie.genres.iter().copied());
            }
        }
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::{Genre, Movie, Rating};

    fn create_test_store() -> GraphStore {
        let mut store = GraphStore::new();

        store.insert_movie(Movie {
            id: 1,
            title: "Action Movie (2000)".to_string(),
            genres: vec![Genre::Action, Genre::Adventure],
        });
        store.insert_movie(Movie {
            id: 2,
            title: "Drama Movie (1995)".to_string(),
            genres: vec![Genre::Drama],
        });
        store.insert_movie(Movie {
            id: 3,
            title: "Action Movie 2 (2005)".to_string(),
            genres: vec![Genre::Action, Genre::SciFi],
        });

        for (movie_id, rating) in [(1, 5.0), (2, 3.0), (3, 4.0)] {
            store.insert_rating(Rating {
                user_id: 1,
                movie_id,
                rating,
                timestamp: 1000000,
            });
        }

        store
    }

    #[test]
    fn test_rated_movies_include_every_rating() {
        let store = create_test_store();
        let profile = build_user_profile(&store, 1, 4.0);

        assert_eq!(profile.user_id, 1);
        assert_eq!(profile.rated_movies.len(), 3);
        assert!(profile.rated_movies.contains(&2));
    }

    #[test]
    fn test_liked_threshold_is_inclusive() {
        let store = create_test_store();
        let profile = build_user_profile(&store, 1, 4.0);

        // 5.0 and exactly 4.0 qualify, 3.0 does not
        assert_eq!(profile.liked_movies, vec![(1, 5.0), (3, 4.0)]);
    }

    #[test]
    fn test_liked_genres_come_from_liked_movies_only() {
        let store = create_test_store();
        let profile = build_user_profile(&store, 1, 4.0);

        let genres: Vec<Genre> = profile.liked_genres.iter().copied().collect();
        assert_eq!(
            genres,
            vec![Genre::Action, Genre::Adventure, Genre::SciFi]
        );
        assert!(!profile.liked_genres.contains(&Genre::Drama));
    }

    #[test]
    fn test_user_without_ratings() {
        let store = create_test_store();
        let profile = build_user_profile(&store, 42, 4.0);

        assert!(profile.is_empty());
        assert!(profile.liked_movies.is_empty());
        assert!(profile.liked_genres.is_empty());
    }
}
