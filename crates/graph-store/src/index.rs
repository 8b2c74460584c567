//! GraphStore building and indexing logic.
//!
//! Loading runs in three stages:
//! - parse movies and ratings (in parallel)
//! - insert them into the primary edge indices
//! - build the genre index and validate every rating edge

use crate::error::{Result, StoreError};
use crate::parser;
use crate::types::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lowest rating value the MovieLens datasets use
pub const MIN_RATING: f32 = 0.5;
/// Highest rating value the MovieLens datasets use
pub const MAX_RATING: f32 = 5.0;

/// On-disk layout of a MovieLens directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetLayout {
    /// `movies.csv` + `ratings.csv` (MovieLens "latest")
    Csv,
    /// `movies.dat` + `ratings.dat` (MovieLens 1M)
    Dat,
}

impl DatasetLayout {
    /// Detect which layout a directory holds, preferring csv
    pub fn detect(data_dir: &Path) -> Option<Self> {
        let has = |name: &str| data_dir.join(name).is_file();
        if has("movies.csv") && has("ratings.csv") {
            Some(DatasetLayout::Csv)
        } else if has("movies.dat") && has("ratings.dat") {
            Some(DatasetLayout::Dat)
        } else {
            None
        }
    }

    fn paths(self, data_dir: &Path) -> (PathBuf, PathBuf) {
        match self {
            DatasetLayout::Csv => (data_dir.join("movies.csv"), data_dir.join("ratings.csv")),
            DatasetLayout::Dat => (data_dir.join("movies.dat"), data_dir.join("ratings.dat")),
        }
    }
}

impl GraphStore {
    /// Load a MovieLens dataset directory into a validated GraphStore
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let layout = DatasetLayout::detect(data_dir).ok_or_else(|| StoreError::FileNotFound {
            path: data_dir.display().to_string(),
        })?;
        info!("Loading {:?} dataset from {}", layout, data_dir.display());

        let (movies_path, ratings_path) = layout.paths(data_dir);

        // Rayon's `join` runs both parsers in parallel
        let (movies, ratings) = match layout {
            DatasetLayout::Csv => rayon::join(
                || parser::parse_movies_csv(&movies_path),
                || parser::parse_ratings_csv(&ratings_path),
            ),
            DatasetLayout::Dat => rayon::join(
                || parser::parse_movies_dat(&movies_path),
                || parser::parse_ratings_dat(&ratings_path),
            ),
        };
        let movies = movies?;
        let ratings = ratings?;

        debug!("Parsed {} movies, {} ratings", movies.len(), ratings.len());

        let store = Self::from_parts(movies, ratings)?;

        let (users, movies, ratings) = store.counts();
        info!(
            "Graph loaded: {} users, {} movies, {} ratings, {} genres",
            users,
            movies,
            ratings,
            store.genre_count()
        );
        Ok(store)
    }

    /// Build a validated store from already-parsed nodes and edges
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>) -> Result<Self> {
        let mut store = GraphStore::new();

        for movie in movies {
            store.insert_movie(movie);
        }
        for rating in ratings {
            store.insert_rating(rating);
        }

        store.build_secondary_indices();
        store.validate()?;
        Ok(store)
    }

    /// Build the genre index after movies are inserted
    pub fn build_secondary_indices(&mut self) {
        self.genre_index.clear();
        for (movie_id, movie) in &self.movies {
            for &genre in &movie.genres {
                self.genre_index.entry(genre).or_default().push(*movie_id);
            }
        }
        for movie_ids in self.genre_index.values_mut() {
            movie_ids.sort_unstable();
        }
    }

    /// Validate data integrity
    ///
    /// Every rating must point at a known movie and carry a finite value
    /// within `MIN_RATING..=MAX_RATING`.
    pub fn validate(&self) -> Result<()> {
        for ratings in self.user_ratings.values() {
            for rating in ratings {
                if !self.movies.contains_key(&rating.movie_id) {
                    return Err(StoreError::MissingReference {
                        entity: "Movie".to_string(),
                        id: rating.movie_id,
                    });
                }
                if !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
                    return Err(StoreError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.rating.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn movie(id: MovieId, genres: Vec<Genre>) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            genres,
        }
    }

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: 0,
        }
    }

    #[test]
    fn test_from_parts_builds_genre_index() {
        let store = GraphStore::from_parts(
            vec![
                movie(1, vec![Genre::Action, Genre::SciFi]),
                movie(2, vec![Genre::Action]),
            ],
            vec![rating(1, 1, 4.0)],
        )
        .unwrap();

        assert_eq!(store.get_movies_by_genre(Genre::Action), &[1, 2]);
        assert_eq!(store.get_movies_by_genre(Genre::SciFi), &[1]);
        assert_eq!(store.genre_count(), 2);
        assert_eq!(store.genres(), vec![Genre::Action, Genre::SciFi]);
    }

    #[test]
    fn test_validate_rejects_unknown_movie() {
        let result = GraphStore::from_parts(vec![movie(1, vec![])], vec![rating(1, 42, 4.0)]);
        match result {
            Err(StoreError::MissingReference { entity, id }) => {
                assert_eq!(entity, "Movie");
                assert_eq!(id, 42);
            }
            other => panic!("expected missing reference, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let result = GraphStore::from_parts(vec![movie(1, vec![])], vec![rating(1, 1, 0.0)]);
        assert!(matches!(result, Err(StoreError::InvalidValue { .. })));

        let result = GraphStore::from_parts(vec![movie(1, vec![])], vec![rating(1, 1, 5.5)]);
        assert!(matches!(result, Err(StoreError::InvalidValue { .. })));
    }

    #[test]
    fn test_detect_layout() {
        let dir = TempDir::new().unwrap();
        assert_eq!(DatasetLayout::detect(dir.path()), None);

        fs::write(dir.path().join("movies.dat"), "").unwrap();
        fs::write(dir.path().join("ratings.dat"), "").unwrap();
        assert_eq!(DatasetLayout::detect(dir.path()), Some(DatasetLayout::Dat));

        fs::write(dir.path().join("movies.csv"), "").unwrap();
        fs::write(dir.path().join("ratings.csv"), "").unwrap();
        assert_eq!(DatasetLayout::detect(dir.path()), Some(DatasetLayout::Csv));
    }

    #[test]
    fn test_load_missing_dir_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let result = GraphStore::load_from_dir(&dir.path().join("nope"));
        assert!(matches!(result, Err(StoreError::FileNotFound { .. })));
    }
}
