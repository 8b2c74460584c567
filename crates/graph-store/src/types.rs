//! Core domain types for the rating graph.
//!
//! Nodes are users, movies and genres; edges are RATED (user -> movie)
//! and IN_GENRE (movie -> genre). Users carry no attributes of their own:
//! a user exists through its outgoing rating edges.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A movie node together with its IN_GENRE edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Genres in dataset order. The first one is used as the display genre.
    pub genres: Vec<Genre>,
}

impl Movie {
    /// The genre shown next to the title, if the movie has any
    pub fn primary_genre(&self) -> Option<Genre> {
        self.genres.first().copied()
    }
}

/// Movie genres used by the MovieLens datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Imax,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {
    /// Label as spelled in the dataset files
    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Children => "Children's",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::FilmNoir => "Film-Noir",
            Genre::Horror => "Horror",
            Genre::Imax => "IMAX",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Rating Type
// =============================================================================

/// A RATED edge from a user to a movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 0.5 to 5.0
    pub rating: f32,
    /// Unix timestamp when rating was made
    pub timestamp: i64,
}

// =============================================================================
// GraphStore - The In-Memory Rating Graph
// =============================================================================

/// Read-only adjacency structure over users, movies, ratings and genres.
///
/// Built once by [`GraphStore::load_from_dir`](crate::GraphStore::load_from_dir)
/// (or by hand in tests) and then shared behind an `Arc`. Every traversal
/// the scorer needs is an O(1) map lookup followed by a slice scan.
#[derive(Debug)]
pub struct GraphStore {
    pub(crate) movies: HashMap<MovieId, Movie>,

    /// Outgoing RATED edges per user, in load order
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
    /// Incoming RATED edges per movie
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,

    /// IN_GENRE edges, reversed (one movie can appear in multiple genre lists)
    pub(crate) genre_index: HashMap<Genre, Vec<MovieId>>,
}

impl GraphStore {
    /// Creates a new, empty GraphStore
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            user_ratings: HashMap::new(),
            movie_ratings: HashMap::new(),
            genre_index: HashMap::new(),
        }
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Get all ratings made by a user
    ///
    /// Returns an empty slice if the user has no ratings
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all ratings for a movie
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all movies in a specific genre
    pub fn get_movies_by_genre(&self, genre: Genre) -> &[MovieId] {
        self.genre_index
            .get(&genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Genres with at least one movie, in enum order
    pub fn genres(&self) -> Vec<Genre> {
        let mut genres: Vec<Genre> = self.genre_index.keys().copied().collect();
        genres.sort_unstable();
        genres
    }

    /// Display genre label of a movie, `None` for unknown or genre-less movies
    pub fn genre_label(&self, movie_id: MovieId) -> Option<String> {
        self.get_movie(movie_id)?
            .primary_genre()
            .map(|g| g.label().to_string())
    }

    /// Insert a movie into the store
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    /// Insert a rating and update both edge indices
    pub fn insert_rating(&mut self, rating: Rating) {
        self.user_ratings
            .entry(rating.user_id)
            .or_default()
            .push(rating);

        self.movie_ratings
            .entry(rating.movie_id)
            .or_default()
            .push(rating);
    }

    /// (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.user_ratings.values().map(|v| v.len()).sum();
        (self.user_ratings.len(), self.movies.len(), total_ratings)
    }

    /// Number of genres with at least one movie
    pub fn genre_count(&self) -> usize {
        self.genre_index.len()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
