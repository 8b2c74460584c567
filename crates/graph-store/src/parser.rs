//! Parsers for MovieLens data files.
//!
//! Two layouts are supported:
//! - MovieLens 1M `.dat` files, `::`-separated, ISO-8859-1 encoded:
//!   - movies.dat: movieId::title::genres
//!   - ratings.dat: userId::movieId::rating::timestamp
//! - MovieLens "latest" `.csv` files with a header row and quoted titles:
//!   - movies.csv: movieId,title,genres
//!   - ratings.csv: userId,movieId,rating,timestamp
//!
//! Genres are pipe-separated in both layouts: "Animation|Children's|Comedy".

use crate::error::{Result, StoreError};
use crate::types::*;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Marker the csv layout uses for movies without any genre
const NO_GENRES: &str = "(no genres listed)";

/// Read a file with ISO-8859-1 encoding (Latin-1)
///
/// Each byte maps directly to the Unicode code point of the same value.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Name used in error messages for a path
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Take the next field out of a split line, or report which one is missing
fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    file: &str,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    parts.next().ok_or_else(|| StoreError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {}", name),
    })
}

/// Parse a numeric field, attaching file/line context on failure
fn parse_number<T>(value: &str, file: &str, line: usize, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| StoreError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {}: {}", name, e),
    })
}

/// Fetch a column from a csv record
fn record_field<'a>(
    record: &'a StringRecord,
    index: usize,
    file: &str,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    record.get(index).ok_or_else(|| StoreError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {}", name),
    })
}

// =============================================================================
// `::` layout
// =============================================================================

/// Parse a `movies.dat` file
///
/// Format: movieId::title::genres
pub fn parse_movies_dat(path: &Path) -> Result<Vec<Movie>> {
    let file = file_label(path);
    let lines = read_lines_latin1(path)?;
    let mut movies = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split("::");
        let movie_id = next_field(&mut parts, &file, line_no, "movieId")?;
        let title = next_field(&mut parts, &file, line_no, "title")?;
        let genres_str = next_field(&mut parts, &file, line_no, "genres")?;

        movies.push(Movie {
            id: parse_number(movie_id, &file, line_no, "movieId")?,
            title: title.to_string(),
            genres: parse_genres(genres_str)?,
        });
    }
    Ok(movies)
}

/// Parse a `ratings.dat` file
///
/// Format: userId::movieId::rating::timestamp
pub fn parse_ratings_dat(path: &Path) -> Result<Vec<Rating>> {
    let file = file_label(path);
    let lines = read_lines_latin1(path)?;
    let mut ratings = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split("::");
        let user_id = next_field(&mut parts, &file, line_no, "userId")?;
        let movie_id = next_field(&mut parts, &file, line_no, "movieId")?;
        let rating_value = next_field(&mut parts, &file, line_no, "rating")?;
        let timestamp = next_field(&mut parts, &file, line_no, "timestamp")?;

        ratings.push(Rating {
            user_id: parse_number(user_id, &file, line_no, "userId")?,
            movie_id: parse_number(movie_id, &file, line_no, "movieId")?,
            rating: parse_number(rating_value, &file, line_no, "rating")?,
            timestamp: parse_number(timestamp, &file, line_no, "timestamp")?,
        });
    }
    Ok(ratings)
}

// =============================================================================
// `.csv` layout
// =============================================================================

/// Parse a `movies.csv` file
///
/// Format: movieId,title,genres (header row, titles may be quoted)
pub fn parse_movies_csv(path: &Path) -> Result<Vec<Movie>> {
    let file = file_label(path);
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut movies = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // +2: header row plus 1-based numbering
        let line_no = idx + 2;

        let movie_id = record_field(&record, 0, &file, line_no, "movieId")?;
        let title = record_field(&record, 1, &file, line_no, "title")?;
        let genres_str = record_field(&record, 2, &file, line_no, "genres")?;

        movies.push(Movie {
            id: parse_number(movie_id, &file, line_no, "movieId")?,
            title: title.trim().to_string(),
            genres: parse_genres(genres_str)?,
        });
    }
    Ok(movies)
}

/// Parse a `ratings.csv` file
///
/// Format: userId,movieId,rating,timestamp (header row)
pub fn parse_ratings_csv(path: &Path) -> Result<Vec<Rating>> {
    let file = file_label(path);
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut ratings = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line_no = idx + 2;

        let user_id = record_field(&record, 0, &file, line_no, "userId")?;
        let movie_id = record_field(&record, 1, &file, line_no, "movieId")?;
        let rating_value = record_field(&record, 2, &file, line_no, "rating")?;
        let timestamp = record_field(&record, 3, &file, line_no, "timestamp")?;

        ratings.push(Rating {
            user_id: parse_number(user_id, &file, line_no, "userId")?,
            movie_id: parse_number(movie_id, &file, line_no, "movieId")?,
            rating: parse_number(rating_value, &file, line_no, "rating")?,
            timestamp: parse_number(timestamp, &file, line_no, "timestamp")?,
        });
    }
    Ok(ratings)
}

// =============================================================================
// Genres
// =============================================================================

/// Parse a genre label into a Genre
///
/// Accepts both "Children's" (1M) and "Children" (latest).
fn parse_genre(s: &str) -> Result<Genre> {
    match s {
        "Action" => Ok(Genre::Action),
        "Adventure" => Ok(Genre::Adventure),
        "Animation" => Ok(Genre::Animation),
        "Children's" | "Children" => Ok(Genre::Children),
        "Comedy" => Ok(Genre::Comedy),
        "Crime" => Ok(Genre::Crime),
        "Documentary" => Ok(Genre::Documentary),
        "Drama" => Ok(Genre::Drama),
        "Fantasy" => Ok(Genre::Fantasy),
        "Film-Noir" => Ok(Genre::FilmNoir),
        "Horror" => Ok(Genre::Horror),
        "IMAX" => Ok(Genre::Imax),
        "Musical" => Ok(Genre::Musical),
        "Mystery" => Ok(Genre::Mystery),
        "Romance" => Ok(Genre::Romance),
        "Sci-Fi" => Ok(Genre::SciFi),
        "Thriller" => Ok(Genre::Thriller),
        "War" => Ok(Genre::War),
        "Western" => Ok(Genre::Western),
        _ => Err(StoreError::InvalidValue {
            field: "genre".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parse pipe-separated genres, keeping dataset order
///
/// Example: "Action|Adventure|Sci-Fi" -> vec![Genre::Action, Genre::Adventure, Genre::SciFi]
fn parse_genres(s: &str) -> Result<Vec<Genre>> {
    let s = s.trim();
    if s.is_empty() || s == NO_GENRES {
        return Ok(Vec::new());
    }
    s.split('|').map(|g| parse_genre(g.trim())).collect()
}
