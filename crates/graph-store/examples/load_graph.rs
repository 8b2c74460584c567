use graph_store::GraphStore;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/ml-latest-small"));

    println!("Loading MovieLens graph from {}...\n", data_dir.display());

    let start = Instant::now();
    let store = GraphStore::load_from_dir(&data_dir).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (users, movies, ratings) = store.counts();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Movies: {}", movies);
    println!("Ratings: {}", ratings);
    println!("Genres: {}", store.genre_count());
    println!(
        "\nPerformance: {:.0} ratings/second",
        ratings as f64 / elapsed.as_secs_f64()
    );
}
