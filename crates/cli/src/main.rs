use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dashboard::Config;
use dashboard::render::{HISTORY_PLACEHOLDER, RECOMMENDATIONS_PLACEHOLDER, UNKNOWN_GENRE, match_percentage};
use graph_store::{Genre, GraphStore, UserId};
use scoring::{HistoryEntry, HybridScorer, Recommendation};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

const DEFAULT_DATA_DIR: &str = "data/ml-latest-small";

/// MovieMind - hybrid movie recommendations from a rating graph
#[derive(Parser)]
#[command(name = "moviemind")]
#[command(about = "Collaborative filtering plus genre overlap over MovieLens ratings", long_about = None)]
struct Cli {
    /// Path to MovieLens dataset directory [default: data/ml-latest-small]
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "12")]
        limit: usize,

        /// Show the collaborative score and genre overlap behind each row
        #[arg(long)]
        explain: bool,
    },

    /// Show a user's top-rated movies
    History {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Show dataset counts
    Stats,

    /// Run the web dashboard
    Serve {
        /// Host to bind (overrides MOVIEMIND_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides MOVIEMIND_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            explain,
        } => handle_recommend(load_store(cli.data_dir)?, user_id, limit, explain)?,
        Commands::History { user_id } => handle_history(load_store(cli.data_dir)?, user_id)?,
        Commands::Stats => handle_stats(&*load_store(cli.data_dir)?),
        Commands::Serve { host, port } => handle_serve(cli.data_dir, host, port).await?,
    }

    Ok(())
}

fn load_store(data_dir: Option<PathBuf>) -> Result<Arc<GraphStore>> {
    let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    println!("Loading MovieLens dataset from {}...", data_dir.display());
    let start = Instant::now();
    let store = GraphStore::load_from_dir(&data_dir)
        .with_context(|| format!("Failed to load MovieLens dataset from {}", data_dir.display()))?;
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());
    Ok(Arc::new(store))
}

fn validate_user_id(user_id: UserId) -> Result<UserId> {
    anyhow::ensure!(user_id >= 1, "User ID must be at least 1");
    Ok(user_id)
}

/// Handle the 'recommend' command
fn handle_recommend(store: Arc<GraphStore>, user_id: UserId, limit: usize, explain: bool) -> Result<()> {
    let user_id = validate_user_id(user_id)?;
    let scorer = HybridScorer::new(store);

    let start = Instant::now();
    let recommendations = scorer.recommend(user_id, limit);
    info!("Scored user {} in {:?}", user_id, start.elapsed());

    print_recommendations(user_id, &recommendations, explain);
    Ok(())
}

/// Handle the 'history' command
fn handle_history(store: Arc<GraphStore>, user_id: UserId) -> Result<()> {
    let user_id = validate_user_id(user_id)?;
    let history = HybridScorer::new(store).history(user_id);

    print_history(user_id, &history);
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(store: &GraphStore) {
    let (users, movies, ratings) = store.counts();

    println!("{}", "Dataset statistics:".bold().blue());
    println!("{}Users: {}", "• ".green(), users);
    println!("{}Movies: {}", "• ".green(), movies);
    println!("{}Ratings: {}", "• ".green(), ratings);
    println!("{}Genres: {}", "• ".green(), store.genre_count());

    for (genre, movies) in genre_breakdown(store) {
        println!("    {:<12} {}", genre.label(), movies);
    }
}

/// Movies per genre, most populated first
fn genre_breakdown(store: &GraphStore) -> Vec<(Genre, usize)> {
    let mut breakdown: Vec<(Genre, usize)> = store
        .genres()
        .into_iter()
        .map(|genre| (genre, store.get_movies_by_genre(genre).len()))
        .collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    breakdown
}

/// Handle the 'serve' command
async fn handle_serve(data_dir: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = Config::from_env().context("Failed to load dashboard configuration")?;
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    println!(
        "{} Dashboard on http://{} (data: {})",
        "▶".green(),
        config.bind_addr(),
        config.data_dir.display()
    );
    dashboard::run(config).await
}

fn print_recommendations(user_id: UserId, recommendations: &[Recommendation], explain: bool) {
    println!("{}", format!("Top picks for user #{}:", user_id).bold().blue());
    let Some(best) = recommendations.first() else {
        println!("  {}", RECOMMENDATIONS_PLACEHOLDER.dimmed());
        return;
    };

    for (idx, rec) in recommendations.iter().enumerate() {
        let percent = match_percentage(rec.raw_score, best.raw_score);
        println!(
            "{:>3}. {} [{}] {}",
            (idx + 1).to_string().green(),
            rec.title,
            rec.genre.as_deref().unwrap_or(UNKNOWN_GENRE),
            format!("{}%", percent).yellow()
        );
        if explain {
            println!(
                "     raw {:.3} = cf {:.3} + {} matching genre(s)",
                rec.raw_score, rec.cf_score, rec.matching_genres
            );
        }
    }
}

fn print_history(user_id: UserId, history: &[HistoryEntry]) {
    println!("{}", format!("History for user #{}:", user_id).bold().blue());
    if history.is_empty() {
        println!("  {}", HISTORY_PLACEHOLDER.dimmed());
        return;
    }

    for entry in history {
        println!(
            "  {} {} [{}] {}",
            "•".cyan(),
            entry.title,
            entry.genre.as_deref().unwrap_or(UNKNOWN_GENRE),
            format!("{:.1}", entry.rating).yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recommend_defaults() {
        let cli = Cli::try_parse_from(["moviemind", "recommend", "--user-id", "7"]).unwrap();
        assert!(cli.data_dir.is_none());
        match cli.command {
            Commands::Recommend {
                user_id,
                limit,
                explain,
            } => {
                assert_eq!(user_id, 7);
                assert_eq!(limit, 12);
                assert!(!explain);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "moviemind",
            "--data-dir",
            "data/ml-1m",
            "serve",
            "--port",
            "9000",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("data/ml-1m")));
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: Some(9000)
            }
        ));
    }

    #[test]
    fn test_genre_breakdown_counts_movies() {
        let movie = |id, genres| graph_store::Movie {
            id,
            title: format!("Movie {}", id),
            genres,
        };
        let store = GraphStore::from_parts(
            vec![
                movie(1, vec![Genre::Drama, Genre::War]),
                movie(2, vec![Genre::Drama]),
                movie(3, vec![Genre::Comedy]),
                movie(4, vec![]),
            ],
            Vec::new(),
        )
        .unwrap();

        assert_eq!(
            genre_breakdown(&store),
            vec![(Genre::Drama, 2), (Genre::Comedy, 1), (Genre::War, 1)]
        );
    }

    #[test]
    fn test_user_id_zero_is_rejected() {
        assert!(validate_user_id(0).is_err());
        assert_eq!(validate_user_id(3).unwrap(), 3);
    }
}
