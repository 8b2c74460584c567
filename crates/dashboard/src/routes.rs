use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use graph_store::UserId;
use scoring::{HistoryEntry, HybridScorer, Recommendation, ScoringConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::render::{PageContent, match_percentage, render_page};
use crate::store::StoreHandle;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreHandle>,
    pub recommendation_limit: usize,
    pub scoring: ScoringConfig,
}

impl AppState {
    pub fn new(store: Arc<StoreHandle>, recommendation_limit: usize) -> Self {
        Self {
            store,
            recommendation_limit,
            scoring: ScoringConfig::default(),
        }
    }

    async fn scorer(&self) -> DashboardResult<HybridScorer> {
        let store = self.store.connect().await?;
        Ok(HybridScorer::new(store).with_config(self.scoring.clone()))
    }
}

// ---------- request / response types ----------

/// Raw form input; parsed by hand so bad values still get the page
#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationView {
    pub title: String,
    pub genre: Option<String>,
    pub raw_score: f64,
    pub match_percent: u8,
}

impl RecommendationView {
    /// Attach match percentages relative to the first (best) row
    pub fn from_ranked(recommendations: Vec<Recommendation>) -> Vec<Self> {
        let max_score = recommendations.first().map_or(0.0, |r| r.raw_score);
        recommendations
            .into_iter()
            .map(|r| Self {
                match_percent: match_percentage(r.raw_score, max_score),
                title: r.title,
                genre: r.genre,
                raw_score: r.raw_score,
            })
            .collect()
    }
}

fn validate_user_id(user_id: UserId) -> DashboardResult<UserId> {
    if user_id == 0 {
        return Err(DashboardError::InvalidInput(
            "user id must be at least 1".to_string(),
        ));
    }
    Ok(user_id)
}

fn parse_user_id(raw: &str) -> DashboardResult<UserId> {
    let user_id = raw.trim().parse::<UserId>().map_err(|_| {
        DashboardError::InvalidInput(format!("user id must be a whole number, got {:?}", raw))
    })?;
    validate_user_id(user_id)
}

// ---------- handlers ----------

async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Response {
    let Some(raw) = params.user_id else {
        return Html(render_page(1, &PageContent::Empty)).into_response();
    };

    let user_id = match parse_user_id(&raw) {
        Ok(user_id) => user_id,
        Err(e) => return error_page(1, e),
    };

    match dashboard_content(&state, user_id).await {
        Ok(content) => Html(render_page(user_id, &content)).into_response(),
        Err(e) => error_page(user_id, e),
    }
}

fn error_page(form_user_id: UserId, error: DashboardError) -> Response {
    warn!("Dashboard request failed: {}", error);
    let page = render_page(form_user_id, &PageContent::Error(error.to_string()));
    (error.status(), Html(page)).into_response()
}

async fn dashboard_content(state: &AppState, user_id: UserId) -> DashboardResult<PageContent> {
    let scorer = state.scorer().await?;
    let limit = state.recommendation_limit;

    let (history, recommendations) = tokio::task::spawn_blocking(move || {
        let history = scorer.history(user_id);
        let recommendations = scorer.recommend(user_id, limit);
        (history, recommendations)
    })
    .await?;

    info!(
        "User {}: {} history rows, {} recommendations",
        user_id,
        history.len(),
        recommendations.len()
    );
    Ok(PageContent::Results {
        user_id,
        history,
        recommendations,
    })
}

async fn handle_history(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> DashboardResult<Json<Vec<HistoryEntry>>> {
    let user_id = validate_user_id(user_id)?;
    let scorer = state.scorer().await?;

    let history = tokio::task::spawn_blocking(move || scorer.history(user_id)).await?;
    Ok(Json(history))
}

async fn handle_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Query(params): Query<LimitParams>,
) -> DashboardResult<Json<Vec<RecommendationView>>> {
    let user_id = validate_user_id(user_id)?;
    let limit = params.limit.unwrap_or(state.recommendation_limit);
    let scorer = state.scorer().await?;

    let recommendations =
        tokio::task::spawn_blocking(move || scorer.recommend(user_id, limit)).await?;
    Ok(Json(RecommendationView::from_ranked(recommendations)))
}

async fn handle_health(State(state): State<AppState>) -> DashboardResult<(StatusCode, Json<Value>)> {
    let store = state.store.connect().await?;
    let (users, movies, ratings) = store.counts();
    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "users": users,
            "movies": movies,
            "ratings": ratings,
        })),
    ))
}

// ---------- router ----------

/// Creates the dashboard router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_dashboard))
        .route("/health", get(handle_health))
        .route("/api/users/:id/history", get(handle_history))
        .route("/api/users/:id/recommendations", get(handle_recommendations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(movie_id: u32, raw_score: f64) -> Recommendation {
        Recommendation {
            movie_id,
            title: format!("Movie {}", movie_id),
            genre: None,
            raw_score,
            cf_score: raw_score,
            matching_genres: 0,
        }
    }

    #[test]
    fn test_views_scale_against_first_row() {
        let views = RecommendationView::from_ranked(vec![rec(5, 4.7), rec(6, 4.1)]);
        let percents: Vec<u8> = views.iter().map(|v| v.match_percent).collect();
        assert_eq!(percents, vec![98, 85]);
        assert!(RecommendationView::from_ranked(Vec::new()).is_empty());
    }

    #[test]
    fn test_user_id_zero_is_rejected() {
        assert!(matches!(
            validate_user_id(0),
            Err(DashboardError::InvalidInput(_))
        ));
        assert_eq!(validate_user_id(42).unwrap(), 42);
    }

    #[test]
    fn test_parse_user_id_from_form() {
        assert_eq!(parse_user_id("17").unwrap(), 17);
        assert_eq!(parse_user_id(" 3 ").unwrap(), 3);
        for raw in ["", "abc", "-1", "1.5", "0"] {
            assert!(
                matches!(parse_user_id(raw), Err(DashboardError::InvalidInput(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }
}
