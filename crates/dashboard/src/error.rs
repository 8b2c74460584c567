use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors surfaced by the dashboard's handlers
#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Scoring task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DashboardError::Task(_) | DashboardError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            DashboardError::StoreUnavailable("down".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            DashboardError::InvalidInput("user_id".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DashboardError::Config("port".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = DashboardError::InvalidInput("user id must be at least 1".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
