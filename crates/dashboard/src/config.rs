use serde::Deserialize;
use std::path::PathBuf;

use crate::error::DashboardError;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "MOVIEMIND_";

/// Dashboard configuration loaded from `MOVIEMIND_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// MovieLens dataset directory (CSV or DAT layout)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Recommendations shown per request unless `?limit=` overrides it
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/ml-latest-small")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_recommendation_limit() -> usize {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            host: default_host(),
            port: default_port(),
            recommendation_limit: default_recommendation_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, DashboardError> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| DashboardError::Config(e.to_string()))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, DashboardError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| DashboardError::Config(e.to_string()))
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:8501");
        assert_eq!(config.recommendation_limit, 12);
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = Config::from_vars(vars(&[
            ("MOVIEMIND_DATA_DIR", "/srv/ml-1m"),
            ("MOVIEMIND_PORT", "9000"),
            ("MOVIEMIND_RECOMMENDATION_LIMIT", "20"),
            ("PORT", "1"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/ml-1m"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.recommendation_limit, 20);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let err = Config::from_vars(vars(&[("MOVIEMIND_PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
