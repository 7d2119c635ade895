use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Base URL of the external ratings aggregator. None disables ratings.
    pub ratings_api_url: Option<String>,
    /// Maximum number of trainer cards returned per discovery call.
    pub discovery_limit: usize,
    /// Default window for time-based (conditioning) goals without a deadline.
    pub conditioning_window_days: i64,
    /// Workouts required within the rolling week for the week-streak unlock.
    pub week_streak_target: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let ratings_api_url = env_map
            .get("RATINGS_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let discovery_limit = env_map
            .get("DISCOVERY_LIMIT")
            .map(|s| s.as_str())
            .unwrap_or("20")
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "DISCOVERY_LIMIT".to_string(),
                    "must be a valid usize".to_string(),
                )
            })?;

        let conditioning_window_days = env_map
            .get("CONDITIONING_WINDOW_DAYS")
            .map(|s| s.as_str())
            .unwrap_or("90")
            .parse::<i64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "CONDITIONING_WINDOW_DAYS".to_string(),
                    "must be a valid i64".to_string(),
                )
            })?;
        if conditioning_window_days <= 0 {
            return Err(ConfigError::InvalidValue(
                "CONDITIONING_WINDOW_DAYS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let week_streak_target = env_map
            .get("WEEK_STREAK_TARGET")
            .map(|s| s.as_str())
            .unwrap_or("5")
            .parse::<i64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "WEEK_STREAK_TARGET".to_string(),
                    "must be a valid i64".to_string(),
                )
            })?;
        if week_streak_target <= 0 {
            return Err(ConfigError::InvalidValue(
                "WEEK_STREAK_TARGET".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Config {
            port,
            database_path,
            ratings_api_url,
            discovery_limit,
            conditioning_window_days,
            week_streak_target,
        })
    }
}
