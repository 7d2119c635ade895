//! HTTP client for the external ratings aggregator.

use super::{ProviderError, RatingsProvider};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Ratings provider calling the aggregator's REST API with retry/backoff.
#[derive(Debug, Clone)]
pub struct HttpRatingsProvider {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RatingResponse {
    average: Option<f64>,
}

impl HttpRatingsProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get_rating(&self, trainer_id: Uuid) -> Result<Option<f64>, ProviderError> {
        let url = format!("{}/trainers/{}/rating", self.base_url, trainer_id);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(10)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self.client.get(&url).send().await.map_err(|e| {
                backoff::Error::transient(ProviderError::NetworkError(e.to_string()))
            })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(ProviderError::RateLimited));
            }
            if status == 404 {
                // Unrated trainer, not an error.
                return Ok(None);
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(ProviderError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(ProviderError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            let body = response.json::<RatingResponse>().await.map_err(|e| {
                backoff::Error::permanent(ProviderError::ParseError(e.to_string()))
            })?;

            debug!(%trainer_id, average = ?body.average, "fetched trainer rating");
            Ok(body.average)
        })
        .await
    }
}

#[async_trait]
impl RatingsProvider for HttpRatingsProvider {
    async fn average_rating(&self, trainer_id: Uuid) -> Result<Option<f64>, ProviderError> {
        self.get_rating(trainer_id).await
    }
}
