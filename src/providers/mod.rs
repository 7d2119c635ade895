//! External collaborator abstractions: ratings aggregator and geocoder.
//!
//! Discovery consumes both but must degrade gracefully: a provider failure or
//! absence yields None values on the card, never an error to the member.

use crate::domain::GeoPoint;
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

pub mod http;
pub mod mock;

pub use http::HttpRatingsProvider;
pub use mock::{MockGeocoder, MockRatingsProvider, NoGeocoder, NoRatings};

/// Supplies a trainer's average rating, aggregated elsewhere.
#[async_trait]
pub trait RatingsProvider: Send + Sync {
    /// Average rating for a trainer, or None when the trainer has no ratings.
    async fn average_rating(&self, trainer_id: Uuid) -> Result<Option<f64>, ProviderError>;
}

/// Resolves trainer coordinates. Trainer addresses are not geocoded in the
/// current deployment, so the default implementation yields None and discovery
/// reports distance as unavailable instead of fabricating one.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate_trainer(&self, trainer_id: Uuid) -> Result<Option<GeoPoint>, ProviderError>;
}

/// Error type for collaborator calls.
#[derive(Debug, Clone)]
pub enum ProviderError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (e.g., 429 rate limit, 5xx server error)
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed response)
    ParseError(String),
    /// Rate limit exceeded
    RateLimited,
    /// Other error
    Other(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ProviderError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            ProviderError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ProviderError::RateLimited => write!(f, "Rate limited"),
            ProviderError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}
