//! Mock collaborators for tests and for deployments without the real services.

use super::{Geocoder, ProviderError, RatingsProvider};
use crate::domain::GeoPoint;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// Ratings provider backed by a fixed map.
#[derive(Debug, Clone, Default)]
pub struct MockRatingsProvider {
    ratings: HashMap<Uuid, f64>,
}

impl MockRatingsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rating(mut self, trainer_id: Uuid, rating: f64) -> Self {
        self.ratings.insert(trainer_id, rating);
        self
    }
}

#[async_trait]
impl RatingsProvider for MockRatingsProvider {
    async fn average_rating(&self, trainer_id: Uuid) -> Result<Option<f64>, ProviderError> {
        Ok(self.ratings.get(&trainer_id).copied())
    }
}

/// Ratings provider for deployments without an aggregator configured.
#[derive(Debug, Clone, Default)]
pub struct NoRatings;

#[async_trait]
impl RatingsProvider for NoRatings {
    async fn average_rating(&self, _trainer_id: Uuid) -> Result<Option<f64>, ProviderError> {
        Ok(None)
    }
}

/// Geocoder backed by a fixed map of trainer coordinates.
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    locations: HashMap<Uuid, GeoPoint>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, trainer_id: Uuid, point: GeoPoint) -> Self {
        self.locations.insert(trainer_id, point);
        self
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn locate_trainer(&self, trainer_id: Uuid) -> Result<Option<GeoPoint>, ProviderError> {
        Ok(self.locations.get(&trainer_id).copied())
    }
}

/// Production default: trainer addresses are not geocoded yet, so every lookup
/// resolves to None and discovery reports distance as unavailable.
#[derive(Debug, Clone, Default)]
pub struct NoGeocoder;

#[async_trait]
impl Geocoder for NoGeocoder {
    async fn locate_trainer(&self, _trainer_id: Uuid) -> Result<Option<GeoPoint>, ProviderError> {
        Ok(None)
    }
}
