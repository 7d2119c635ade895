//! Trainer discovery: exclusion, filtering, ranking, and card decoration.

use crate::db::Repository;
use crate::domain::Trainer;
use crate::engine::discovery::{
    age_on, compare_distances, distance_between, matches_profile, within_radius, DiscoveryFilters,
};
use crate::error::AppError;
use crate::providers::{Geocoder, RatingsProvider};
use chrono::Utc;
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// One candidate in a discovery result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerCard {
    pub id: Uuid,
    pub name: String,
    pub cref: String,
    pub gender: String,
    pub age: i64,
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

pub struct TrainerDiscoveryEngine {
    repo: Arc<Repository>,
    ratings: Arc<dyn RatingsProvider>,
    geocoder: Arc<dyn Geocoder>,
    limit: usize,
}

impl TrainerDiscoveryEngine {
    pub fn new(
        repo: Arc<Repository>,
        ratings: Arc<dyn RatingsProvider>,
        geocoder: Arc<dyn Geocoder>,
        limit: usize,
    ) -> Self {
        Self {
            repo,
            ratings,
            geocoder,
            limit,
        }
    }

    /// Ranked trainer cards for a member, excluding everyone already swiped.
    /// An empty result is a valid outcome, not an error.
    pub async fn search(
        &self,
        user_id: Uuid,
        filters: &DiscoveryFilters,
    ) -> Result<Vec<TrainerCard>, AppError> {
        let today = Utc::now().date_naive();

        let excluded: HashSet<Uuid> = self
            .repo
            .swiped_trainer_ids(user_id)
            .await?
            .into_iter()
            .collect();

        let mut candidates: Vec<(Option<f64>, Trainer, Vec<String>)> = Vec::new();
        for trainer in self.repo.list_trainers().await? {
            if excluded.contains(&trainer.id) {
                continue;
            }

            let service_names: Vec<String> = self
                .repo
                .list_services_for_trainer(trainer.id)
                .await?
                .into_iter()
                .map(|s| s.name)
                .collect();

            if !matches_profile(&trainer, &service_names, filters, today) {
                continue;
            }

            // Distance stays None unless both sides have coordinates; the
            // geocoding collaborator is allowed to be absent or down.
            let location = match self.geocoder.locate_trainer(trainer.id).await {
                Ok(location) => location,
                Err(e) => {
                    warn!(trainer_id = %trainer.id, error = %e, "geocoder lookup failed");
                    None
                }
            };
            let distance = distance_between(filters.origin, location);
            if !within_radius(distance, filters.radius_km) {
                continue;
            }

            candidates.push((distance, trainer, service_names));
        }

        candidates.sort_by(|a, b| compare_distances(a.0, b.0));
        candidates.truncate(self.limit);

        let cards = try_join_all(candidates.into_iter().map(
            |(distance_km, trainer, services)| async move {
                let average_rating = match self.ratings.average_rating(trainer.id).await {
                    Ok(rating) => rating,
                    Err(e) => {
                        warn!(trainer_id = %trainer.id, error = %e, "ratings lookup failed");
                        None
                    }
                };

                Ok::<_, AppError>(TrainerCard {
                    id: trainer.id,
                    name: trainer.name,
                    cref: trainer.cref,
                    age: age_on(trainer.birth_date, today),
                    gender: trainer.gender,
                    services,
                    average_rating,
                    distance_km,
                })
            },
        ))
        .await?;

        Ok(cards)
    }
}
