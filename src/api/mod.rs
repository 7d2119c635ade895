pub mod achievements;
pub mod contracts;
pub mod discovery;
pub mod goals;
pub mod health;
pub mod swipes;
pub mod weights;
pub mod workouts;

use crate::config::Config;
use crate::db::Repository;
use crate::error::AppError;
use crate::providers::{Geocoder, RatingsProvider};
use crate::services::{
    AchievementEngine, ContractNegotiator, GoalProgressService, SwipeLedger,
    TrainerDiscoveryEngine, WeightLedger,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub progress: Arc<GoalProgressService>,
    pub achievements: Arc<AchievementEngine>,
    pub discovery: Arc<TrainerDiscoveryEngine>,
    pub swipes: Arc<SwipeLedger>,
    pub contracts: Arc<ContractNegotiator>,
    pub weights: Arc<WeightLedger>,
}

impl AppState {
    pub fn new(
        repo: Arc<Repository>,
        config: &Config,
        ratings: Arc<dyn RatingsProvider>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            progress: Arc::new(GoalProgressService::new(
                repo.clone(),
                config.conditioning_window_days,
            )),
            achievements: Arc::new(AchievementEngine::new(
                repo.clone(),
                config.week_streak_target,
            )),
            discovery: Arc::new(TrainerDiscoveryEngine::new(
                repo.clone(),
                ratings,
                geocoder,
                config.discovery_limit,
            )),
            swipes: Arc::new(SwipeLedger::new(repo.clone())),
            contracts: Arc::new(ContractNegotiator::new(repo.clone())),
            weights: Arc::new(WeightLedger::new(repo.clone())),
            repo,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/goals/:goal_id/progress", get(goals::get_goal_progress))
        .route("/v1/weights", post(weights::post_weight))
        .route("/v1/workouts", post(workouts::post_workout))
        .route(
            "/v1/workouts/:workout_id/complete",
            post(workouts::post_complete_workout),
        )
        .route("/v1/achievements", get(achievements::get_achievements))
        .route("/v1/trainers/discover", get(discovery::get_discover))
        .route("/v1/swipes", post(swipes::post_swipe).get(swipes::get_swipes))
        .route(
            "/v1/contracts",
            post(contracts::post_contract).get(contracts::get_contracts),
        )
        .route(
            "/v1/contracts/:contract_id/status",
            post(contracts::post_contract_status),
        )
        .layer(cors)
        .with_state(state)
}

/// Parse a uuid supplied by the boundary layer (trusted user id, path ids).
pub(crate) fn parse_uuid(value: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::BadRequest(format!("invalid {} id", what)))
}
