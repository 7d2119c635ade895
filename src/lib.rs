pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod providers;
pub mod services;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    Achievement, AchievementKind, Contract, ContractStatus, GeoPoint, Goal, GoalKind, SwipeAction,
    Trainer, TrainerService, TrainerSwipe, WeightEntry, Workout,
};
pub use error::AppError;
pub use providers::{Geocoder, HttpRatingsProvider, NoGeocoder, NoRatings, RatingsProvider};
