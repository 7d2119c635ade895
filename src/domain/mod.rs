//! Domain types for the fitness-social core.
//!
//! This module provides:
//! - Domain enums: GoalKind, SwipeAction, ContractStatus, AchievementKind
//! - Entity types: Goal, WeightEntry, Workout, Achievement, Trainer,
//!   TrainerService, TrainerSwipe, Contract
//! - Geo primitives for discovery distance ranking

pub mod achievement;
pub mod contract;
pub mod geo;
pub mod goal;
pub mod primitives;
pub mod swipe;
pub mod trainer;
pub mod weight;
pub mod workout;

pub use achievement::{Achievement, AchievementPayload};
pub use contract::Contract;
pub use geo::{haversine_km, GeoPoint};
pub use goal::Goal;
pub use primitives::{AchievementKind, ContractStatus, GoalKind, SwipeAction};
pub use swipe::TrainerSwipe;
pub use trainer::{Trainer, TrainerService};
pub use weight::WeightEntry;
pub use workout::Workout;
