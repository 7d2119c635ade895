//! Domain services: the stateful components the boundary layer calls.
//!
//! Each service holds the repository (and collaborators where needed) and
//! applies the pure rules from `engine` at the request boundary.

pub mod achievements;
pub mod contracts;
pub mod discovery;
pub mod progress;
pub mod swipes;
pub mod weights;

pub use achievements::AchievementEngine;
pub use contracts::ContractNegotiator;
pub use discovery::{TrainerCard, TrainerDiscoveryEngine};
pub use progress::GoalProgressService;
pub use swipes::{SwipeLedger, SwipeReceipt};
pub use weights::WeightLedger;
