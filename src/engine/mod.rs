//! Pure computation engine for the fitness domain rules.
//!
//! Nothing in this module touches the database or the wall clock; callers
//! pass "now"/"today" in so every rule is a deterministic function.

pub mod discovery;
pub mod progress;
pub mod streak;

pub use discovery::DiscoveryFilters;
pub use progress::{compute_progress, GoalProgress};
pub use streak::{rolling_week_bounds, rule_set, AchievementRule, WorkoutStats};
