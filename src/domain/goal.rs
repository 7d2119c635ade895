//! Goal type: a member's declared weight/fitness objective.

use crate::domain::GoalKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fitness goal, created once during onboarding and never mutated afterwards.
///
/// `baseline_weight` is the member's weight at goal creation; later weight is
/// tracked separately in the weight ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: GoalKind,
    /// Weight at goal creation (kg). Immutable baseline for progress math.
    pub baseline_weight: f64,
    pub target_weight: f64,
    /// Height in centimeters, captured for BMI-style displays.
    pub height_cm: f64,
    /// Optional deadline; conditioning goals without one use a default window.
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        user_id: Uuid,
        kind: GoalKind,
        baseline_weight: f64,
        target_weight: f64,
        height_cm: f64,
        deadline: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            baseline_weight,
            target_weight,
            height_cm,
            deadline,
            created_at,
        }
    }
}
