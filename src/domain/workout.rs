use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workout record. The engine only reads counts and time buckets from these;
/// creation and completion are owned by the boundary layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Where the workout came from (e.g. "manual", "plan").
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    pub fn new(
        user_id: Uuid,
        scheduled_date: Option<DateTime<Utc>>,
        source: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            is_completed: false,
            completed_at: None,
            scheduled_date,
            source,
            created_at,
        }
    }
}
