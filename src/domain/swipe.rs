use crate::domain::SwipeAction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One swipe decision. Unique per (user_id, trainer_id); append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerSwipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub trainer_id: Uuid,
    pub action: SwipeAction,
    pub created_at: DateTime<Utc>,
}

impl TrainerSwipe {
    pub fn new(
        user_id: Uuid,
        trainer_id: Uuid,
        action: SwipeAction,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            trainer_id,
            action,
            created_at,
        }
    }
}
