use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged weight measurement. Append-only; "latest" = max(created_at).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WeightEntry {
    pub fn new(user_id: Uuid, weight: f64, notes: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            weight,
            notes,
            created_at,
        }
    }
}
