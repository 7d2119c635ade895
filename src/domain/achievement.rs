//! Achievement types: one-time per-user unlocks.

use crate::domain::AchievementKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A per-user unlock record. At most one exists per (user_id, kind); the
/// database unique constraint enforces this under concurrent evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub unlocked_at: DateTime<Utc>,
    pub is_read: bool,
}

/// Display payload owned by the rule that fires the unlock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementPayload {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl Achievement {
    pub fn from_payload(
        user_id: Uuid,
        kind: AchievementKind,
        payload: AchievementPayload,
        unlocked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title: payload.title,
            description: payload.description,
            icon: payload.icon,
            metadata: payload.metadata,
            unlocked_at,
            is_read: false,
        }
    }
}
