use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, AppState};
use crate::domain::Achievement;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AchievementsQuery {
    pub user: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDto {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub unlocked_at_ms: i64,
    pub is_read: bool,
}

impl From<Achievement> for AchievementDto {
    fn from(a: Achievement) -> Self {
        Self {
            id: a.id,
            kind: a.kind.to_string(),
            title: a.title,
            description: a.description,
            icon: a.icon,
            metadata: a.metadata,
            unlocked_at_ms: a.unlocked_at.timestamp_millis(),
            is_read: a.is_read,
        }
    }
}

pub async fn get_achievements(
    Query(params): Query<AchievementsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AchievementDto>>, AppError> {
    let user_id = parse_uuid(&params.user, "user")?;

    let achievements = state.achievements.list(user_id).await?;
    Ok(Json(achievements.into_iter().map(Into::into).collect()))
}
