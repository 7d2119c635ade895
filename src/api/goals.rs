use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, AppState};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub user: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub progress: i64,
    pub current_weight: f64,
    pub target_weight: f64,
    pub weight_difference: f64,
}

pub async fn get_goal_progress(
    Path(goal_id): Path<Uuid>,
    Query(params): Query<ProgressQuery>,
    State(state): State<AppState>,
) -> Result<Json<ProgressResponse>, AppError> {
    let user_id = parse_uuid(&params.user, "user")?;

    let progress = state.progress.progress(user_id, goal_id).await?;

    Ok(Json(ProgressResponse {
        progress: progress.percent,
        current_weight: progress.current_weight,
        target_weight: progress.target_weight,
        weight_difference: progress.weight_difference,
    }))
}
