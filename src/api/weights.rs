use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, AppState};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRequest {
    pub user: String,
    pub weight: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightResponse {
    pub id: Uuid,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at_ms: i64,
}

pub async fn post_weight(
    State(state): State<AppState>,
    Json(body): Json<WeightRequest>,
) -> Result<(StatusCode, Json<WeightResponse>), AppError> {
    let user_id = parse_uuid(&body.user, "user")?;

    let entry = state.weights.record(user_id, body.weight, body.notes).await?;

    Ok((
        StatusCode::CREATED,
        Json(WeightResponse {
            id: entry.id,
            weight: entry.weight,
            notes: entry.notes,
            created_at_ms: entry.created_at.timestamp_millis(),
        }),
    ))
}
