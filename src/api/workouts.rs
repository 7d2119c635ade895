use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, AppState};
use crate::domain::Workout;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    pub user: String,
    /// Epoch milliseconds.
    pub scheduled_date_ms: Option<i64>,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub user: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub is_completed: bool,
    pub source: String,
    pub created_at_ms: i64,
}

pub async fn post_workout(
    State(state): State<AppState>,
    Json(body): Json<WorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutResponse>), AppError> {
    let user_id = parse_uuid(&body.user, "user")?;

    let scheduled_date = body
        .scheduled_date_ms
        .map(|ms| {
            DateTime::<Utc>::from_timestamp_millis(ms)
                .ok_or_else(|| AppError::BadRequest("invalid scheduledDateMs".to_string()))
        })
        .transpose()?;

    let workout = Workout::new(
        user_id,
        scheduled_date,
        body.source.unwrap_or_else(|| "manual".to_string()),
        Utc::now(),
    );
    state.repo.insert_workout(&workout).await?;

    // Evaluation runs after the write and never fails the request.
    state.achievements.evaluate(user_id).await;

    Ok((
        StatusCode::CREATED,
        Json(WorkoutResponse {
            id: workout.id,
            is_completed: workout.is_completed,
            source: workout.source,
            created_at_ms: workout.created_at.timestamp_millis(),
        }),
    ))
}

pub async fn post_complete_workout(
    Path(workout_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<CompleteRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = parse_uuid(&body.user, "user")?;

    let updated = state
        .repo
        .complete_workout(workout_id, user_id, Utc::now())
        .await?;
    if !updated {
        return Err(AppError::NotFound("workout not found".to_string()));
    }

    state.achievements.evaluate(user_id).await;

    Ok(Json(serde_json::json!({"completed": true})))
}
