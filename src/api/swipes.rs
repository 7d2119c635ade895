use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, AppState};
use crate::domain::{SwipeAction, TrainerSwipe};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub user: String,
    pub trainer_id: String,
    pub action: SwipeAction,
}

#[derive(Debug, Deserialize)]
pub struct SwipesQuery {
    pub user: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeDto {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub action: SwipeAction,
    pub created_at_ms: i64,
}

impl From<TrainerSwipe> for SwipeDto {
    fn from(s: TrainerSwipe) -> Self {
        Self {
            id: s.id,
            trainer_id: s.trainer_id,
            action: s.action,
            created_at_ms: s.created_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeResponse {
    pub swipe: SwipeDto,
    pub message: &'static str,
}

pub async fn post_swipe(
    State(state): State<AppState>,
    Json(body): Json<SwipeRequest>,
) -> Result<(StatusCode, Json<SwipeResponse>), AppError> {
    let user_id = parse_uuid(&body.user, "user")?;
    let trainer_id = parse_uuid(&body.trainer_id, "trainer")?;

    let receipt = state.swipes.record(user_id, trainer_id, body.action).await?;

    Ok((
        StatusCode::CREATED,
        Json(SwipeResponse {
            swipe: receipt.swipe.into(),
            message: receipt.message,
        }),
    ))
}

pub async fn get_swipes(
    Query(params): Query<SwipesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SwipeDto>>, AppError> {
    let user_id = parse_uuid(&params.user, "user")?;

    let swipes = state.swipes.list_for_user(user_id).await?;
    Ok(Json(swipes.into_iter().map(Into::into).collect()))
}
