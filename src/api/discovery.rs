use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{parse_uuid, AppState};
use crate::domain::GeoPoint;
use crate::engine::discovery::DiscoveryFilters;
use crate::error::AppError;
use crate::services::TrainerCard;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverQuery {
    pub user: String,
    pub gender: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
    /// Comma-separated service types.
    pub workout_types: Option<String>,
}

pub async fn get_discover(
    Query(params): Query<DiscoverQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainerCard>>, AppError> {
    let user_id = parse_uuid(&params.user, "user")?;

    // Both coordinates or neither; a lone lat/lon is a malformed request.
    let origin = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "lat and lon must be provided together".to_string(),
            ))
        }
    };

    let workout_types = params
        .workout_types
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let filters = DiscoveryFilters {
        gender: params.gender,
        min_age: params.min_age,
        max_age: params.max_age,
        origin,
        radius_km: params.radius_km,
        workout_types,
    };

    let cards = state.discovery.search(user_id, &filters).await?;
    Ok(Json(cards))
}
