use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_uuid, AppState};
use crate::domain::{Contract, ContractStatus};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRequest {
    pub user: String,
    pub trainer_id: String,
    pub service_id: String,
    /// Epoch milliseconds.
    pub start_date_ms: i64,
    pub end_date_ms: i64,
}

#[derive(Debug, Deserialize)]
pub struct ContractsQuery {
    pub user: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub user: String,
    pub status: ContractStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub service_id: Uuid,
    pub status: ContractStatus,
    pub start_date_ms: i64,
    pub end_date_ms: i64,
    pub total_price: Decimal,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl From<Contract> for ContractDto {
    fn from(c: Contract) -> Self {
        Self {
            id: c.id,
            trainer_id: c.trainer_id,
            service_id: c.service_id,
            status: c.status,
            start_date_ms: c.start_date.timestamp_millis(),
            end_date_ms: c.end_date.timestamp_millis(),
            total_price: c.total_price,
            created_at_ms: c.created_at.timestamp_millis(),
            updated_at_ms: c.updated_at.timestamp_millis(),
        }
    }
}

fn parse_ms(ms: i64, what: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| AppError::BadRequest(format!("invalid {}", what)))
}

pub async fn post_contract(
    State(state): State<AppState>,
    Json(body): Json<ContractRequest>,
) -> Result<(StatusCode, Json<ContractDto>), AppError> {
    let user_id = parse_uuid(&body.user, "user")?;
    let trainer_id = parse_uuid(&body.trainer_id, "trainer")?;
    let service_id = parse_uuid(&body.service_id, "service")?;
    let start_date = parse_ms(body.start_date_ms, "startDateMs")?;
    let end_date = parse_ms(body.end_date_ms, "endDateMs")?;

    let contract = state
        .contracts
        .create(user_id, trainer_id, service_id, start_date, end_date)
        .await?;

    Ok((StatusCode::CREATED, Json(contract.into())))
}

pub async fn get_contracts(
    Query(params): Query<ContractsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContractDto>>, AppError> {
    let user_id = parse_uuid(&params.user, "user")?;

    let contracts = state.contracts.list_for_user(user_id).await?;
    Ok(Json(contracts.into_iter().map(Into::into).collect()))
}

pub async fn post_contract_status(
    Path(contract_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<ContractDto>, AppError> {
    let user_id = parse_uuid(&body.user, "user")?;

    let contract = state
        .contracts
        .transition(contract_id, user_id, body.status)
        .await?;

    Ok(Json(contract.into()))
}
