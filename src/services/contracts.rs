//! Contract negotiation: creation and lifecycle transitions under the
//! one-open-contract-per-pair invariant.

use crate::db::Repository;
use crate::domain::{Contract, ContractStatus};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct ContractNegotiator {
    repo: Arc<Repository>,
}

impl ContractNegotiator {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Create a pending contract with the service price snapshotted.
    ///
    /// The open-contract pre-check is a fast path; the partial unique index
    /// over open contracts is the authoritative guard and a violation raised
    /// at insert time translates to the same Conflict.
    pub async fn create(
        &self,
        user_id: Uuid,
        trainer_id: Uuid,
        service_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Contract, AppError> {
        if start_date >= end_date {
            return Err(AppError::BadRequest(
                "start date must be before end date".to_string(),
            ));
        }

        let service = self
            .repo
            .get_service(service_id)
            .await?
            .filter(|s| s.trainer_id == trainer_id)
            .ok_or_else(|| AppError::NotFound("service not found for trainer".to_string()))?;

        if service.price <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "service price must be positive".to_string(),
            ));
        }

        if self
            .repo
            .find_open_contract(user_id, trainer_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "an open contract already exists for this trainer".to_string(),
            ));
        }

        let now = Utc::now();
        let contract = Contract::pending(
            user_id,
            trainer_id,
            service_id,
            start_date,
            end_date,
            service.price,
            now,
        );
        self.repo.insert_contract(&contract).await?;
        info!(%user_id, %trainer_id, contract_id = %contract.id, "contract created");

        Ok(contract)
    }

    /// All contracts for a user, newest first. Read-only.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Contract>, AppError> {
        Ok(self.repo.list_contracts(user_id).await?)
    }

    /// Move a contract along the lifecycle:
    /// Pending -> Active -> Completed, or Pending | Active -> Cancelled.
    ///
    /// The partial unique index re-validates the open-contract invariant on
    /// any transition into an open status.
    pub async fn transition(
        &self,
        contract_id: Uuid,
        user_id: Uuid,
        next: ContractStatus,
    ) -> Result<Contract, AppError> {
        let contract = self
            .repo
            .get_contract(contract_id)
            .await?
            .filter(|c| c.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("contract not found".to_string()))?;

        if !contract.status.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "illegal contract transition: {} -> {}",
                contract.status, next
            )));
        }

        let now = Utc::now();
        // Compare-and-set: the write only lands if the status is still the one
        // validated above, so two racing legal transitions cannot both apply.
        let updated = self
            .repo
            .update_contract_status(contract_id, contract.status, next, now)
            .await?;
        if !updated {
            return Err(AppError::Conflict(
                "contract was modified concurrently".to_string(),
            ));
        }
        info!(contract_id = %contract_id, from = %contract.status, to = %next, "contract transitioned");

        Ok(Contract {
            status: next,
            updated_at: now,
            ..contract
        })
    }
}
