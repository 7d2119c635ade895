//! Contract type: a paid agreement between a member and a trainer.

use crate::domain::ContractStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A service contract.
///
/// Invariant: for a given (user_id, trainer_id) pair, at most one contract is
/// open (Pending or Active) at any time. `total_price` is fixed at creation
/// from the service's price and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    pub user_id: Uuid,
    pub trainer_id: Uuid,
    pub service_id: Uuid,
    pub status: ContractStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// Create a new pending contract with the price snapshot taken.
    pub fn pending(
        user_id: Uuid,
        trainer_id: Uuid,
        service_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        total_price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            trainer_id,
            service_id,
            status: ContractStatus::Pending,
            start_date,
            end_date,
            total_price,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}
