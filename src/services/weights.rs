//! Weight ledger: append-only measurement log.

use crate::db::Repository;
use crate::domain::WeightEntry;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct WeightLedger {
    repo: Arc<Repository>,
}

impl WeightLedger {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Append a measurement. No update or delete exists on the ledger.
    pub async fn record(
        &self,
        user_id: Uuid,
        weight: f64,
        notes: Option<String>,
    ) -> Result<WeightEntry, AppError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AppError::BadRequest(
                "weight must be a positive number".to_string(),
            ));
        }

        let entry = WeightEntry::new(user_id, weight, notes, Utc::now());
        self.repo.insert_weight_entry(&entry).await?;
        debug!(%user_id, weight, "weight entry recorded");
        Ok(entry)
    }

    /// Latest measurement, i.e. max(created_at) for the user.
    pub async fn latest(&self, user_id: Uuid) -> Result<Option<WeightEntry>, AppError> {
        Ok(self.repo.latest_weight_entry(user_id).await?)
    }
}
