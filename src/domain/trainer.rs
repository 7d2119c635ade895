//! Trainer and service types consumed by discovery and contracts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A personal trainer profile. Read-only candidate in discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Professional registration number.
    pub cref: String,
    pub gender: String,
    pub birth_date: NaiveDate,
}

/// A service a trainer offers. `price` is snapshotted into a contract at
/// creation time and never read again afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerService {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub price: Decimal,
    /// Duration of the engagement in weeks.
    pub duration_weeks: i64,
}
