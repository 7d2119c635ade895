//! Swipe ledger: append-only, unique per (user, trainer).

use crate::db::Repository;
use crate::domain::{SwipeAction, TrainerSwipe};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// A recorded swipe plus the user-facing message for the boundary layer.
#[derive(Debug, Clone)]
pub struct SwipeReceipt {
    pub swipe: TrainerSwipe,
    pub message: &'static str,
}

#[derive(Clone)]
pub struct SwipeLedger {
    repo: Arc<Repository>,
}

impl SwipeLedger {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Record a one-time swipe decision.
    ///
    /// The existence pre-check is a fast path only; the unique constraint on
    /// (user_id, trainer_id) is the authoritative guard, and a violation
    /// raised at insert time translates to the same Conflict.
    pub async fn record(
        &self,
        user_id: Uuid,
        trainer_id: Uuid,
        action: SwipeAction,
    ) -> Result<SwipeReceipt, AppError> {
        if self.repo.get_trainer(trainer_id).await?.is_none() {
            return Err(AppError::NotFound("trainer not found".to_string()));
        }

        if self.repo.swipe_exists(user_id, trainer_id).await? {
            return Err(AppError::Conflict(
                "trainer already swiped by this user".to_string(),
            ));
        }

        let swipe = TrainerSwipe::new(user_id, trainer_id, action, Utc::now());
        self.repo.insert_swipe(&swipe).await?;
        debug!(%user_id, %trainer_id, action = %action, "swipe recorded");

        Ok(SwipeReceipt {
            message: action.message(),
            swipe,
        })
    }

    /// Swipe history for a user, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TrainerSwipe>, AppError> {
        Ok(self.repo.list_swipes(user_id).await?)
    }
}
