//! Goal progress lookups: ownership check plus the pure computation.

use crate::db::Repository;
use crate::engine::{compute_progress, GoalProgress};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct GoalProgressService {
    repo: Arc<Repository>,
    conditioning_window_days: i64,
}

impl GoalProgressService {
    pub fn new(repo: Arc<Repository>, conditioning_window_days: i64) -> Self {
        Self {
            repo,
            conditioning_window_days,
        }
    }

    /// Compute progress for a goal owned by `user_id`.
    ///
    /// A goal that does not exist and a goal owned by someone else are both
    /// NotFound; ownership is never leaked through a distinct error.
    pub async fn progress(&self, user_id: Uuid, goal_id: Uuid) -> Result<GoalProgress, AppError> {
        let goal = self
            .repo
            .get_goal(goal_id)
            .await?
            .filter(|g| g.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("goal not found".to_string()))?;

        let latest = self.repo.latest_weight_entry(user_id).await?;

        Ok(compute_progress(
            &goal,
            latest.as_ref(),
            Utc::now(),
            self.conditioning_window_days,
        ))
    }
}
