//! Achievement evaluation over workout history.

use crate::db::Repository;
use crate::domain::Achievement;
use crate::engine::streak::{rolling_week_bounds, rule_set, AchievementRule, WorkoutStats};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs the ordered rule list after every workout action and records unlocks
/// idempotently.
pub struct AchievementEngine {
    repo: Arc<Repository>,
    rules: Vec<Box<dyn AchievementRule>>,
}

impl AchievementEngine {
    pub fn new(repo: Arc<Repository>, week_streak_target: i64) -> Self {
        Self {
            repo,
            rules: rule_set(week_streak_target),
        }
    }

    /// Evaluate all rules for a user.
    ///
    /// Never fails the caller: evaluation must not block or roll back the
    /// workout action that triggered it, so persistence errors are logged
    /// and swallowed.
    pub async fn evaluate(&self, user_id: Uuid) {
        if let Err(e) = self.evaluate_at(user_id, Utc::now()).await {
            warn!(%user_id, error = %e, "achievement evaluation failed; workout action unaffected");
        }
    }

    /// Evaluation with an injected clock. Exposed for deterministic tests.
    pub async fn evaluate_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let (week_start, week_end) = rolling_week_bounds(now);
        let stats = WorkoutStats {
            total_workouts: self.repo.count_workouts(user_id).await?,
            workouts_this_week: self
                .repo
                .count_workouts_between(user_id, week_start, week_end)
                .await?,
        };

        for rule in &self.rules {
            if !rule.unlocked(&stats) {
                continue;
            }
            let achievement =
                Achievement::from_payload(user_id, rule.kind(), rule.payload(), now);
            // ON CONFLICT DO NOTHING resolves a lost race the same way the
            // pre-existing-record case resolves: silently.
            let created = self.repo.insert_achievement_if_absent(&achievement).await?;
            if created {
                info!(%user_id, kind = %achievement.kind, "achievement unlocked");
            } else {
                debug!(%user_id, kind = %achievement.kind, "achievement already unlocked");
            }
        }

        Ok(())
    }

    /// All unlocks for a user, newest first.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Achievement>, AppError> {
        Ok(self.repo.list_achievements(user_id).await?)
    }
}
