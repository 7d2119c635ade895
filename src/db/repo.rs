//! Repository layer for database operations.

use crate::domain::{
    Achievement, AchievementKind, Contract, ContractStatus, Goal, GoalKind, SwipeAction, Trainer,
    TrainerService, TrainerSwipe, WeightEntry, Workout,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

fn to_ms(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

fn from_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}

fn uuid_col(row: &SqliteRow, name: &str) -> Uuid {
    let raw: String = row.get(name);
    Uuid::parse_str(&raw).unwrap_or_default()
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    // --- goals ---

    pub async fn insert_goal(&self, goal: &Goal) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO goals (
                id, user_id, kind, baseline_weight, target_weight,
                height_cm, deadline_ms, created_at_ms
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(goal.id.to_string())
        .bind(goal.user_id.to_string())
        .bind(goal.kind.as_str())
        .bind(goal.baseline_weight)
        .bind(goal.target_weight)
        .bind(goal.height_cm)
        .bind(goal.deadline.map(to_ms))
        .bind(to_ms(goal.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_goal(&self, goal_id: Uuid) -> Result<Option<Goal>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, kind, baseline_weight, target_weight,
                   height_cm, deadline_ms, created_at_ms
            FROM goals
            WHERE id = ?
            "#,
        )
        .bind(goal_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_goal(&r)))
    }

    // --- weight ledger ---

    pub async fn insert_weight_entry(&self, entry: &WeightEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO weight_entries (id, user_id, weight, notes, created_at_ms)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.weight)
        .bind(entry.notes.as_deref())
        .bind(to_ms(entry.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Latest entry = max(created_at) for the user; insertion order breaks
    /// same-millisecond ties.
    pub async fn latest_weight_entry(
        &self,
        user_id: Uuid,
    ) -> Result<Option<WeightEntry>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, weight, notes, created_at_ms
            FROM weight_entries
            WHERE user_id = ?
            ORDER BY created_at_ms DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_weight_entry(&r)))
    }

    // --- workouts ---

    pub async fn insert_workout(&self, workout: &Workout) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO workouts (
                id, user_id, is_completed, completed_at_ms,
                scheduled_date_ms, source, created_at_ms
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(workout.is_completed as i64)
        .bind(workout.completed_at.map(to_ms))
        .bind(workout.scheduled_date.map(to_ms))
        .bind(workout.source.as_str())
        .bind(to_ms(workout.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Mark a workout completed. Returns false when no row matched.
    pub async fn complete_workout(
        &self,
        workout_id: Uuid,
        user_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE workouts
            SET is_completed = 1, completed_at_ms = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(to_ms(completed_at))
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_workouts(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM workouts WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }

    /// Count workouts created within [from, to] inclusive.
    pub async fn count_workouts_between(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS n
            FROM workouts
            WHERE user_id = ? AND created_at_ms >= ? AND created_at_ms <= ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(to_ms(from))
        .bind(to_ms(to))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("n"))
    }

    // --- achievements ---

    /// Insert an achievement unless one already exists for (user, kind).
    ///
    /// Returns true when a row was created. The unique constraint makes this
    /// safe under concurrent evaluation; losing the race is a silent no-op.
    pub async fn insert_achievement_if_absent(
        &self,
        achievement: &Achievement,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO achievements (
                id, user_id, kind, title, description, icon,
                metadata, unlocked_at_ms, is_read
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, kind) DO NOTHING
            "#,
        )
        .bind(achievement.id.to_string())
        .bind(achievement.user_id.to_string())
        .bind(achievement.kind.as_str())
        .bind(achievement.title.as_str())
        .bind(achievement.description.as_str())
        .bind(achievement.icon.as_deref())
        .bind(achievement.metadata.as_ref().map(|m| m.to_string()))
        .bind(to_ms(achievement.unlocked_at))
        .bind(achievement.is_read as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_achievement(
        &self,
        user_id: Uuid,
        kind: AchievementKind,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, kind, title, description, icon,
                   metadata, unlocked_at_ms, is_read
            FROM achievements
            WHERE user_id = ? AND kind = ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_achievement(&r)))
    }

    pub async fn list_achievements(&self, user_id: Uuid) -> Result<Vec<Achievement>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, kind, title, description, icon,
                   metadata, unlocked_at_ms, is_read
            FROM achievements
            WHERE user_id = ?
            ORDER BY unlocked_at_ms DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_achievement).collect())
    }

    // --- trainers and services ---

    pub async fn insert_trainer(&self, trainer: &Trainer) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO trainers (id, user_id, name, cref, gender, birth_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(trainer.id.to_string())
        .bind(trainer.user_id.to_string())
        .bind(trainer.name.as_str())
        .bind(trainer.cref.as_str())
        .bind(trainer.gender.as_str())
        .bind(trainer.birth_date.format("%Y-%m-%d").to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_trainer(&self, trainer_id: Uuid) -> Result<Option<Trainer>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, user_id, name, cref, gender, birth_date FROM trainers WHERE id = ?",
        )
        .bind(trainer_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_trainer(&r)))
    }

    pub async fn list_trainers(&self) -> Result<Vec<Trainer>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, user_id, name, cref, gender, birth_date FROM trainers")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_trainer).collect())
    }

    pub async fn insert_service(&self, service: &TrainerService) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO trainer_services (id, trainer_id, name, price, duration_weeks)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(service.id.to_string())
        .bind(service.trainer_id.to_string())
        .bind(service.name.as_str())
        .bind(service.price.to_string())
        .bind(service.duration_weeks)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_service(
        &self,
        service_id: Uuid,
    ) -> Result<Option<TrainerService>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, trainer_id, name, price, duration_weeks FROM trainer_services WHERE id = ?",
        )
        .bind(service_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_service(&r)))
    }

    pub async fn list_services_for_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<TrainerService>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, trainer_id, name, price, duration_weeks
            FROM trainer_services
            WHERE trainer_id = ?
            "#,
        )
        .bind(trainer_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_service).collect())
    }

    // --- swipes ---

    /// Append a swipe. A duplicate (user, trainer) pair violates the unique
    /// constraint and surfaces as a database error for the caller to translate.
    pub async fn insert_swipe(&self, swipe: &TrainerSwipe) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO trainer_swipes (id, user_id, trainer_id, action, created_at_ms)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(swipe.id.to_string())
        .bind(swipe.user_id.to_string())
        .bind(swipe.trainer_id.to_string())
        .bind(swipe.action.as_str())
        .bind(to_ms(swipe.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn swipe_exists(
        &self,
        user_id: Uuid,
        trainer_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM trainer_swipes WHERE user_id = ? AND trainer_id = ?",
        )
        .bind(user_id.to_string())
        .bind(trainer_id.to_string())
        .fetch_one(&self.pool)
        .await?;
        let n: i64 = row.get("n");
        Ok(n > 0)
    }

    /// Every trainer the user has already swiped, for discovery exclusion.
    pub async fn swiped_trainer_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows = sqlx::query("SELECT trainer_id FROM trainer_swipes WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|r| uuid_col(r, "trainer_id")).collect())
    }

    pub async fn list_swipes(&self, user_id: Uuid) -> Result<Vec<TrainerSwipe>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, trainer_id, action, created_at_ms
            FROM trainer_swipes
            WHERE user_id = ?
            ORDER BY created_at_ms DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_swipe).collect())
    }

    // --- contracts ---

    /// Insert a contract. The partial unique index over open contracts makes a
    /// second open contract for the same (user, trainer) pair a database
    /// error for the caller to translate.
    pub async fn insert_contract(&self, contract: &Contract) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, user_id, trainer_id, service_id, status, start_date_ms,
                end_date_ms, total_price, created_at_ms, updated_at_ms
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(contract.id.to_string())
        .bind(contract.user_id.to_string())
        .bind(contract.trainer_id.to_string())
        .bind(contract.service_id.to_string())
        .bind(contract.status.as_str())
        .bind(to_ms(contract.start_date))
        .bind(to_ms(contract.end_date))
        .bind(contract.total_price.to_string())
        .bind(to_ms(contract.created_at))
        .bind(to_ms(contract.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_open_contract(
        &self,
        user_id: Uuid,
        trainer_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, trainer_id, service_id, status, start_date_ms,
                   end_date_ms, total_price, created_at_ms, updated_at_ms
            FROM contracts
            WHERE user_id = ? AND trainer_id = ? AND status IN ('pending', 'active')
            "#,
        )
        .bind(user_id.to_string())
        .bind(trainer_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_contract(&r)))
    }

    pub async fn get_contract(&self, contract_id: Uuid) -> Result<Option<Contract>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, trainer_id, service_id, status, start_date_ms,
                   end_date_ms, total_price, created_at_ms, updated_at_ms
            FROM contracts
            WHERE id = ?
            "#,
        )
        .bind(contract_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_contract(&r)))
    }

    pub async fn list_contracts(&self, user_id: Uuid) -> Result<Vec<Contract>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, trainer_id, service_id, status, start_date_ms,
                   end_date_ms, total_price, created_at_ms, updated_at_ms
            FROM contracts
            WHERE user_id = ?
            ORDER BY created_at_ms DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_contract).collect())
    }

    /// Compare-and-set on a contract's status. The WHERE clause re-checks the
    /// status the caller validated against, so a racing transition loses with
    /// zero rows affected instead of overwriting the winner. The open-contract
    /// partial index re-checks the uniqueness invariant on transitions back
    /// into an open status.
    pub async fn update_contract_status(
        &self,
        contract_id: Uuid,
        expected: ContractStatus,
        next: ContractStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET status = ?, updated_at_ms = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(next.as_str())
        .bind(to_ms(updated_at))
        .bind(contract_id.to_string())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// --- row mapping ---

fn row_to_goal(row: &SqliteRow) -> Goal {
    let kind_str: String = row.get("kind");
    let deadline_ms: Option<i64> = row.get("deadline_ms");
    Goal {
        id: uuid_col(row, "id"),
        user_id: uuid_col(row, "user_id"),
        kind: GoalKind::from_str(&kind_str).unwrap_or(GoalKind::ImproveConditioning),
        baseline_weight: row.get("baseline_weight"),
        target_weight: row.get("target_weight"),
        height_cm: row.get("height_cm"),
        deadline: deadline_ms.map(from_ms),
        created_at: from_ms(row.get("created_at_ms")),
    }
}

fn row_to_weight_entry(row: &SqliteRow) -> WeightEntry {
    WeightEntry {
        id: uuid_col(row, "id"),
        user_id: uuid_col(row, "user_id"),
        weight: row.get("weight"),
        notes: row.get("notes"),
        created_at: from_ms(row.get("created_at_ms")),
    }
}

fn row_to_achievement(row: &SqliteRow) -> Achievement {
    let kind_str: String = row.get("kind");
    let metadata_str: Option<String> = row.get("metadata");
    let is_read: i64 = row.get("is_read");
    Achievement {
        id: uuid_col(row, "id"),
        user_id: uuid_col(row, "user_id"),
        kind: AchievementKind::from_str(&kind_str).unwrap_or(AchievementKind::FirstWorkout),
        title: row.get("title"),
        description: row.get("description"),
        icon: row.get("icon"),
        metadata: metadata_str.and_then(|s| serde_json::from_str(&s).ok()),
        unlocked_at: from_ms(row.get("unlocked_at_ms")),
        is_read: is_read != 0,
    }
}

fn row_to_trainer(row: &SqliteRow) -> Trainer {
    let birth_date_str: String = row.get("birth_date");
    Trainer {
        id: uuid_col(row, "id"),
        user_id: uuid_col(row, "user_id"),
        name: row.get("name"),
        cref: row.get("cref"),
        gender: row.get("gender"),
        birth_date: NaiveDate::parse_from_str(&birth_date_str, "%Y-%m-%d").unwrap_or_default(),
    }
}

fn row_to_service(row: &SqliteRow) -> TrainerService {
    let price_str: String = row.get("price");
    TrainerService {
        id: uuid_col(row, "id"),
        trainer_id: uuid_col(row, "trainer_id"),
        name: row.get("name"),
        price: Decimal::from_str(&price_str).unwrap_or_default(),
        duration_weeks: row.get("duration_weeks"),
    }
}

fn row_to_swipe(row: &SqliteRow) -> TrainerSwipe {
    let action_str: String = row.get("action");
    TrainerSwipe {
        id: uuid_col(row, "id"),
        user_id: uuid_col(row, "user_id"),
        trainer_id: uuid_col(row, "trainer_id"),
        action: SwipeAction::from_str(&action_str).unwrap_or(SwipeAction::Skip),
        created_at: from_ms(row.get("created_at_ms")),
    }
}

fn row_to_contract(row: &SqliteRow) -> Contract {
    let status_str: String = row.get("status");
    let price_str: String = row.get("total_price");
    Contract {
        id: uuid_col(row, "id"),
        user_id: uuid_col(row, "user_id"),
        trainer_id: uuid_col(row, "trainer_id"),
        service_id: uuid_col(row, "service_id"),
        status: ContractStatus::from_str(&status_str).unwrap_or(ContractStatus::Pending),
        start_date: from_ms(row.get("start_date_ms")),
        end_date: from_ms(row.get("end_date_ms")),
        total_price: Decimal::from_str(&price_str).unwrap_or_default(),
        created_at: from_ms(row.get("created_at_ms")),
        updated_at: from_ms(row.get("updated_at_ms")),
    }
}
