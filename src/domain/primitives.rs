//! Domain enums: GoalKind, SwipeAction, ContractStatus, AchievementKind.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of fitness goal a member declared at onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    LoseWeight,
    GainMass,
    ImproveConditioning,
}

impl GoalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKind::LoseWeight => "lose_weight",
            GoalKind::GainMass => "gain_mass",
            GoalKind::ImproveConditioning => "improve_conditioning",
        }
    }
}

impl std::fmt::Display for GoalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GoalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lose_weight" => Ok(GoalKind::LoseWeight),
            "gain_mass" => Ok(GoalKind::GainMass),
            "improve_conditioning" => Ok(GoalKind::ImproveConditioning),
            other => Err(format!("unknown goal kind: {}", other)),
        }
    }
}

/// A member's one-time decision about a trainer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Skip,
}

impl SwipeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeAction::Like => "like",
            SwipeAction::Skip => "skip",
        }
    }

    /// User-facing message returned when the swipe is recorded.
    pub fn message(&self) -> &'static str {
        match self {
            SwipeAction::Like => "interest registered, mutual interest may lead to a connection",
            SwipeAction::Skip => "trainer skipped",
        }
    }
}

impl std::fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwipeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(SwipeAction::Like),
            "skip" => Ok(SwipeAction::Skip),
            other => Err(format!("unknown swipe action: {}", other)),
        }
    }
}

/// Lifecycle status of a service contract.
///
/// Legal transitions: Pending -> Active -> Completed, or
/// Pending | Active -> Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Pending => "pending",
            ContractStatus::Active => "active",
            ContractStatus::Completed => "completed",
            ContractStatus::Cancelled => "cancelled",
        }
    }

    /// An open contract blocks any new contract for the same user-trainer pair.
    pub fn is_open(&self) -> bool {
        matches!(self, ContractStatus::Pending | ContractStatus::Active)
    }

    /// Whether a transition from self to `next` is legal.
    pub fn can_transition_to(&self, next: ContractStatus) -> bool {
        matches!(
            (self, next),
            (ContractStatus::Pending, ContractStatus::Active)
                | (ContractStatus::Pending, ContractStatus::Cancelled)
                | (ContractStatus::Active, ContractStatus::Completed)
                | (ContractStatus::Active, ContractStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContractStatus::Pending),
            "active" => Ok(ContractStatus::Active),
            "completed" => Ok(ContractStatus::Completed),
            "cancelled" => Ok(ContractStatus::Cancelled),
            other => Err(format!("unknown contract status: {}", other)),
        }
    }
}

/// Per-user, per-kind unlock identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementKind {
    FirstWorkout,
    WeekStreak,
}

impl AchievementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKind::FirstWorkout => "FIRST_WORKOUT",
            AchievementKind::WeekStreak => "WEEK_STREAK",
        }
    }
}

impl std::fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AchievementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIRST_WORKOUT" => Ok(AchievementKind::FirstWorkout),
            "WEEK_STREAK" => Ok(AchievementKind::WeekStreak),
            other => Err(format!("unknown achievement kind: {}", other)),
        }
    }
}
