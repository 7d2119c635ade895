//! Goal progress computation.
//!
//! Pure functions of a goal, the latest weight entry, and an injected "now".
//! Weight goals measure movement from the immutable baseline toward the
//! target; conditioning goals measure elapsed time against a deadline window.

use crate::domain::{Goal, GoalKind, WeightEntry};
use chrono::{DateTime, Duration, Utc};

/// Computed progress toward a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    /// Percentage in [0, 100].
    pub percent: i64,
    pub current_weight: f64,
    pub target_weight: f64,
    /// round1(target - current); positive means the target is above current.
    pub weight_difference: f64,
}

/// Compute progress for a goal given the latest ledger entry, if any.
///
/// `conditioning_window_days` is the default deadline window applied to
/// conditioning goals without an explicit deadline.
pub fn compute_progress(
    goal: &Goal,
    latest: Option<&WeightEntry>,
    now: DateTime<Utc>,
    conditioning_window_days: i64,
) -> GoalProgress {
    let current_weight = latest.map(|e| e.weight).unwrap_or(goal.baseline_weight);
    let weight_difference = round1(goal.target_weight - current_weight);

    let percent = match goal.kind {
        GoalKind::LoseWeight => {
            let total_to_lose = goal.baseline_weight - goal.target_weight;
            if total_to_lose <= 0.0 {
                // Malformed or inverted goal; avoids a divide-by-zero.
                0
            } else {
                let lost = goal.baseline_weight - current_weight;
                clamp_percent(lost / total_to_lose * 100.0)
            }
        }
        GoalKind::GainMass => {
            let total_to_gain = goal.target_weight - goal.baseline_weight;
            if total_to_gain <= 0.0 {
                0
            } else {
                let gained = current_weight - goal.baseline_weight;
                clamp_percent(gained / total_to_gain * 100.0)
            }
        }
        GoalKind::ImproveConditioning => {
            let deadline = goal
                .deadline
                .unwrap_or(goal.created_at + Duration::days(conditioning_window_days));
            let total_ms = (deadline - goal.created_at).num_milliseconds();
            if total_ms <= 0 {
                0
            } else {
                let elapsed_ms = (now - goal.created_at).num_milliseconds();
                clamp_percent(elapsed_ms as f64 / total_ms as f64 * 100.0)
            }
        }
    };

    GoalProgress {
        percent,
        current_weight,
        target_weight: goal.target_weight,
        weight_difference,
    }
}

fn clamp_percent(raw: f64) -> i64 {
    (raw.round() as i64).clamp(0, 100)
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn goal(kind: GoalKind, baseline: f64, target: f64) -> Goal {
        Goal::new(
            Uuid::new_v4(),
            kind,
            baseline,
            target,
            175.0,
            None,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        )
    }

    fn entry(goal: &Goal, weight: f64) -> WeightEntry {
        WeightEntry::new(goal.user_id, weight, None, goal.created_at)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_lose_weight_endpoints_and_midpoint() {
        let g = goal(GoalKind::LoseWeight, 90.0, 80.0);

        let at_target = compute_progress(&g, Some(&entry(&g, 80.0)), now(), 90);
        assert_eq!(at_target.percent, 100);

        let at_baseline = compute_progress(&g, Some(&entry(&g, 90.0)), now(), 90);
        assert_eq!(at_baseline.percent, 0);

        let halfway = compute_progress(&g, Some(&entry(&g, 85.0)), now(), 90);
        assert_eq!(halfway.percent, 50);
    }

    #[test]
    fn test_lose_weight_overshoot_clamped() {
        let g = goal(GoalKind::LoseWeight, 90.0, 80.0);
        let p = compute_progress(&g, Some(&entry(&g, 70.0)), now(), 90);
        assert_eq!(p.percent, 100);
    }

    #[test]
    fn test_lose_weight_regression_clamped_to_zero() {
        let g = goal(GoalKind::LoseWeight, 90.0, 80.0);
        let p = compute_progress(&g, Some(&entry(&g, 95.0)), now(), 90);
        assert_eq!(p.percent, 0);
    }

    #[test]
    fn test_malformed_lose_weight_goal_is_zero() {
        // baseline <= target: no divide-by-zero, progress pinned to 0.
        let g = goal(GoalKind::LoseWeight, 80.0, 80.0);
        let p = compute_progress(&g, Some(&entry(&g, 70.0)), now(), 90);
        assert_eq!(p.percent, 0);

        let g = goal(GoalKind::LoseWeight, 75.0, 80.0);
        let p = compute_progress(&g, Some(&entry(&g, 70.0)), now(), 90);
        assert_eq!(p.percent, 0);
    }

    #[test]
    fn test_gain_mass_symmetric() {
        let g = goal(GoalKind::GainMass, 70.0, 80.0);
        assert_eq!(
            compute_progress(&g, Some(&entry(&g, 75.0)), now(), 90).percent,
            50
        );
        assert_eq!(
            compute_progress(&g, Some(&entry(&g, 85.0)), now(), 90).percent,
            100
        );
        assert_eq!(
            compute_progress(&g, Some(&entry(&g, 65.0)), now(), 90).percent,
            0
        );

        let malformed = goal(GoalKind::GainMass, 80.0, 70.0);
        assert_eq!(
            compute_progress(&malformed, Some(&entry(&malformed, 90.0)), now(), 90).percent,
            0
        );
    }

    #[test]
    fn test_no_entry_falls_back_to_baseline() {
        let g = goal(GoalKind::LoseWeight, 90.0, 80.0);
        let p = compute_progress(&g, None, now(), 90);
        assert_eq!(p.percent, 0);
        assert_eq!(p.current_weight, 90.0);
        assert_eq!(p.weight_difference, -10.0);
    }

    #[test]
    fn test_weight_difference_sign_and_rounding() {
        let g = goal(GoalKind::LoseWeight, 90.0, 80.0);
        let p = compute_progress(&g, Some(&entry(&g, 85.0)), now(), 90);
        assert_eq!(p.weight_difference, -5.0);

        let p = compute_progress(&g, Some(&entry(&g, 85.04)), now(), 90);
        assert_eq!(p.weight_difference, -5.0);
        let p = compute_progress(&g, Some(&entry(&g, 85.06)), now(), 90);
        assert_eq!(p.weight_difference, -5.1);
    }

    #[test]
    fn test_conditioning_default_window_midpoint() {
        let g = goal(GoalKind::ImproveConditioning, 90.0, 90.0);
        let halfway = g.created_at + Duration::days(45);
        let p = compute_progress(&g, None, halfway, 90);
        assert_eq!(p.percent, 50);
    }

    #[test]
    fn test_conditioning_explicit_deadline() {
        let mut g = goal(GoalKind::ImproveConditioning, 90.0, 90.0);
        g.deadline = Some(g.created_at + Duration::days(30));

        let p = compute_progress(&g, None, g.created_at + Duration::days(15), 90);
        assert_eq!(p.percent, 50);

        // Past the deadline clamps at 100.
        let p = compute_progress(&g, None, g.created_at + Duration::days(60), 90);
        assert_eq!(p.percent, 100);
    }

    #[test]
    fn test_conditioning_deadline_before_creation_is_zero() {
        let mut g = goal(GoalKind::ImproveConditioning, 90.0, 90.0);
        g.deadline = Some(g.created_at - Duration::days(1));
        let p = compute_progress(&g, None, now(), 90);
        assert_eq!(p.percent, 0);
    }
}
