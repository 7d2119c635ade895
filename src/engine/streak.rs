//! Achievement rules and the rolling-week window they evaluate against.
//!
//! Rules are pure predicates over workout statistics. Adding a new unlock
//! means adding a rule to [`rule_set`]; existing rules are never edited.

use crate::domain::{AchievementKind, AchievementPayload};
use chrono::{DateTime, Datelike, Duration, Utc};
use serde_json::json;

/// Read-only workout counts a rule evaluates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkoutStats {
    /// Total workouts ever recorded for the user.
    pub total_workouts: i64,
    /// Workouts recorded within the current rolling week.
    pub workouts_this_week: i64,
}

/// The rolling week containing `now`: starts on the most recent Sunday at
/// 00:00:00 and ends 6 days later at 23:59:59.999, both inclusive.
///
/// This is deliberately NOT an ISO calendar week; the window shifts with
/// today's weekday index (Sunday = 0) and changes which workouts count
/// toward the streak.
pub fn rolling_week_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let days_from_sunday = now.weekday().num_days_from_sunday() as i64;
    let start = (now - Duration::days(days_from_sunday))
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    let end = start + Duration::days(7) - Duration::milliseconds(1);
    (start, end)
}

/// A single achievement rule: predicate plus the display payload it owns.
pub trait AchievementRule: Send + Sync {
    fn kind(&self) -> AchievementKind;
    fn unlocked(&self, stats: &WorkoutStats) -> bool;
    fn payload(&self) -> AchievementPayload;
}

/// Fires on the user's very first workout.
pub struct FirstWorkoutRule;

impl AchievementRule for FirstWorkoutRule {
    fn kind(&self) -> AchievementKind {
        AchievementKind::FirstWorkout
    }

    fn unlocked(&self, stats: &WorkoutStats) -> bool {
        stats.total_workouts == 1
    }

    fn payload(&self) -> AchievementPayload {
        AchievementPayload {
            title: "First workout".to_string(),
            description: "You logged your first workout. The journey starts here.".to_string(),
            icon: Some("dumbbell".to_string()),
            metadata: None,
        }
    }
}

/// Fires when the user reaches the target workout count within the rolling week.
pub struct WeekStreakRule {
    pub target: i64,
}

impl AchievementRule for WeekStreakRule {
    fn kind(&self) -> AchievementKind {
        AchievementKind::WeekStreak
    }

    fn unlocked(&self, stats: &WorkoutStats) -> bool {
        stats.workouts_this_week >= self.target
    }

    fn payload(&self) -> AchievementPayload {
        AchievementPayload {
            title: "Week streak".to_string(),
            description: format!("{} workouts in a single week. Keep it up!", self.target),
            icon: Some("flame".to_string()),
            metadata: Some(json!({ "target": self.target })),
        }
    }
}

/// The ordered rule list evaluated after every workout action.
pub fn rule_set(week_streak_target: i64) -> Vec<Box<dyn AchievementRule>> {
    vec![
        Box::new(FirstWorkoutRule),
        Box::new(WeekStreakRule {
            target: week_streak_target,
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rolling_week_from_midweek() {
        // 2024-01-10 is a Wednesday (days_from_sunday = 3).
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 30, 0).unwrap();
        let (start, end) = rolling_week_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2024, 1, 13, 23, 59, 59).unwrap()
                + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_rolling_week_on_sunday_starts_today() {
        let now = Utc.with_ymd_and_hms(2024, 1, 7, 8, 0, 0).unwrap();
        let (start, _) = rolling_week_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_rolling_week_on_saturday_reaches_back_six_days() {
        let now = Utc.with_ymd_and_hms(2024, 1, 13, 23, 0, 0).unwrap();
        let (start, end) = rolling_week_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap());
        assert!(end > now);
    }

    #[test]
    fn test_week_boundary_milliseconds() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let (start, end) = rolling_week_bounds(now);

        // Sunday 23:59:59.999 of the current week is inside the window.
        let sunday_last_ms = start + Duration::days(1) - Duration::milliseconds(1);
        assert!(sunday_last_ms >= start && sunday_last_ms <= end);

        // The last millisecond of the window is Saturday 23:59:59.999.
        assert!(end >= start);
        // Monday 00:00:00.000 of the following week falls outside.
        let next_monday = start + Duration::days(8);
        assert!(next_monday > end);
        // So does the very first instant after the window.
        assert!(end + Duration::milliseconds(1) > end);
    }

    #[test]
    fn test_first_workout_rule_only_on_exactly_one() {
        let rule = FirstWorkoutRule;
        assert!(!rule.unlocked(&WorkoutStats::default()));
        assert!(rule.unlocked(&WorkoutStats {
            total_workouts: 1,
            workouts_this_week: 1,
        }));
        assert!(!rule.unlocked(&WorkoutStats {
            total_workouts: 2,
            workouts_this_week: 2,
        }));
    }

    #[test]
    fn test_week_streak_rule_threshold() {
        let rule = WeekStreakRule { target: 5 };
        assert!(!rule.unlocked(&WorkoutStats {
            total_workouts: 10,
            workouts_this_week: 4,
        }));
        assert!(rule.unlocked(&WorkoutStats {
            total_workouts: 10,
            workouts_this_week: 5,
        }));
        assert!(rule.unlocked(&WorkoutStats {
            total_workouts: 10,
            workouts_this_week: 6,
        }));
    }

    #[test]
    fn test_rule_set_order_and_payloads() {
        let rules = rule_set(5);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].kind(), AchievementKind::FirstWorkout);
        assert_eq!(rules[1].kind(), AchievementKind::WeekStreak);

        let payload = rules[1].payload();
        assert_eq!(payload.metadata.unwrap()["target"], 5);
    }
}
