//! Pure filtering and ranking rules for trainer discovery.
//!
//! All functions take "today"/coordinates as parameters so the matching rules
//! stay deterministic; the service layer supplies the clock and collaborator
//! data (swipe exclusions, ratings, geocoded coordinates).

use crate::domain::{haversine_km, GeoPoint, Trainer};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Criteria supplied by the requesting member.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFilters {
    pub gender: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    /// Requester coordinates; distance is only computed when present.
    pub origin: Option<GeoPoint>,
    pub radius_km: Option<f64>,
    /// Desired workout/service types; empty means no restriction.
    pub workout_types: Vec<String>,
}

/// Translate age bounds into an inclusive birth-date window for "today".
///
/// Returns (earliest, latest) acceptable birth dates. The upper age bound
/// reaches back `max_age + 1` years; this boundary is inherited behavior and
/// is pinned by tests rather than corrected.
pub fn birth_date_window(
    min_age: Option<i64>,
    max_age: Option<i64>,
    today: NaiveDate,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let earliest = max_age.map(|max| years_back(today, max + 1));
    let latest = min_age.map(|min| years_back(today, min));
    (earliest, latest)
}

/// `date` shifted back by `years`. Feb 29 collapses to Feb 28 on non-leap years.
fn years_back(date: NaiveDate, years: i64) -> NaiveDate {
    let year = date.year() - years as i32;
    date.with_year(year).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(year, 2, 28).expect("Feb 28 is always a valid date")
    })
}

/// Whole years completed, adjusted by whether the birthday has occurred yet
/// this year.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = (today.year() - birth_date.year()) as i64;
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Gender, age window, and workout-type checks for one candidate.
pub fn matches_profile(
    trainer: &Trainer,
    service_names: &[String],
    filters: &DiscoveryFilters,
    today: NaiveDate,
) -> bool {
    if let Some(gender) = &filters.gender {
        if &trainer.gender != gender {
            return false;
        }
    }

    let (earliest, latest) = birth_date_window(filters.min_age, filters.max_age, today);
    if let Some(earliest) = earliest {
        if trainer.birth_date < earliest {
            return false;
        }
    }
    if let Some(latest) = latest {
        if trainer.birth_date > latest {
            return false;
        }
    }

    if !filters.workout_types.is_empty() {
        let offers_any = filters.workout_types.iter().any(|wanted| {
            service_names
                .iter()
                .any(|offered| offered.eq_ignore_ascii_case(wanted))
        });
        if !offers_any {
            return false;
        }
    }

    true
}

/// Distance between requester and trainer, when both sides have coordinates.
/// Trainer coordinates come from the geocoding collaborator and are usually
/// absent today; absence yields None rather than a fabricated value.
pub fn distance_between(origin: Option<GeoPoint>, location: Option<GeoPoint>) -> Option<f64> {
    match (origin, location) {
        (Some(a), Some(b)) => Some(haversine_km(a, b)),
        _ => None,
    }
}

/// The radius filter only applies to candidates with a computed distance;
/// missing data never excludes a trainer.
pub fn within_radius(distance: Option<f64>, radius_km: Option<f64>) -> bool {
    match (distance, radius_km) {
        (Some(d), Some(r)) => d <= r,
        _ => true,
    }
}

/// Candidates with a known distance rank ascending, ahead of those without.
pub fn compare_distances(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
