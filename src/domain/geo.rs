//! Great-circle distance between latitude/longitude points.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance in kilometers, rounded to 2 decimals.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let distance = 2.0 * EARTH_RADIUS_KM * h.sqrt().asin();

    (distance * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.5, "got {}", d);
    }

    #[test]
    fn test_zero_distance() {
        let p = GeoPoint::new(-23.55, -46.63);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = GeoPoint::new(-23.55, -46.63);
        let b = GeoPoint::new(-22.91, -43.17);
        assert_eq!(haversine_km(a, b), haversine_km(b, a));
    }

    #[test]
    fn test_sao_paulo_to_rio() {
        // Roughly 360 km between city centers.
        let sp = GeoPoint::new(-23.5505, -46.6333);
        let rio = GeoPoint::new(-22.9068, -43.1729);
        let d = haversine_km(sp, rio);
        assert!((d - 360.0).abs() < 10.0, "got {}", d);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.003, 0.004));
        assert_eq!((d * 100.0).round() / 100.0, d);
    }
}
