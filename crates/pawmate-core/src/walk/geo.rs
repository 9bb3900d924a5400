//! Great-circle distance between positional fixes.

use super::model::LocationFix;

/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two fixes, in meters.
pub fn distance_between(from: &LocationFix, to: &LocationFix) -> f64 {
    let from_lat = from.latitude.to_radians();
    let to_lat = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2);
    let angular_distance = 2.0 * half_chord.sqrt().asin();

    EARTH_RADIUS_M * angular_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fix(latitude: f64, longitude: f64) -> LocationFix {
        LocationFix::new(latitude, longitude, Utc::now())
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_between(&fix(37.5, 127.0), &fix(37.5, 127.0)), 0.0);
    }

    #[test]
    fn test_one_millidegree_of_longitude_at_equator() {
        // One degree of longitude at the equator spans ~111.195 km.
        let d = distance_between(&fix(0.0, 0.0), &fix(0.0, 0.001));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_symmetry() {
        let a = fix(37.5665, 126.9780);
        let b = fix(37.5796, 126.9770);
        let forward = distance_between(&a, &b);
        let backward = distance_between(&b, &a);
        assert!((forward - backward).abs() < 1e-9);
        assert!(forward > 1400.0 && forward < 1500.0, "got {forward}");
    }
}
