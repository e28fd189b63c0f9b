use mihrab_common::Coordinate;
use serde::{Deserialize, Serialize};

use crate::bearing::{initial_bearing, CompassPoint};
use crate::distance::{haversine, DistanceUnit};

/// The Kaaba in Makkah. Every Qibla computation points here.
pub const KAABA: Coordinate = Coordinate {
    lat: 21.4225,
    lon: 39.8262,
};

const KM_TO_MILES: f64 = 0.621371;

/// Direction and distance from a point to the Kaaba.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QiblaBearing {
    pub bearing_degrees: f64,
    pub distance_km: f64,
    pub distance_miles: f64,
    pub compass: CompassPoint,
}

/// Compute the Qibla from the given position: great-circle bearing toward
/// the Kaaba plus the distance in both units.
pub fn qibla(from: Coordinate) -> QiblaBearing {
    let bearing_degrees = initial_bearing(from, KAABA);
    let distance_km = haversine(from, KAABA, DistanceUnit::Kilometers);

    QiblaBearing {
        bearing_degrees,
        distance_km,
        distance_miles: distance_km * KM_TO_MILES,
        compass: CompassPoint::from_degrees(bearing_degrees),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_near_mecca_points_at_kaaba() {
        // ~50km south-east of the Kaaba; the Qibla runs north-west
        let q = qibla(Coordinate::new(21.0, 40.0));
        assert!(q.distance_km > 0.0 && q.distance_km < 100.0, "got {} km", q.distance_km);
        assert!(
            (330.0..345.0).contains(&q.bearing_degrees),
            "expected NNW-ish bearing, got {}",
            q.bearing_degrees
        );
        assert_eq!(q.compass, CompassPoint::Nnw);
    }

    #[test]
    fn from_new_york_heads_east_north_east() {
        let q = qibla(Coordinate::new(40.7128, -74.006));
        // The great circle from NYC starts ~58 degrees, ENE
        assert!((q.bearing_degrees - 58.5).abs() < 2.0, "got {}", q.bearing_degrees);
        assert_eq!(q.compass, CompassPoint::Ene);
        assert!((q.distance_km - 10300.0).abs() < 150.0, "got {} km", q.distance_km);
    }

    #[test]
    fn mile_conversion_is_consistent() {
        let q = qibla(Coordinate::new(51.5074, -0.1278));
        assert!((q.distance_miles / q.distance_km - 0.621371).abs() < 1e-9);
    }

    #[test]
    fn at_the_kaaba_itself() {
        let q = qibla(KAABA);
        assert_eq!(q.distance_km, 0.0);
        assert!((0.0..360.0).contains(&q.bearing_degrees));
    }
}
