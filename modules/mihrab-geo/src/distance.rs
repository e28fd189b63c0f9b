use mihrab_common::Coordinate;

const EARTH_RADIUS_MILES: f64 = 3959.0;
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance unit for haversine calculations. Callers always pick the unit
/// explicitly; the earth radius is never hard-coded at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

impl DistanceUnit {
    fn earth_radius(self) -> f64 {
        match self {
            Self::Miles => EARTH_RADIUS_MILES,
            Self::Kilometers => EARTH_RADIUS_KM,
        }
    }
}

/// Haversine great-circle distance between two points in the given unit.
///
/// Total over all valid coordinates: identical points yield 0 and the
/// atan2 form stays finite at antipodes, where the naive asin form can go
/// NaN from float rounding.
pub fn haversine(a: Coordinate, b: Coordinate, unit: DistanceUnit) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    unit.earth_radius() * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(37.7749, -122.4194);
        assert_eq!(haversine(p, p, DistanceUnit::Kilometers), 0.0);
    }

    #[test]
    fn symmetric() {
        let sf = Coordinate::new(37.7749, -122.4194);
        let la = Coordinate::new(34.0522, -118.2437);
        let ab = haversine(sf, la, DistanceUnit::Miles);
        let ba = haversine(la, sf, DistanceUnit::Miles);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn quarter_great_circle_km() {
        let d = haversine(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 90.0),
            DistanceUnit::Kilometers,
        );
        assert!((d - 10007.54).abs() < 0.1, "Expected ~10007.54 km, got {d}");
    }

    #[test]
    fn sf_to_la_miles() {
        // SF to LA is ~347 miles
        let d = haversine(
            Coordinate::new(37.7749, -122.4194),
            Coordinate::new(34.0522, -118.2437),
            DistanceUnit::Miles,
        );
        assert!((d - 347.0).abs() < 5.0, "Expected ~347 miles, got {d}");
    }

    #[test]
    fn antipodal_points_are_finite() {
        let d = haversine(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 180.0),
            DistanceUnit::Kilometers,
        );
        assert!(d.is_finite());
        // Half the circumference of the spherical earth
        assert!((d - 20015.0).abs() < 1.0, "Expected ~20015 km, got {d}");
    }

    #[test]
    fn unit_consistency() {
        let a = Coordinate::new(44.96, -93.27);
        let b = Coordinate::new(44.94, -93.09);
        let miles = haversine(a, b, DistanceUnit::Miles);
        let km = haversine(a, b, DistanceUnit::Kilometers);
        // 1 mile ~ 1.609 km
        assert!((km / miles - 1.609).abs() < 0.01);
    }
}
