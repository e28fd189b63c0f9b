use mihrab_common::Coordinate;
use serde::{Deserialize, Serialize};

/// Initial great-circle bearing from one point toward another, in degrees
/// clockwise from north, always in [0, 360).
///
/// `initial_bearing(a, a)` is 0.0 (atan2(0, 0) is defined as 0), so a
/// degenerate query never errors.
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let d_lon = (to.lon - from.lon).to_radians();
    let from_lat = from.lat.to_radians();
    let to_lat = to.lat.to_radians();

    let y = d_lon.sin() * to_lat.cos();
    let x = from_lat.cos() * to_lat.sin() - from_lat.sin() * to_lat.cos() * d_lon.cos();

    let raw = y.atan2(x).to_degrees();
    (raw + 360.0) % 360.0
}

/// One of the 16 named compass sectors, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

const CLOCKWISE: [CompassPoint; 16] = [
    CompassPoint::N,
    CompassPoint::Nne,
    CompassPoint::Ne,
    CompassPoint::Ene,
    CompassPoint::E,
    CompassPoint::Ese,
    CompassPoint::Se,
    CompassPoint::Sse,
    CompassPoint::S,
    CompassPoint::Ssw,
    CompassPoint::Sw,
    CompassPoint::Wsw,
    CompassPoint::W,
    CompassPoint::Wnw,
    CompassPoint::Nw,
    CompassPoint::Nnw,
];

impl CompassPoint {
    /// Classify a bearing into its 22.5-degree sector. The rounding is
    /// half-away-from-zero, so an exact sector boundary (11.25) goes to the
    /// clockwise neighbor. Inputs at or past 360 wrap back to N.
    pub fn from_degrees(bearing: f64) -> Self {
        let idx = ((bearing / 22.5).round() as usize) % 16;
        CLOCKWISE[idx]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::Nne => "NNE",
            Self::Ne => "NE",
            Self::Ene => "ENE",
            Self::E => "E",
            Self::Ese => "ESE",
            Self::Se => "SE",
            Self::Sse => "SSE",
            Self::S => "S",
            Self::Ssw => "SSW",
            Self::Sw => "SW",
            Self::Wsw => "WSW",
            Self::W => "W",
            Self::Wnw => "WNW",
            Self::Nw => "NW",
            Self::Nnw => "NNW",
        }
    }
}

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_due_north() {
        let b = initial_bearing(Coordinate::new(35.0, 139.0), Coordinate::new(36.0, 139.0));
        assert!(b.abs() < 0.01 || (b - 360.0).abs() < 0.01, "got {b}");
    }

    #[test]
    fn bearing_due_east() {
        let b = initial_bearing(Coordinate::new(0.0, 139.0), Coordinate::new(0.0, 140.0));
        assert!((b - 90.0).abs() < 0.01, "got {b}");
    }

    #[test]
    fn bearing_due_south() {
        let b = initial_bearing(Coordinate::new(36.0, 139.0), Coordinate::new(35.0, 139.0));
        assert!((b - 180.0).abs() < 0.01, "got {b}");
    }

    #[test]
    fn bearing_due_west() {
        let b = initial_bearing(Coordinate::new(0.0, 140.0), Coordinate::new(0.0, 139.0));
        assert!((b - 270.0).abs() < 0.01, "got {b}");
    }

    #[test]
    fn bearing_always_in_range() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(89.0, 170.0),
            Coordinate::new(-89.0, -170.0),
            Coordinate::new(21.4225, 39.8262),
            Coordinate::new(-33.87, 151.21),
        ];
        for from in points {
            for to in points {
                let b = initial_bearing(from, to);
                assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
            }
        }
    }

    #[test]
    fn bearing_of_identical_points_is_defined() {
        let p = Coordinate::new(21.0, 40.0);
        assert_eq!(initial_bearing(p, p), 0.0);
    }

    #[test]
    fn compass_north_wraps() {
        assert_eq!(CompassPoint::from_degrees(0.0), CompassPoint::N);
        assert_eq!(CompassPoint::from_degrees(359.9), CompassPoint::N);
        assert_eq!(CompassPoint::from_degrees(360.0), CompassPoint::N);
    }

    #[test]
    fn compass_cardinals() {
        assert_eq!(CompassPoint::from_degrees(90.0), CompassPoint::E);
        assert_eq!(CompassPoint::from_degrees(180.0), CompassPoint::S);
        assert_eq!(CompassPoint::from_degrees(270.0), CompassPoint::W);
    }

    #[test]
    fn compass_sector_boundary_rounds_up() {
        // 11.25 sits exactly between N and NNE; half-up puts it in NNE
        assert_eq!(CompassPoint::from_degrees(11.25), CompassPoint::Nne);
        assert_eq!(CompassPoint::from_degrees(11.24), CompassPoint::N);
    }

    #[test]
    fn compass_labels() {
        assert_eq!(CompassPoint::from_degrees(22.5).label(), "NNE");
        assert_eq!(CompassPoint::from_degrees(337.5).label(), "NNW");
        assert_eq!(CompassPoint::Sw.to_string(), "SW");
    }
}
