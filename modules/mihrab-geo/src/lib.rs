pub mod bearing;
pub mod distance;
pub mod proximity;
pub mod qibla;

pub use bearing::{initial_bearing, CompassPoint};
pub use distance::{haversine, DistanceUnit};
pub use proximity::{find_within, ProximityMatch};
pub use qibla::{qibla, QiblaBearing, KAABA};
