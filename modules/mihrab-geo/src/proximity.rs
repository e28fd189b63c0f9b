use mihrab_common::{Coordinate, Masjid};
use serde::{Deserialize, Serialize};

use crate::distance::{haversine, DistanceUnit};

/// One directory entry annotated with its distance from the query origin,
/// in miles. Derived per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityMatch {
    pub masjid: Masjid,
    pub distance_miles: f64,
}

/// All entries within `radius_miles` of `origin`, closest first.
///
/// Entries without coordinates cannot be measured and are skipped. The
/// radius boundary is inclusive. Ties keep their input order (the sort is
/// stable and distance is the only key). An empty result is an empty vec,
/// never an error.
pub fn find_within(origin: Coordinate, entries: &[Masjid], radius_miles: f64) -> Vec<ProximityMatch> {
    let mut matches: Vec<ProximityMatch> = entries
        .iter()
        .filter_map(|m| {
            let coord = m.coordinates?;
            let distance_miles = haversine(origin, coord, DistanceUnit::Miles);
            (distance_miles <= radius_miles).then(|| ProximityMatch {
                masjid: m.clone(),
                distance_miles,
            })
        })
        .collect();

    matches.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    matches
}
