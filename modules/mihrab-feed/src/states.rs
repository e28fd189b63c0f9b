/// Approximate bounding box of one US state, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

const fn bbox(south: f64, west: f64, north: f64, east: f64) -> BoundingBox {
    BoundingBox {
        south,
        west,
        north,
        east,
    }
}

/// All 50 states plus DC, keyed by snake_case slug.
pub const US_STATES: [(&str, BoundingBox); 51] = [
    ("alabama", bbox(30.2, -88.5, 35.0, -84.9)),
    ("alaska", bbox(51.2, -179.1, 71.4, -129.9)),
    ("arizona", bbox(31.3, -114.8, 37.0, -109.0)),
    ("arkansas", bbox(33.0, -94.6, 36.5, -89.6)),
    ("california", bbox(32.5, -124.4, 42.0, -114.1)),
    ("colorado", bbox(37.0, -109.1, 41.0, -102.0)),
    ("connecticut", bbox(40.9, -73.7, 42.1, -71.8)),
    ("delaware", bbox(38.4, -75.8, 39.8, -75.0)),
    ("florida", bbox(24.5, -87.6, 31.0, -80.0)),
    ("georgia", bbox(30.4, -85.6, 35.0, -80.8)),
    ("hawaii", bbox(18.9, -160.2, 22.2, -154.8)),
    ("idaho", bbox(42.0, -117.2, 49.0, -111.0)),
    ("illinois", bbox(36.9, -91.5, 42.5, -87.5)),
    ("indiana", bbox(37.8, -88.1, 41.8, -84.8)),
    ("iowa", bbox(40.4, -96.6, 43.5, -90.1)),
    ("kansas", bbox(37.0, -102.1, 40.0, -94.6)),
    ("kentucky", bbox(36.5, -89.6, 39.1, -82.0)),
    ("louisiana", bbox(28.9, -94.0, 33.0, -89.0)),
    ("maine", bbox(43.0, -71.1, 47.5, -66.9)),
    ("maryland", bbox(37.9, -79.5, 39.7, -75.0)),
    ("massachusetts", bbox(41.2, -73.5, 42.9, -70.0)),
    ("michigan", bbox(41.7, -90.4, 48.2, -82.4)),
    ("minnesota", bbox(43.5, -97.2, 49.4, -89.5)),
    ("mississippi", bbox(30.2, -91.7, 35.0, -88.1)),
    ("missouri", bbox(36.0, -95.8, 40.6, -89.1)),
    ("montana", bbox(44.4, -116.0, 49.0, -104.0)),
    ("nebraska", bbox(40.0, -104.1, 43.0, -95.3)),
    ("nevada", bbox(35.0, -120.0, 42.0, -114.0)),
    ("new_hampshire", bbox(42.7, -72.6, 45.3, -70.7)),
    ("new_jersey", bbox(38.9, -75.6, 41.4, -73.9)),
    ("new_mexico", bbox(31.3, -109.1, 37.0, -103.0)),
    ("new_york", bbox(40.5, -79.8, 45.0, -71.9)),
    ("north_carolina", bbox(33.8, -84.3, 36.6, -75.5)),
    ("north_dakota", bbox(45.9, -104.0, 49.0, -96.6)),
    ("ohio", bbox(38.4, -84.8, 42.0, -80.5)),
    ("oklahoma", bbox(33.6, -103.0, 37.0, -94.4)),
    ("oregon", bbox(42.0, -124.6, 46.3, -116.5)),
    ("pennsylvania", bbox(39.7, -80.5, 42.3, -74.7)),
    ("rhode_island", bbox(41.1, -71.9, 42.0, -71.1)),
    ("south_carolina", bbox(32.0, -83.4, 35.2, -78.5)),
    ("south_dakota", bbox(42.5, -104.1, 46.0, -96.4)),
    ("tennessee", bbox(35.0, -90.3, 36.7, -81.6)),
    ("texas", bbox(25.8, -106.6, 36.5, -93.5)),
    ("utah", bbox(37.0, -114.1, 42.0, -109.0)),
    ("vermont", bbox(42.7, -73.4, 45.0, -71.5)),
    ("virginia", bbox(36.5, -83.7, 39.5, -75.2)),
    ("washington", bbox(45.5, -124.8, 49.0, -116.9)),
    ("west_virginia", bbox(37.2, -82.6, 40.6, -77.7)),
    ("wisconsin", bbox(42.5, -92.9, 47.1, -86.8)),
    ("wyoming", bbox(41.0, -111.1, 45.0, -104.1)),
    ("district_of_columbia", bbox(38.8, -77.1, 39.0, -76.9)),
];

/// Look up a state's bounding box by slug.
pub fn bounding_box(slug: &str) -> Option<BoundingBox> {
    US_STATES
        .iter()
        .find(|(name, _)| *name == slug)
        .map(|(_, bbox)| *bbox)
}

/// "new_jersey" -> "New Jersey"
pub fn state_title(slug: &str) -> String {
    slug.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_fifty_states_plus_dc() {
        assert_eq!(US_STATES.len(), 51);
    }

    #[test]
    fn bounding_boxes_are_ordered() {
        for (name, bbox) in US_STATES {
            assert!(bbox.south < bbox.north, "{name}: south >= north");
            assert!(bbox.west < bbox.east, "{name}: west >= east");
        }
    }

    #[test]
    fn lookup_by_slug() {
        assert!(bounding_box("new_jersey").is_some());
        assert!(bounding_box("atlantis").is_none());
    }

    #[test]
    fn titles_from_slugs() {
        assert_eq!(state_title("new_jersey"), "New Jersey");
        assert_eq!(state_title("iowa"), "Iowa");
        assert_eq!(state_title("district_of_columbia"), "District Of Columbia");
    }
}
