use serde::{Deserialize, Serialize};

// --- Geo Types ---

/// A point on the earth's surface. Latitude in [-90, 90], longitude in
/// [-180, 180], degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are inside their valid degree ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

// --- Directory Types ---

/// Address components as tagged in OpenStreetMap. Fields default to empty
/// strings; `full` is only present when the source carried `addr:full`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasjidAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub full: String,
}

impl MasjidAddress {
    /// Best single-line rendering: `addr:full` when present, otherwise the
    /// non-empty components joined with commas.
    pub fn display_line(&self) -> String {
        if !self.full.is_empty() {
            return self.full.clone();
        }
        [&self.street, &self.city, &self.state, &self.zip]
            .into_iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A directory record for one masjid, as produced by the OSM feed.
/// The `id` is `"{osm_type}_{osm_id}"` and is unique and stable across
/// refreshes. Records without coordinates stay in the directory but are
/// excluded from any distance query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Masjid {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: MasjidAddress,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub denomination: String,
    #[serde(default)]
    pub opening_hours: String,
    #[serde(default)]
    pub osm_type: String,
    #[serde(default)]
    pub osm_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validity_ranges() {
        assert!(Coordinate::new(40.0, -74.0).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.1, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
    }

    #[test]
    fn masjid_deserializes_from_feed_json() {
        let raw = r#"{
            "id": "node_123456",
            "name": "Masjid As-Salam",
            "address": {"street": "12 Main St", "city": "Trenton", "state": "New Jersey", "zip": "08601", "full": ""},
            "phone": "",
            "website": "https://example.org",
            "email": "",
            "coordinates": {"lat": 40.22, "lon": -74.76},
            "denomination": "",
            "opening_hours": "",
            "osm_type": "node",
            "osm_id": 123456
        }"#;
        let m: Masjid = serde_json::from_str(raw).unwrap();
        assert_eq!(m.id, "node_123456");
        assert_eq!(m.coordinates.unwrap().lat, 40.22);
        assert_eq!(m.address.display_line(), "12 Main St, Trenton, New Jersey, 08601");
    }

    #[test]
    fn masjid_tolerates_missing_optional_fields() {
        let raw = r#"{"id": "way_9", "name": "Unknown Masjid"}"#;
        let m: Masjid = serde_json::from_str(raw).unwrap();
        assert!(m.coordinates.is_none());
        assert!(m.phone.is_empty());
        assert_eq!(m.address.display_line(), "");
    }

    #[test]
    fn address_prefers_addr_full() {
        let addr = MasjidAddress {
            street: "12 Main St".into(),
            full: "12 Main Street, Trenton NJ 08601".into(),
            ..Default::default()
        };
        assert_eq!(addr.display_line(), "12 Main Street, Trenton NJ 08601");
    }
}
