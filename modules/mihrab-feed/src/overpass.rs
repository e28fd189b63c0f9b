use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use mihrab_common::{Coordinate, Masjid, MasjidAddress};

use crate::error::FeedError;
use crate::states::BoundingBox;

/// One element of an Overpass response. Nodes carry `lat`/`lon` directly;
/// ways and relations carry a `center` computed by `out center`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// Overpass QL query for all masajid in a bounding box.
pub fn build_query(bbox: BoundingBox) -> String {
    let BoundingBox {
        south,
        west,
        north,
        east,
    } = bbox;
    format!(
        r#"[out:json][timeout:120];
(
  node["amenity"="place_of_worship"]["religion"="muslim"]({south},{west},{north},{east});
  way["amenity"="place_of_worship"]["religion"="muslim"]({south},{west},{north},{east});
  relation["amenity"="place_of_worship"]["religion"="muslim"]({south},{west},{north},{east});
);
out center tags;"#
    )
}

/// Thin client for the Overpass API interpreter endpoint.
pub struct OverpassClient {
    client: reqwest::Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Run one bounding-box query and return the raw elements.
    pub async fn fetch(&self, bbox: BoundingBox) -> Result<Vec<OverpassElement>, FeedError> {
        let query = build_query(bbox);

        let resp = self
            .client
            .post(&self.base_url)
            .form(&[("data", query)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Api(status.as_u16()));
        }

        let body: OverpassResponse = resp.json().await?;
        Ok(body.elements)
    }
}

fn tag<'a>(tags: &'a HashMap<String, String>, keys: &[&str]) -> &'a str {
    keys.iter()
        .find_map(|k| tags.get(*k))
        .map(String::as_str)
        .unwrap_or("")
}

/// Convert one OSM element into a directory record. Elements without a
/// usable coordinate are dropped (they cannot participate in any distance
/// query, which is the directory's whole point).
pub fn parse_masjid(element: &OverpassElement, state: &str) -> Option<Masjid> {
    let coordinate = match (element.lat, element.lon, element.center) {
        (Some(lat), Some(lon), _) => Coordinate::new(lat, lon),
        (_, _, Some(center)) => Coordinate::new(center.lat, center.lon),
        _ => return None,
    };

    let tags = &element.tags;
    let name = tag(tags, &["name", "name:en", "name:ar"]);
    let name = if name.is_empty() {
        "Unknown Masjid".to_string()
    } else {
        name.to_string()
    };

    let house_number = tag(tags, &["addr:housenumber"]);
    let street_tag = tag(tags, &["addr:street"]);
    let street = if !house_number.is_empty() && !street_tag.is_empty() {
        format!("{house_number} {street_tag}")
    } else if !street_tag.is_empty() {
        street_tag.to_string()
    } else {
        house_number.to_string()
    };

    let address = MasjidAddress {
        street,
        city: tag(tags, &["addr:city"]).to_string(),
        state: {
            let tagged = tag(tags, &["addr:state"]);
            if tagged.is_empty() {
                state.to_string()
            } else {
                tagged.to_string()
            }
        },
        zip: tag(tags, &["addr:postcode"]).to_string(),
        full: tag(tags, &["addr:full"]).to_string(),
    };

    Some(Masjid {
        id: format!("{}_{}", element.kind, element.id),
        name,
        address,
        phone: tag(tags, &["phone", "contact:phone"]).to_string(),
        website: tag(tags, &["website", "contact:website"]).to_string(),
        email: tag(tags, &["email", "contact:email"]).to_string(),
        coordinates: Some(coordinate),
        denomination: tag(tags, &["denomination"]).to_string(),
        opening_hours: tag(tags, &["opening_hours"]).to_string(),
        osm_type: element.kind.clone(),
        osm_id: element.id,
    })
}
