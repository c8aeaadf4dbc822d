//! Map link derivation
//!
//! Builds a Google Maps URL from whatever location data a shipment carries.
//! Priority, first satisfied wins:
//! 1. origin + destination coordinates → driving directions
//! 2. current position coordinates → point query
//! 3. discrete `lat`/`lng` → point query
//! 4. location address → point query by text
//!
//! No API key is needed; the result is a plain link.

use crate::types::{CanonicalShipment, Coordinates};
use serde::Serialize;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";
const QUERY_BASE: &str = "https://www.google.com/maps?q=";

/// Label for a directions link
pub const DIRECTIONS_LABEL: &str = "Click to view location";
/// Label for a single-location link
pub const LOCATION_LABEL: &str = "Open location in Google Maps";
/// Text shown in place of a link when no location is usable
pub const NO_LOCATION_MESSAGE: &str = "Map view will appear here after tracking";

/// What kind of link was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapLinkKind {
    Directions,
    Location,
    None,
}

/// A derived map link with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapLink {
    pub kind: MapLinkKind,
    /// Empty when `kind` is [`MapLinkKind::None`]
    pub url: String,
    pub label: String,
}

impl MapLink {
    /// Derive the link for a shipment
    pub fn for_shipment(shipment: &CanonicalShipment) -> Self {
        let (kind, url) = derive(shipment);
        let label = match kind {
            MapLinkKind::Directions => DIRECTIONS_LABEL,
            MapLinkKind::Location => LOCATION_LABEL,
            MapLinkKind::None => NO_LOCATION_MESSAGE,
        };
        Self {
            kind,
            url,
            label: label.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.kind != MapLinkKind::None
    }
}

/// Map URL for a shipment; empty string when there is no usable location
pub fn map_url(shipment: &CanonicalShipment) -> String {
    derive(shipment).1
}

fn derive(shipment: &CanonicalShipment) -> (MapLinkKind, String) {
    if let (Some(origin), Some(destination)) = (usable(shipment.from_coords), usable(shipment.to_coords)) {
        return (MapLinkKind::Directions, directions_url(origin, destination));
    }

    if let Some(coords) = usable(shipment.coords) {
        return (MapLinkKind::Location, point_url(coords));
    }

    if let (Some(lat), Some(lng)) = (shipment.lat, shipment.lng) {
        if let Some(coords) = Coordinates::new(lat, lng) {
            return (MapLinkKind::Location, point_url(coords));
        }
    }

    let address = shipment.location_address.trim();
    if !address.is_empty() {
        return (
            MapLinkKind::Location,
            format!("{}{}", QUERY_BASE, encode_uri_component(address)),
        );
    }

    (MapLinkKind::None, String::new())
}

/// Canonical records only hold finite pairs, but the fields are public
fn usable(coords: Option<Coordinates>) -> Option<Coordinates> {
    coords.and_then(|c| Coordinates::new(c.lat, c.lng))
}

fn directions_url(origin: Coordinates, destination: Coordinates) -> String {
    format!(
        "{}&origin={}&destination={}&travelmode=driving",
        DIRECTIONS_BASE,
        encode_uri_component(&origin.to_string()),
        encode_uri_component(&destination.to_string()),
    )
}

fn point_url(coords: Coordinates) -> String {
    format!("{}{},{}", QUERY_BASE, coords.lat, coords.lng)
}

/// Percent-encode every byte outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub fn encode_uri_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::raw::RawShipment;

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("Austin, TX"), "Austin%2C%20TX");
        assert_eq!(encode_uri_component("a-b_c.d!~*'()"), "a-b_c.d!~*'()");
        assert_eq!(encode_uri_component("São Paulo"), "S%C3%A3o%20Paulo");
        assert_eq!(encode_uri_component("1+1&q=2"), "1%2B1%26q%3D2");
    }

    #[test]
    fn test_directions_preferred() {
        let shipment = normalize(
            &RawShipment::new("X")
                .with_route_coords([32.7767, -96.797], [44.5, -89.5])
                .with_coords([1.0, 2.0])
                .with_location_address("Wisconsin"),
        );
        let link = MapLink::for_shipment(&shipment);
        assert_eq!(link.kind, MapLinkKind::Directions);
        assert_eq!(
            link.url,
            "https://www.google.com/maps/dir/?api=1&origin=32.7767%2C-96.797&destination=44.5%2C-89.5&travelmode=driving"
        );
        assert_eq!(link.label, DIRECTIONS_LABEL);
    }

    #[test]
    fn test_coords_only() {
        let mut shipment = normalize(&RawShipment::new("X").with_coords([30.2672, -97.7431]));
        // from_coords falls back to coords, so directions need a destination too
        assert_eq!(map_url(&shipment), "https://www.google.com/maps?q=30.2672,-97.7431");

        shipment.from_coords = None;
        assert_eq!(map_url(&shipment), "https://www.google.com/maps?q=30.2672,-97.7431");
    }

    #[test]
    fn test_discrete_lat_lng() {
        let mut shipment = normalize(&RawShipment::new("X"));
        shipment.lat = Some(10.0);
        shipment.lng = Some(20.0);
        assert_eq!(map_url(&shipment), "https://www.google.com/maps?q=10,20");
    }

    #[test]
    fn test_address_only() {
        let shipment = normalize(&RawShipment::new("X").with_location_address("Austin, TX"));
        let link = MapLink::for_shipment(&shipment);
        assert_eq!(link.url, "https://www.google.com/maps?q=Austin%2C%20TX");
        assert_eq!(link.label, LOCATION_LABEL);
    }

    #[test]
    fn test_nothing_usable() {
        let shipment = normalize(&RawShipment::new("X"));
        let link = MapLink::for_shipment(&shipment);
        assert_eq!(link.url, "");
        assert!(!link.is_available());
        assert_eq!(link.label, NO_LOCATION_MESSAGE);
    }
}
