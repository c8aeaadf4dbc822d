//! Core types for the shipment tracker library
//!
//! This module defines the canonical shipment record produced by the normalizer,
//! the fixed delivery lifecycle it is measured against, and the library error type.
//! Canonical records are plain data: every invariant is established by
//! [`normalize`](crate::normalizer::normalize) and nothing mutates them afterwards.

use serde::Serialize;
use std::fmt;

/// Result type for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Glyph shown wherever a field's true value is absent
pub const PLACEHOLDER: &str = "—";

/// Number of lifecycle steps every shipment timeline is padded or truncated to
pub const MAX_EVENTS: usize = 5;

/// Titles of the five lifecycle steps, indexed by active step
pub const DEFAULT_TITLES: [&str; MAX_EVENTS] = [
    "Label created",
    "Picked up",
    "In transit",
    "Out for delivery",
    "Delivered",
];

/// Highest valid active step index
pub const MAX_ACTIVE_STEP: usize = MAX_EVENTS - 1;

/// Errors that can occur while loading shipment data
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Failed to parse dataset: {0}")]
    DatasetParse(#[from] serde_json::Error),

    #[error("Invalid dataset: {0}")]
    DatasetShape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated latitude/longitude pair
///
/// Both components are finite. Serializes as a two-element `[lat, lng]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build a pair, rejecting non-finite components
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.lat, coords.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// One step of a shipment timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentEvent {
    /// Step title, never empty
    pub title: String,
    /// Free-form time text, or [`PLACEHOLDER`]
    pub time: String,
    /// Free-form details, possibly empty
    pub details: String,
}

impl ShipmentEvent {
    /// True if this event carries a real time rather than the placeholder
    pub fn has_time(&self) -> bool {
        !self.time.is_empty() && self.time != PLACEHOLDER
    }
}

/// Where a shipment's status text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    /// Looked up from [`DEFAULT_TITLES`] by active step
    Derived,
    /// Supplied by the raw record
    Explicit,
}

/// A shipment record that satisfies all canonical invariants
///
/// - `events` has exactly [`MAX_EVENTS`] entries
/// - `active_step <= MAX_ACTIVE_STEP`
/// - coordinate fields are either absent or finite pairs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalShipment {
    pub tracking_number: String,
    pub from: String,
    pub to: String,
    pub weight: String,
    pub service: String,
    pub estimated_delivery: String,
    pub active_step: usize,
    pub events: Vec<ShipmentEvent>,
    pub coords: Option<Coordinates>,
    pub from_coords: Option<Coordinates>,
    pub to_coords: Option<Coordinates>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub location_address: String,
    pub last_update: String,
    pub status: String,
    #[serde(skip)]
    pub status_source: StatusSource,
}

impl CanonicalShipment {
    /// The lifecycle title matching the current active step
    pub fn step_title(&self) -> &'static str {
        DEFAULT_TITLES[self.active_step.min(MAX_ACTIVE_STEP)]
    }

    /// True once the shipment has reached the final lifecycle step
    pub fn is_delivered(&self) -> bool {
        self.active_step == MAX_ACTIVE_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_reject_non_finite() {
        assert!(Coordinates::new(1.0, 2.0).is_some());
        assert!(Coordinates::new(f64::NAN, 2.0).is_none());
        assert!(Coordinates::new(1.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_coordinates_display_and_serialize() {
        let coords = Coordinates::new(32.7767, -96.797).unwrap();
        assert_eq!(coords.to_string(), "32.7767,-96.797");
        assert_eq!(serde_json::to_string(&coords).unwrap(), "[32.7767,-96.797]");

        let whole = Coordinates::new(10.0, 20.0).unwrap();
        assert_eq!(whole.to_string(), "10,20");
    }

    #[test]
    fn test_event_has_time() {
        let mut event = ShipmentEvent {
            title: "Picked up".to_string(),
            time: PLACEHOLDER.to_string(),
            details: String::new(),
        };
        assert!(!event.has_time());
        event.time = "Oct 2, 2025".to_string();
        assert!(event.has_time());
    }
}
