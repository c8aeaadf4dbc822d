//! Shipment Tracker Library
//!
//! A small, synchronous library for looking up shipments by tracking number and
//! turning them into display-ready fields.
//!
//! # Architecture
//!
//! ```text
//! raw records ──► normalize ──► ShipmentStore ──► search ──► project ──► DisplayFields
//! ```
//!
//! - Raw records are loosely-shaped JSON; the normalizer coerces them into
//!   [`CanonicalShipment`] values with a fixed five-step timeline.
//! - The store keeps canonical records in order and supports add/update/remove.
//! - Lookup matches tracking numbers exactly, then by substring.
//! - The render projection derives the map link and formats event times.
//!
//! The library does NOT:
//! - Geocode addresses or call carrier APIs
//! - Persist anything
//! - Produce markup
//!
//! # Example Usage
//!
//! ```
//! use shipment_tracker::{project, ShipmentStore};
//!
//! let store = ShipmentStore::demo();
//! let shipment = store.search("9a 101 234 84").unwrap();
//! let fields = project(shipment);
//!
//! assert_eq!(fields.from_to, "Texas · Austin, TX");
//! assert!(fields.map.url.starts_with("https://www.google.com/maps/dir/?api=1&origin="));
//! ```

// Public modules
pub mod config;
pub mod dataset;
pub mod dates;
pub mod lookup;
pub mod map_link;
pub mod normalizer;
pub mod raw;
pub mod render;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use config::RenderConfig;
pub use dataset::{load_dataset, parse_dataset, DEFAULT_DATASET};
pub use dates::format_date_flexible;
pub use lookup::{find, tracking_key};
pub use map_link::{map_url, MapLink, MapLinkKind};
pub use normalizer::{normalize, normalize_value};
pub use raw::{RawCoords, RawEvent, RawScalar, RawShipment};
pub use render::{not_found_message, project, project_with, DisplayEvent, DisplayFields, StepState};
pub use store::{ShipmentStore, ShipmentSummary};
pub use types::{
    CanonicalShipment, Coordinates, Result, ShipmentEvent, StatusSource, TrackerError,
    DEFAULT_TITLES, MAX_EVENTS, PLACEHOLDER,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: the bundled dataset loads and every record is canonical
        let store = ShipmentStore::demo();
        assert!(!store.is_empty());
        assert!(store.iter().all(|s| s.events.len() == MAX_EVENTS));
    }
}
