//! Shipment normalizer
//!
//! Coerces untrusted [`RawShipment`] input into a [`CanonicalShipment`]. The
//! normalizer never fails: malformed input is replaced or defaulted field by
//! field and, where the original data is lost, a warning is logged.
//!
//! # Guarantees
//! - exactly [`MAX_EVENTS`] events
//! - `active_step` in `0..=MAX_ACTIVE_STEP`
//! - coordinates are finite or absent
//! - idempotent: normalizing a canonical record again yields the same record

use crate::raw::{RawEvents, RawScalar, RawShipment};
use crate::types::{
    CanonicalShipment, Coordinates, ShipmentEvent, StatusSource, DEFAULT_TITLES, MAX_ACTIVE_STEP,
    MAX_EVENTS, PLACEHOLDER,
};
use serde::Deserialize;
use serde_json::Value;

/// Normalize a raw record into canonical form
pub fn normalize(raw: &RawShipment) -> CanonicalShipment {
    let tracking_number = raw
        .tracking_number
        .as_ref()
        .and_then(RawScalar::to_trimmed)
        .unwrap_or_default();
    if tracking_number.is_empty() {
        log::warn!("Shipment is missing a tracking number: {:?}", raw);
    }

    let events = normalize_events(raw.events.as_ref());
    let last_update = last_update(&events);

    let active_step = clamp_step(raw.active_step.as_ref());
    let (status, status_source) = match raw.status.as_ref().and_then(RawScalar::to_trimmed) {
        Some(status) => (status, StatusSource::Explicit),
        None => (DEFAULT_TITLES[active_step].to_string(), StatusSource::Derived),
    };

    let coords = raw
        .coords
        .as_ref()
        .and_then(|coords| coords.parse())
        .or_else(|| discrete_coords(raw));
    let from_coords = raw
        .from_coords
        .as_ref()
        .and_then(|coords| coords.parse())
        .or(coords);
    let to_coords = raw.to_coords.as_ref().and_then(|coords| coords.parse());

    let (lat, lng) = match coords {
        Some(coords) => (Some(coords.lat), Some(coords.lng)),
        None => (finite(raw.lat.as_ref()), finite(raw.lng.as_ref())),
    };

    CanonicalShipment {
        tracking_number,
        from: text_or_placeholder(raw.from.as_ref()),
        to: text_or_placeholder(raw.to.as_ref()),
        weight: text_or_placeholder(raw.weight.as_ref()),
        service: text_or_placeholder(raw.service.as_ref()),
        estimated_delivery: text_or_placeholder(raw.estimated_delivery.as_ref()),
        active_step,
        events,
        coords,
        from_coords,
        to_coords,
        lat,
        lng,
        location_address: raw
            .location_address
            .as_ref()
            .and_then(RawScalar::to_trimmed)
            .unwrap_or_default(),
        last_update,
        status,
        status_source,
    }
}

/// Normalize an arbitrary JSON value
///
/// Anything that is not a JSON object is replaced by an empty record.
pub fn normalize_value(value: &Value) -> CanonicalShipment {
    let raw = match value {
        Value::Object(_) => RawShipment::deserialize(value).unwrap_or_else(|e| {
            log::warn!("Invalid shipment entry ({}): {}", e, value);
            RawShipment::default()
        }),
        other => {
            log::warn!("Invalid shipment entry (not an object): {}", other);
            RawShipment::default()
        }
    };
    normalize(&raw)
}

/// Build the fixed-length timeline
fn normalize_events(raw: Option<&RawEvents>) -> Vec<ShipmentEvent> {
    let slots = raw.map(RawEvents::slots).unwrap_or_default();

    (0..MAX_EVENTS)
        .map(|index| {
            let event = slots.get(index).and_then(|slot| slot.event());

            let title = event
                .and_then(|e| e.title.as_ref())
                .and_then(RawScalar::to_trimmed)
                .unwrap_or_else(|| default_title(index));
            let time = event
                .and_then(|e| e.time.as_ref())
                .and_then(RawScalar::to_trimmed)
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let details = event
                .and_then(|e| e.details.as_ref())
                .and_then(RawScalar::to_trimmed)
                .unwrap_or_default();

            ShipmentEvent { title, time, details }
        })
        .collect()
}

fn default_title(index: usize) -> String {
    DEFAULT_TITLES
        .get(index)
        .map(|title| title.to_string())
        .unwrap_or_else(|| format!("Step {}", index + 1))
}

/// Time of the last event that has one, scanning from the end
fn last_update(events: &[ShipmentEvent]) -> String {
    events
        .iter()
        .rev()
        .find(|event| event.has_time())
        .map(|event| event.time.clone())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Truncate toward zero and clamp to the lifecycle; non-finite input is step 0
fn clamp_step(raw: Option<&RawScalar>) -> usize {
    let value = raw.map_or(f64::NAN, RawScalar::to_number);
    if !value.is_finite() {
        return 0;
    }
    value.trunc().clamp(0.0, MAX_ACTIVE_STEP as f64) as usize
}

/// Position from the record's own top-level `lat`/`lng`
fn discrete_coords(raw: &RawShipment) -> Option<Coordinates> {
    Coordinates::new(finite(raw.lat.as_ref())?, finite(raw.lng.as_ref())?)
}

fn finite(raw: Option<&RawScalar>) -> Option<f64> {
    raw.map(RawScalar::parse_float).filter(|value| value.is_finite())
}

fn text_or_placeholder(raw: Option<&RawScalar>) -> String {
    raw.and_then(RawScalar::to_trimmed)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
