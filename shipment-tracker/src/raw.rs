//! Untrusted shipment input
//!
//! Raw records arrive as loosely-shaped JSON. Every field is optional and every
//! field type has a catch-all variant, so deserializing an object into a
//! [`RawShipment`] never fails on field shape. Coercion into canonical values
//! happens through the explicit methods on [`RawScalar`] and [`RawCoords`].

use crate::types::{CanonicalShipment, Coordinates, StatusSource};
use serde::Deserialize;
use serde_json::{Number, Value};

/// Any JSON scalar, kept as written
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(Number),
    Flag(bool),
    /// Arrays, objects and null
    Other(Value),
}

impl RawScalar {
    /// String form of the value
    ///
    /// Integral numbers print without a fractional part; arrays and objects fall
    /// back to their JSON text; null is empty.
    pub fn to_text(&self) -> String {
        match self {
            RawScalar::Text(text) => text.clone(),
            RawScalar::Number(number) => number_to_text(number),
            RawScalar::Flag(flag) => flag.to_string(),
            RawScalar::Other(Value::Null) => String::new(),
            RawScalar::Other(value) => value.to_string(),
        }
    }

    /// Trimmed string form, `None` if blank
    pub fn to_trimmed(&self) -> Option<String> {
        let text = self.to_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Whole-value numeric conversion
    ///
    /// Blank text converts to `0`; text that is not entirely a number is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            RawScalar::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            RawScalar::Number(number) => number.as_f64().unwrap_or(f64::NAN),
            RawScalar::Flag(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            RawScalar::Other(Value::Null) => 0.0,
            RawScalar::Other(_) => f64::NAN,
        }
    }

    /// Leading-prefix float parse (`"32.7abc"` is `32.7`, `"abc"` is `NaN`)
    pub fn parse_float(&self) -> f64 {
        match self {
            RawScalar::Text(text) => parse_float_prefix(text),
            RawScalar::Number(number) => number.as_f64().unwrap_or(f64::NAN),
            RawScalar::Flag(_) | RawScalar::Other(_) => f64::NAN,
        }
    }
}

impl From<&str> for RawScalar {
    fn from(text: &str) -> Self {
        RawScalar::Text(text.to_string())
    }
}

impl From<String> for RawScalar {
    fn from(text: String) -> Self {
        RawScalar::Text(text)
    }
}

impl From<i64> for RawScalar {
    fn from(value: i64) -> Self {
        RawScalar::Number(Number::from(value))
    }
}

impl From<f64> for RawScalar {
    fn from(value: f64) -> Self {
        // JSON has no NaN/Infinity; keep them as text so coercion still sees them
        match Number::from_f64(value) {
            Some(number) => RawScalar::Number(number),
            None => RawScalar::Text(value.to_string()),
        }
    }
}

impl From<bool> for RawScalar {
    fn from(value: bool) -> Self {
        RawScalar::Flag(value)
    }
}

fn number_to_text(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        value.to_string()
    } else if let Some(value) = number.as_u64() {
        value.to_string()
    } else {
        number
            .as_f64()
            .map(|value| value.to_string())
            .unwrap_or_else(|| number.to_string())
    }
}

/// Parse the longest numeric prefix of `text` after leading whitespace
fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if end < len && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < len && bytes[end].is_ascii_digit() {
            end += 1;
        }
        mantissa_digits += end - frac_start;
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    // An exponent only counts when it has digits
    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Coordinate input in any of its accepted shapes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCoords {
    /// `[lat, lng, ...]`; extra elements are ignored
    Pair(Vec<RawScalar>),
    /// `{ "lat": .., "lng": .. }`
    Named(NamedCoords),
    Other(Value),
}

/// Record form of a coordinate
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NamedCoords {
    #[serde(default, alias = "latitude")]
    pub lat: Option<RawScalar>,
    #[serde(default, alias = "longitude")]
    pub lng: Option<RawScalar>,
}

impl RawCoords {
    /// Accept the pair only if both components parse to finite numbers
    pub fn parse(&self) -> Option<Coordinates> {
        match self {
            RawCoords::Pair(items) if items.len() >= 2 => {
                Coordinates::new(items[0].parse_float(), items[1].parse_float())
            }
            RawCoords::Named(named) => Coordinates::new(
                named.lat.as_ref().map_or(f64::NAN, RawScalar::parse_float),
                named.lng.as_ref().map_or(f64::NAN, RawScalar::parse_float),
            ),
            _ => None,
        }
    }
}

impl From<Coordinates> for RawCoords {
    fn from(coords: Coordinates) -> Self {
        RawCoords::Pair(vec![coords.lat.into(), coords.lng.into()])
    }
}

/// A single raw timeline entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    pub title: Option<RawScalar>,
    pub time: Option<RawScalar>,
    pub details: Option<RawScalar>,
}

impl RawEvent {
    /// Create an event from its three text fields
    pub fn new(title: impl Into<String>, time: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: Some(RawScalar::Text(title.into())),
            time: Some(RawScalar::Text(time.into())),
            details: Some(RawScalar::Text(details.into())),
        }
    }
}

/// One slot of a raw timeline; non-record entries count as empty events
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEventSlot {
    Event(RawEvent),
    Other(Value),
}

impl RawEventSlot {
    pub fn event(&self) -> Option<&RawEvent> {
        match self {
            RawEventSlot::Event(event) => Some(event),
            RawEventSlot::Other(_) => None,
        }
    }
}

/// The raw timeline; anything other than a sequence counts as no events
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEvents {
    List(Vec<RawEventSlot>),
    Other(Value),
}

impl RawEvents {
    pub fn slots(&self) -> &[RawEventSlot] {
        match self {
            RawEvents::List(slots) => slots,
            RawEvents::Other(_) => &[],
        }
    }
}

impl From<Vec<RawEvent>> for RawEvents {
    fn from(events: Vec<RawEvent>) -> Self {
        RawEvents::List(events.into_iter().map(RawEventSlot::Event).collect())
    }
}

/// An untrusted shipment record
///
/// Unknown keys in the source JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShipment {
    pub tracking_number: Option<RawScalar>,
    pub from: Option<RawScalar>,
    pub to: Option<RawScalar>,
    pub from_coords: Option<RawCoords>,
    pub to_coords: Option<RawCoords>,
    pub coords: Option<RawCoords>,
    pub weight: Option<RawScalar>,
    pub service: Option<RawScalar>,
    pub estimated_delivery: Option<RawScalar>,
    pub active_step: Option<RawScalar>,
    pub events: Option<RawEvents>,
    pub location_address: Option<RawScalar>,
    pub lat: Option<RawScalar>,
    pub lng: Option<RawScalar>,
    pub status: Option<RawScalar>,
}

impl RawShipment {
    /// Create an otherwise empty record with a tracking number
    pub fn new(tracking_number: impl Into<String>) -> Self {
        Self {
            tracking_number: Some(RawScalar::Text(tracking_number.into())),
            ..Self::default()
        }
    }

    /// Builder method: set origin and destination names
    pub fn with_route(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = Some(RawScalar::Text(from.into()));
        self.to = Some(RawScalar::Text(to.into()));
        self
    }

    /// Builder method: set origin and destination coordinates
    pub fn with_route_coords(mut self, from: [f64; 2], to: [f64; 2]) -> Self {
        self.from_coords = Some(raw_pair(from));
        self.to_coords = Some(raw_pair(to));
        self
    }

    /// Builder method: set the current position
    pub fn with_coords(mut self, coords: [f64; 2]) -> Self {
        self.coords = Some(raw_pair(coords));
        self
    }

    /// Builder method: set the human-readable location
    pub fn with_location_address(mut self, address: impl Into<String>) -> Self {
        self.location_address = Some(RawScalar::Text(address.into()));
        self
    }

    /// Builder method: set the active lifecycle step
    pub fn with_active_step(mut self, step: impl Into<RawScalar>) -> Self {
        self.active_step = Some(step.into());
        self
    }

    /// Builder method: set an explicit status text
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(RawScalar::Text(status.into()));
        self
    }

    /// Builder method: set weight and service
    pub fn with_package(mut self, weight: impl Into<String>, service: impl Into<String>) -> Self {
        self.weight = Some(RawScalar::Text(weight.into()));
        self.service = Some(RawScalar::Text(service.into()));
        self
    }

    /// Builder method: set the estimated delivery text
    pub fn with_estimated_delivery(mut self, estimate: impl Into<String>) -> Self {
        self.estimated_delivery = Some(RawScalar::Text(estimate.into()));
        self
    }

    /// Builder method: set the timeline
    pub fn with_events(mut self, events: Vec<RawEvent>) -> Self {
        self.events = Some(events.into());
        self
    }

    /// Shallow merge: every field present in `patch` replaces the field in `self`
    pub fn merge(self, patch: RawShipment) -> RawShipment {
        RawShipment {
            tracking_number: patch.tracking_number.or(self.tracking_number),
            from: patch.from.or(self.from),
            to: patch.to.or(self.to),
            from_coords: patch.from_coords.or(self.from_coords),
            to_coords: patch.to_coords.or(self.to_coords),
            coords: patch.coords.or(self.coords),
            weight: patch.weight.or(self.weight),
            service: patch.service.or(self.service),
            estimated_delivery: patch.estimated_delivery.or(self.estimated_delivery),
            active_step: patch.active_step.or(self.active_step),
            events: patch.events.or(self.events),
            location_address: patch.location_address.or(self.location_address),
            lat: patch.lat.or(self.lat),
            lng: patch.lng.or(self.lng),
            status: patch.status.or(self.status),
        }
    }
}

fn raw_pair(pair: [f64; 2]) -> RawCoords {
    RawCoords::Pair(vec![pair[0].into(), pair[1].into()])
}

/// Turn a canonical record back into raw input
///
/// A derived status is dropped so that re-normalizing derives it again from the
/// (possibly changed) active step.
impl From<&CanonicalShipment> for RawShipment {
    fn from(shipment: &CanonicalShipment) -> Self {
        fn text(value: &str) -> Option<RawScalar> {
            Some(RawScalar::Text(value.to_string()))
        }

        RawShipment {
            tracking_number: text(&shipment.tracking_number),
            from: text(&shipment.from),
            to: text(&shipment.to),
            from_coords: shipment.from_coords.map(RawCoords::from),
            to_coords: shipment.to_coords.map(RawCoords::from),
            coords: shipment.coords.map(RawCoords::from),
            weight: text(&shipment.weight),
            service: text(&shipment.service),
            estimated_delivery: text(&shipment.estimated_delivery),
            active_step: Some(RawScalar::from(shipment.active_step as i64)),
            events: Some(RawEvents::from(
                shipment
                    .events
                    .iter()
                    .map(|event| RawEvent::new(&event.title, &event.time, &event.details))
                    .collect::<Vec<_>>(),
            )),
            location_address: text(&shipment.location_address),
            lat: shipment.lat.map(RawScalar::from),
            lng: shipment.lng.map(RawScalar::from),
            status: match shipment.status_source {
                StatusSource::Explicit => text(&shipment.status),
                StatusSource::Derived => None,
            },
        }
    }
}
