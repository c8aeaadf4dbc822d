//! In-memory shipment store
//!
//! Holds canonical shipments in insertion order. Records are never edited in
//! place: `update` re-normalizes a merged record and swaps it in whole, so
//! derived fields are always recomputed.

use crate::lookup::{self, tracking_key};
use crate::normalizer::{normalize, normalize_value};
use crate::raw::RawShipment;
use crate::types::{CanonicalShipment, Coordinates};
use serde::Serialize;
use serde_json::Value;

/// Ordered collection of canonical shipments
#[derive(Debug, Clone, Default)]
pub struct ShipmentStore {
    shipments: Vec<CanonicalShipment>,
}

impl ShipmentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            shipments: Vec::new(),
        }
    }

    /// Normalize and load raw records
    pub fn from_raw<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawShipment>,
    {
        let shipments: Vec<_> = records.into_iter().map(|raw| normalize(&raw)).collect();
        log::info!("Prepared {} shipment(s)", shipments.len());
        Self { shipments }
    }

    /// Normalize and load loosely-shaped JSON records
    pub fn from_values(values: &[Value]) -> Self {
        let shipments: Vec<_> = values.iter().map(normalize_value).collect();
        log::info!("Prepared {} shipment(s)", shipments.len());
        Self { shipments }
    }

    /// Normalize a record and append it
    pub fn add(&mut self, raw: RawShipment) -> &CanonicalShipment {
        let shipment = normalize(&raw);
        log::debug!("Adding shipment {:?}", shipment.tracking_number);
        self.shipments.push(shipment);
        &self.shipments[self.shipments.len() - 1]
    }

    /// Find a shipment by exact (normalized) tracking number
    pub fn find(&self, tracking_number: &str) -> Option<&CanonicalShipment> {
        self.position(tracking_number).map(|index| &self.shipments[index])
    }

    /// Find a shipment by query: exact match, then substring
    pub fn search(&self, query: &str) -> Option<&CanonicalShipment> {
        lookup::find(&self.shipments, query)
    }

    /// Merge `patch` over an existing shipment, re-normalize, and replace it
    ///
    /// Returns `None` and leaves the store unchanged if no shipment has that
    /// tracking number.
    pub fn update(&mut self, tracking_number: &str, patch: RawShipment) -> Option<&CanonicalShipment> {
        let index = self.position(tracking_number)?;
        let merged = RawShipment::from(&self.shipments[index]).merge(patch);
        self.shipments[index] = normalize(&merged);
        log::debug!("Updated shipment {:?}", self.shipments[index].tracking_number);
        Some(&self.shipments[index])
    }

    /// Remove a shipment by exact (normalized) tracking number
    pub fn remove(&mut self, tracking_number: &str) -> bool {
        match self.position(tracking_number) {
            Some(index) => {
                let removed = self.shipments.remove(index);
                log::debug!("Removed shipment {:?}", removed.tracking_number);
                true
            }
            None => false,
        }
    }

    /// One summary row per shipment, in store order
    pub fn summaries(&self) -> Vec<ShipmentSummary> {
        self.shipments.iter().map(ShipmentSummary::from).collect()
    }

    /// All shipments in store order
    pub fn shipments(&self) -> &[CanonicalShipment] {
        &self.shipments
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalShipment> {
        self.shipments.iter()
    }

    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }

    fn position(&self, tracking_number: &str) -> Option<usize> {
        lookup::position_exact(&self.shipments, &tracking_key(tracking_number))
    }
}

/// Compact listing row for a shipment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    pub tracking_number: String,
    pub from: String,
    pub to: String,
    pub active_step: usize,
    pub estimated_delivery: String,
    pub from_coords: Option<Coordinates>,
    pub to_coords: Option<Coordinates>,
    pub location_address: String,
}

impl From<&CanonicalShipment> for ShipmentSummary {
    fn from(shipment: &CanonicalShipment) -> Self {
        Self {
            tracking_number: shipment.tracking_number.clone(),
            from: shipment.from.clone(),
            to: shipment.to.clone(),
            active_step: shipment.active_step,
            estimated_delivery: shipment.estimated_delivery.clone(),
            from_coords: shipment.from_coords,
            to_coords: shipment.to_coords,
            location_address: shipment.location_address.clone(),
        }
    }
}
