//! Tracking-number lookup
//!
//! Keys are compared after removing all whitespace and lowercasing, so
//! `"9a 101 234 84"` and `"9A10123484"` are the same key.

use crate::types::CanonicalShipment;

/// Normalize a tracking number or query into a comparison key
pub fn tracking_key(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find a shipment by query
///
/// Exact key match first, then the first tracking number whose key contains
/// the query key. Both passes keep collection order. A blank query matches
/// nothing.
pub fn find<'a>(shipments: &'a [CanonicalShipment], query: &str) -> Option<&'a CanonicalShipment> {
    let key = tracking_key(query);
    log::trace!("Lookup key for {:?}: {:?}", query, key);
    if key.is_empty() {
        return None;
    }

    if let Some(index) = position_exact(shipments, &key) {
        log::debug!("Exact match for {:?}: {}", query, shipments[index].tracking_number);
        return Some(&shipments[index]);
    }

    let found = shipments
        .iter()
        .find(|shipment| tracking_key(&shipment.tracking_number).contains(&key));
    match found {
        Some(shipment) => log::debug!("Partial match for {:?}: {}", query, shipment.tracking_number),
        None => log::debug!("No shipment matches {:?}", query),
    }
    found
}

/// Index of the first shipment whose key equals `key` exactly
pub(crate) fn position_exact(shipments: &[CanonicalShipment], key: &str) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    shipments
        .iter()
        .position(|shipment| tracking_key(&shipment.tracking_number) == key)
}
