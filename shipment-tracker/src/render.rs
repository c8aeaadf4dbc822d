//! Render projection
//!
//! Maps a canonical shipment onto the exact set of strings a tracking page
//! shows. There is no business logic here beyond field selection, map link
//! derivation and best-effort date formatting of event times.

use crate::config::RenderConfig;
use crate::dates::format_date_flexible;
use crate::map_link::{MapLink, MapLinkKind, NO_LOCATION_MESSAGE};
use crate::types::{CanonicalShipment, MAX_ACTIVE_STEP, PLACEHOLDER};
use serde::Serialize;

/// Progress state of one timeline step relative to the active step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Current,
    Pending,
}

/// One timeline entry as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEvent {
    pub title: String,
    pub time: String,
    pub details: String,
    pub state: StepState,
}

/// Everything a page shows for one shipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFields {
    pub tracking_number: String,
    /// `"{from} · {to}"`
    pub from_to: String,
    pub weight: String,
    pub service: String,
    pub estimated_delivery: String,
    pub status: String,
    pub last_update: String,
    pub map: MapLink,
    pub events: Vec<DisplayEvent>,
    pub active_step: usize,
    /// Height of the progress line, `0..=100`
    pub progress_percent: u8,
}

impl DisplayFields {
    /// The empty state shown before a search or after a miss
    pub fn cleared() -> Self {
        Self {
            tracking_number: PLACEHOLDER.to_string(),
            from_to: String::new(),
            weight: String::new(),
            service: String::new(),
            estimated_delivery: PLACEHOLDER.to_string(),
            status: PLACEHOLDER.to_string(),
            last_update: PLACEHOLDER.to_string(),
            map: MapLink {
                kind: MapLinkKind::None,
                url: String::new(),
                label: NO_LOCATION_MESSAGE.to_string(),
            },
            events: Vec::new(),
            active_step: 0,
            progress_percent: 0,
        }
    }
}

/// Project a shipment with the default render configuration
pub fn project(shipment: &CanonicalShipment) -> DisplayFields {
    project_with(shipment, &RenderConfig::default())
}

/// Project a shipment into display fields
pub fn project_with(shipment: &CanonicalShipment, config: &RenderConfig) -> DisplayFields {
    let active_step = shipment.active_step.min(MAX_ACTIVE_STEP);

    let events = shipment
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| DisplayEvent {
            title: event.title.clone(),
            time: format_date_flexible(&event.time, config),
            details: event.details.clone(),
            state: step_state(index, active_step),
        })
        .collect();

    DisplayFields {
        tracking_number: or_placeholder(&shipment.tracking_number),
        from_to: format!(
            "{} · {}",
            or_placeholder(&shipment.from),
            or_placeholder(&shipment.to)
        ),
        weight: or_placeholder(&shipment.weight),
        service: or_placeholder(&shipment.service),
        estimated_delivery: or_placeholder(&shipment.estimated_delivery),
        status: or_placeholder(&shipment.status),
        last_update: or_placeholder(&shipment.last_update),
        map: MapLink::for_shipment(shipment),
        events,
        active_step,
        progress_percent: (active_step * 100 / MAX_ACTIVE_STEP) as u8,
    }
}

/// Message shown when a query matches nothing
pub fn not_found_message(query: &str) -> String {
    format!(
        "No shipment found for tracking number {}. Please check and try again.",
        query.trim()
    )
}

fn step_state(index: usize, active_step: usize) -> StepState {
    if index < active_step {
        StepState::Completed
    } else if index == active_step {
        StepState::Current
    } else {
        StepState::Pending
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}
