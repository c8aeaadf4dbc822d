//! Report generation
//!
//! Renders display fields and dataset summaries as plain text for the terminal.

use shipment_tracker::{DisplayFields, ShipmentSummary, StepState};
use std::fmt::Write;

const RULE: &str = "═══════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────";

/// Render one shipment's tracking page
pub fn render_tracking(fields: &DisplayFields) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  Shipment {}", fields.tracking_number);
    let _ = writeln!(out, "{}\n", RULE);

    let _ = writeln!(out, "  Route:              {}", fields.from_to);
    let _ = writeln!(out, "  Weight:             {}", fields.weight);
    let _ = writeln!(out, "  Service:            {}", fields.service);
    let _ = writeln!(out, "  Estimated delivery: {}", fields.estimated_delivery);
    let _ = writeln!(out, "  Status:             {}", fields.status);
    let _ = writeln!(out, "  Last update:        {}", fields.last_update);

    let _ = writeln!(out, "\n{}", THIN_RULE);
    let _ = writeln!(out, "  Progress: {}%", fields.progress_percent);
    let _ = writeln!(out, "{}", THIN_RULE);
    for event in &fields.events {
        let _ = writeln!(out, "  {} {}  ({})", marker(event.state), event.title, event.time);
        if !event.details.is_empty() {
            let _ = writeln!(out, "      {}", event.details);
        }
    }

    let _ = writeln!(out, "\n{}", THIN_RULE);
    if fields.map.is_available() {
        let _ = writeln!(out, "  {}: {}", fields.map.label, fields.map.url);
    } else {
        let _ = writeln!(out, "  {}", fields.map.label);
    }

    out
}

/// Render the dataset listing
pub fn render_summaries(rows: &[ShipmentSummary]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<20} {:<28} {:<28} {:>4}  {}",
        "TRACKING", "FROM", "TO", "STEP", "ESTIMATED"
    );
    let _ = writeln!(out, "{}", THIN_RULE.repeat(2));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {:<28} {:<28} {:>4}  {}",
            row.tracking_number,
            truncate(&row.from, 28),
            truncate(&row.to, 28),
            row.active_step,
            row.estimated_delivery
        );
    }
    let _ = writeln!(out, "\n{} shipment(s)", rows.len());

    out
}

fn marker(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "✓",
        StepState::Current => "●",
        StepState::Pending => "○",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipment_tracker::{project, ShipmentStore};

    #[test]
    fn test_render_tracking() {
        let store = ShipmentStore::demo();
        let text = render_tracking(&project(store.search("EE123456789").unwrap()));

        assert!(text.contains("Shipment EE123456789"));
        assert!(text.contains("Route:              Miami, FL · Orlando, FL"));
        assert!(text.contains("Status:             Out for delivery"));
        assert!(text.contains("● Out for delivery"));
        assert!(text.contains("Local courier scanning"));
        assert!(text.contains("Click to view location: https://www.google.com/maps/dir/?api=1"));
    }

    #[test]
    fn test_render_without_map() {
        let text = render_tracking(&shipment_tracker::DisplayFields::cleared());
        assert!(text.contains("Map view will appear here after tracking"));
        assert!(!text.contains("https://"));
    }

    #[test]
    fn test_render_summaries() {
        let store = ShipmentStore::demo();
        let text = render_summaries(&store.summaries());

        assert!(text.contains("TRACKING"));
        assert!(text.contains("9A10123484"));
        assert!(text.contains("Dallas, Texas, United States"));
        assert!(text.contains("6 shipment(s)"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
