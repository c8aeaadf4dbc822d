//! Look up a shipment in the bundled demo dataset and print its display fields
//!
//! Usage:
//!   cargo run --example track_demo -- <tracking number or fragment>
//!
//! Example:
//!   cargo run --example track_demo -- "9a 101 234 84"

use shipment_tracker::{not_found_message, project, ShipmentStore};
use std::env;

fn main() {
    env_logger::init();

    let query = env::args().nth(1).unwrap_or_else(|| "9A10123484".to_string());
    let store = ShipmentStore::demo();

    match store.search(&query) {
        Some(shipment) => {
            let fields = project(shipment);
            println!("Tracking number: {}", fields.tracking_number);
            println!("Route:           {}", fields.from_to);
            println!("Status:          {} (last update: {})", fields.status, fields.last_update);
            println!("Map:             {} {}", fields.map.label, fields.map.url);
            for event in &fields.events {
                println!("  [{:?}] {} — {}", event.state, event.title, event.time);
            }
        }
        None => println!("{}", not_found_message(&query)),
    }
}
