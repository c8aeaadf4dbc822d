// End-to-end lookup against the bundled dataset: load → search → project
use serde_json::json;
use shipment_tracker::{
    map_url, normalize, normalize_value, project, MapLinkKind, RawScalar, RawShipment,
    ShipmentStore, StepState, MAX_EVENTS, PLACEHOLDER,
};

#[test]
fn demo_store_keeps_dataset_order() {
    let store = ShipmentStore::demo();
    let numbers: Vec<_> = store.iter().map(|s| s.tracking_number.as_str()).collect();
    assert_eq!(
        numbers,
        vec![
            "74512317391",
            "9A10123484",
            "940011020088123456",
            "EE123456789",
            "RX987654321",
            "ABCD1234567890",
        ]
    );
}

#[test]
fn search_exact_spaced_and_partial() {
    let store = ShipmentStore::demo();

    assert_eq!(store.search("9A10123484").unwrap().tracking_number, "9A10123484");
    assert_eq!(store.search("9a 101 234 84").unwrap().tracking_number, "9A10123484");
    assert_eq!(store.search("123484").unwrap().tracking_number, "9A10123484");
    assert!(store.search("").is_none());
    assert!(store.search("NOPE-000").is_none());
}

#[test]
fn project_first_demo_shipment() {
    let store = ShipmentStore::demo();
    let shipment = store.search("74512317391").unwrap();
    let fields = project(shipment);

    assert_eq!(fields.from_to, "Dallas, Texas, United States · Wisconsin, United States");
    assert_eq!(fields.status, "In transit");
    assert_eq!(fields.last_update, "Awaiting confirmation");
    assert_eq!(fields.map.kind, MapLinkKind::Directions);
    assert!(fields.map.url.contains("/maps/dir/?api=1&origin="));
    assert!(fields.map.url.contains("&destination="));
    assert_eq!(fields.events[0].title, "Shipment information sent to FedEx");
    assert_eq!(fields.events[2].state, StepState::Current);
}

#[test]
fn delivered_shipment_is_fully_progressed() {
    let store = ShipmentStore::demo();
    let fields = project(store.search("RX987654321").unwrap());

    assert_eq!(fields.status, "Delivered");
    assert_eq!(fields.progress_percent, 100);
    assert_eq!(fields.last_update, "Oct 4, 2025 — 12:14");
    assert!(fields.events[..4].iter().all(|e| e.state == StepState::Completed));
}

#[test]
fn update_clamps_step_and_rederives_status() {
    let mut store = ShipmentStore::demo();
    let patch = RawShipment {
        active_step: Some(RawScalar::from(99_i64)),
        ..RawShipment::default()
    };

    let updated = store.update("9A10123484", patch).unwrap();
    assert_eq!(updated.active_step, 4);
    assert_eq!(updated.status, "Delivered");
    assert_eq!(updated.service, "FedEx 2Day");
    assert_eq!(store.len(), 6);
}

#[test]
fn add_then_remove_round_trip() {
    let mut store = ShipmentStore::demo();
    store.add(RawShipment::new("LOCAL-1").with_location_address("Austin, TX"));

    let added = store.find("local-1").unwrap();
    assert_eq!(map_url(added), "https://www.google.com/maps?q=Austin%2C%20TX");

    assert!(store.remove("LOCAL-1"));
    assert!(store.find("LOCAL-1").is_none());
    assert_eq!(store.len(), 6);
}

#[test]
fn every_demo_record_is_stable_under_renormalization() {
    let store = ShipmentStore::demo();
    for shipment in store.iter() {
        assert_eq!(&normalize(&RawShipment::from(shipment)), shipment);
    }
}

#[test]
fn hostile_input_still_yields_canonical_records() {
    let records = vec![
        json!(null),
        json!({"events": [1, 2, 3, 4, 5, 6, 7, 8], "activeStep": -12}),
        json!({"trackingNumber": "  ", "coords": "here", "toCoords": [null, null]}),
    ];
    for value in &records {
        let shipment = normalize_value(value);
        assert_eq!(shipment.events.len(), MAX_EVENTS);
        assert!(shipment.active_step <= 4);
        assert_eq!(shipment.tracking_number, "");
        assert_eq!(shipment.last_update, PLACEHOLDER);
        assert_eq!(map_url(&shipment), "");
    }
}
