//! Shipment datasets
//!
//! A dataset is a JSON array of raw shipment records. Only the outer shape is
//! checked here; each element is the normalizer's concern.

use crate::store::ShipmentStore;
use crate::types::{Result, TrackerError};
use serde_json::Value;
use std::path::Path;

/// Demo dataset bundled with the library
pub const DEFAULT_DATASET: &str = include_str!("../data/shipments.json");

/// Parse a dataset document into its raw elements
pub fn parse_dataset(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(records) => Ok(records),
        other => Err(TrackerError::DatasetShape(format!(
            "expected a JSON array of shipments, found {}",
            json_kind(&other)
        ))),
    }
}

/// Read and parse a dataset file
pub fn load_dataset(path: &Path) -> Result<Vec<Value>> {
    log::info!("Loading dataset: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    parse_dataset(&content)
}

impl ShipmentStore {
    /// Store loaded with the bundled demo dataset
    pub fn demo() -> Self {
        match parse_dataset(DEFAULT_DATASET) {
            Ok(records) => Self::from_values(&records),
            Err(e) => {
                log::error!("Bundled dataset is invalid: {}", e);
                Self::new()
            }
        }
    }

    /// Store loaded from a dataset file
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::from_values(&load_dataset(path)?))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_dataset_parses() {
        let records = parse_dataset(DEFAULT_DATASET).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(ShipmentStore::demo().len(), 6);
    }

    #[test]
    fn test_dataset_must_be_array() {
        let err = parse_dataset(r#"{"trackingNumber": "X"}"#).unwrap_err();
        assert!(matches!(err, TrackerError::DatasetShape(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_dataset("[{").unwrap_err();
        assert!(matches!(err, TrackerError::DatasetParse(_)));
    }

    #[test]
    fn test_elements_are_not_validated_here() {
        let records = parse_dataset(r#"[1, "two", {"trackingNumber": "T3"}]"#).unwrap();
        let store = ShipmentStore::from_values(&records);
        assert_eq!(store.len(), 3);
        assert!(store.find("T3").is_some());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"trackingNumber": "FILE1", "activeStep": 2}}]"#).unwrap();

        let store = ShipmentStore::from_file(file.path()).unwrap();
        assert_eq!(store.find("file1").unwrap().status, "In transit");
    }

    #[test]
    fn test_missing_file() {
        let result = ShipmentStore::from_file(Path::new("/nonexistent/shipments.json"));
        assert!(matches!(result, Err(TrackerError::Io(_))));
    }
}
