//! Render configuration types
//!
//! This module defines the small set of presentation settings the library needs.
//! Hosts deserialize it from their own config files; every field has a default.

use serde::{Deserialize, Serialize};

/// Configuration for the render projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// chrono format for event times that parse as a date and time
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,

    /// chrono format for event times that parse as a date only
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Queries shorter than this (after trimming) are not submitted
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

fn default_datetime_format() -> String {
    "%b %-d, %Y %H:%M".to_string()
}

fn default_date_format() -> String {
    "%b %-d, %Y".to_string()
}

fn default_min_query_len() -> usize {
    3
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            datetime_format: default_datetime_format(),
            date_format: default_date_format(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl RenderConfig {
    /// Create a new render configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the date-time output format
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    /// Builder method: set the date-only output format
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Builder method: set the minimum query length
    pub fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Check if a query is long enough to submit
    pub fn accepts_query(&self, query: &str) -> bool {
        let trimmed = query.trim();
        !trimmed.is_empty() && trimmed.chars().count() >= self.min_query_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::new()
            .with_datetime_format("%Y-%m-%d %H:%M")
            .with_date_format("%Y-%m-%d")
            .with_min_query_len(5);

        assert_eq!(config.datetime_format, "%Y-%m-%d %H:%M");
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.min_query_len, 5);
    }

    #[test]
    fn test_query_gate() {
        let config = RenderConfig::new();
        assert!(config.accepts_query(" 9A1 "));
        assert!(!config.accepts_query("9A"));
        assert!(!config.accepts_query("   "));

        let open = RenderConfig::new().with_min_query_len(0);
        assert!(open.accepts_query("x"));
        assert!(!open.accepts_query(""));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"date_format": "%d/%m/%Y"}"#).unwrap();
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.datetime_format, default_datetime_format());
        assert_eq!(config.min_query_len, 3);
    }
}
