//! Best-effort date formatting
//!
//! Event times are free text. If one parses as a known date or date-time layout
//! it is reformatted with the configured chrono format; otherwise it is shown
//! as written. Offsets are kept as written and nothing is converted to the
//! local timezone, so output does not depend on the machine running it.

use crate::config::RenderConfig;
use crate::types::PLACEHOLDER;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::{Display, Write};

const DATETIME_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_LAYOUTS: [&str; 3] = ["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"];

/// Format a date-like string, falling back to the trimmed original
///
/// Blank input yields the placeholder.
pub fn format_date_flexible(text: &str, config: &RenderConfig) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let formatted = match parse_date(trimmed) {
        Some(ParsedDate::DateTime(datetime)) => render(datetime.format(&config.datetime_format)),
        Some(ParsedDate::Date(date)) => render(date.format(&config.date_format)),
        None => None,
    };
    formatted.unwrap_or_else(|| trimmed.to_string())
}

/// chrono reports a bad format string only when the value is written out
fn render(formatted: impl Display) -> Option<String> {
    let mut out = String::new();
    match write!(out, "{}", formatted) {
        Ok(()) => Some(out),
        Err(_) => {
            log::warn!("Invalid date format in render config");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ParsedDate {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

fn parse_date(text: &str) -> Option<ParsedDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(ParsedDate::DateTime(datetime.naive_local()));
    }

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .map(ParsedDate::DateTime)
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .map(ParsedDate::Date)
        })
}
