//! Canonical date parsing
//!
//! One parser for every date field in the pipeline, so "month bucket" means
//! the same thing in the table, the chart, and the map. Unparsable input
//! becomes [`DateStamp::Unknown`] rather than an error.

use crate::types::DateStamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Date-only and day-first formats seen across historical ingestion batches
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y"];

/// Datetime formats without an offset
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parse a raw date field into a [`DateStamp`]
///
/// Accepts RFC 3339, offset-less ISO datetimes, and the date-only / UK
/// day-first forms found in older batches. Anything else, including missing
/// fields and non-strings, is `Unknown`.
pub fn parse_date_stamp(value: Option<&Value>) -> DateStamp {
    let raw = match value {
        Some(Value::String(s)) => s.trim(),
        _ => return DateStamp::Unknown,
    };
    if raw.is_empty() {
        return DateStamp::Unknown;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return DateStamp::Known(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return DateStamp::Known(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            // Midnight keeps date-only input in the right month bucket
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return DateStamp::Known(dt);
            }
        }
    }

    DateStamp::Unknown
}
