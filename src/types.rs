//! Core data types shared across the pipeline
//!
//! This module defines the small value types every other component leans on:
//!
//! # Key Types
//!
//! - **`LngLat`**: a validated WGS84 coordinate pair (finite only)
//! - **`DateStamp`**: a parsed timestamp or the `Unknown` sentinel
//! - **`MonthKey`**: a `{year, month}` bucket ordered chronologically,
//!   never by its display label
//! - **`Rate`**: a percentage that degrades to `N/A` instead of NaN
//!
//! # Example
//!
//! ```rust
//! use voidhub::types::{MonthKey, Rate};
//!
//! let apr = MonthKey::new(2024, 4).unwrap();
//! assert_eq!(apr.label_short_year(), "Apr 24");
//! assert_eq!(apr.label_long(), "April 2024");
//! assert!(apr < MonthKey::new(2025, 1).unwrap());
//!
//! assert_eq!(Rate::of(1.0, 2.0).to_string(), "50.0%");
//! assert_eq!(Rate::of(5.0, 0.0).to_string(), "N/A");
//! ```

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A longitude/latitude pair
///
/// Constructed only through [`LngLat::new`], which rejects non-finite
/// components, so a held value is always plottable. Records without a
/// plausible coordinate carry `Option<LngLat>::None` and are skipped by the
/// map projection while still counting in non-geo aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude in degrees
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LngLat {
    /// Create a coordinate pair, rejecting NaN and infinite components
    pub fn new(lng: f64, lat: f64) -> Option<Self> {
        if lng.is_finite() && lat.is_finite() {
            Some(Self { lng, lat })
        } else {
            None
        }
    }
}

/// A parsed timestamp, or the sentinel for one that would not parse
///
/// Unparsable dates are absorbed, never propagated as errors: an `Unknown`
/// stamp is excluded from month-bucketed aggregates but the record that
/// carries it stays in ungrouped totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateStamp {
    /// A successfully parsed timestamp
    Known(NaiveDateTime),
    /// The raw value was missing or unparsable
    Unknown,
}

impl DateStamp {
    /// Whether the stamp carries a parsed timestamp
    pub fn is_known(&self) -> bool {
        matches!(self, DateStamp::Known(_))
    }

    /// The month bucket this stamp falls in, if known
    pub fn month_key(&self) -> Option<MonthKey> {
        match self {
            DateStamp::Known(dt) => MonthKey::new(dt.year(), dt.month()),
            DateStamp::Unknown => None,
        }
    }

    /// The parsed timestamp, if known
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DateStamp::Known(dt) => Some(*dt),
            DateStamp::Unknown => None,
        }
    }

    /// Day-first date label, `"Unknown"` for the sentinel
    pub fn date_label(&self) -> String {
        match self {
            DateStamp::Known(dt) => dt.format("%d/%m/%Y").to_string(),
            DateStamp::Unknown => "Unknown".to_string(),
        }
    }

    /// Full timestamp label, `"Invalid Date"` for the sentinel
    ///
    /// Mirrors the submissions list, which renders a distinct sentinel for
    /// records whose timestamp field never parsed.
    pub fn datetime_label(&self) -> String {
        match self {
            DateStamp::Known(dt) => dt.format("%d/%m/%Y, %H:%M:%S").to_string(),
            DateStamp::Unknown => "Invalid Date".to_string(),
        }
    }
}

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month bucket
///
/// Ordered by `(year, month)` so time-series sort chronologically; the three
/// label forms exist because different dashboards render the same bucket as
/// `"Apr 24"`, `"Apr 2024"`, or `"April 2024"`. Labels are display-only and
/// must never be used as sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
}

impl MonthKey {
    /// Create a month key; `month` must be in 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month immediately after this one
    pub fn next(&self) -> MonthKey {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// `"Apr 24"` form, used by the fixed demand summary table
    pub fn label_short_year(&self) -> String {
        let yy = self.year.rem_euclid(100);
        format!("{} {:02}", MONTHS_SHORT[(self.month - 1) as usize], yy)
    }

    /// `"Apr 2024"` form, used by monthly trend charts
    pub fn label_short(&self) -> String {
        format!("{} {}", MONTHS_SHORT[(self.month - 1) as usize], self.year)
    }

    /// `"April 2024"` form, used by month facet dropdowns
    pub fn label_long(&self) -> String {
        format!("{} {}", MONTHS_LONG[(self.month - 1) as usize], self.year)
    }

    /// `"2024-04"` form, used as a stable key in stacked series
    pub fn label_iso(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label_short())
    }
}

/// A percentage with a defined zero-denominator sentinel
///
/// Division by zero yields [`Rate::NotApplicable`], which renders as `"N/A"`.
/// A computed rate never holds NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rate {
    /// A computed percentage (already scaled to 0-100)
    Value(f64),
    /// The denominator was zero
    NotApplicable,
}

impl Rate {
    /// Compute `numerator / denominator` as a percentage
    pub fn of(numerator: f64, denominator: f64) -> Rate {
        if denominator == 0.0 {
            Rate::NotApplicable
        } else {
            Rate::Value(numerator / denominator * 100.0)
        }
    }

    /// The percentage value, if applicable
    pub fn value(&self) -> Option<f64> {
        match self {
            Rate::Value(v) => Some(*v),
            Rate::NotApplicable => None,
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rate::Value(v) => write!(f, "{:.1}%", v),
            Rate::NotApplicable => write!(f, "N/A"),
        }
    }
}
