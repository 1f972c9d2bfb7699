//! Record normalization
//!
//! Raw records arrive nested, inconsistently shaped, and partially typed.
//! This module flattens and coerces them into stable entities once, so every
//! downstream view works from the same flat shape:
//!
//! ```text
//! RawRecord ──► normalize_survey ──────► NormalizedSurvey { line_items, totals, .. }
//! RawRecord ──► normalize_demand_point ► NormalizedDemandPoint { tenancy_end, location, .. }
//! ```
//!
//! Normalization is pure and idempotent: an identical raw record always
//! yields an identical entity. Malformed fields are absorbed via defaults,
//! never surfaced as errors.

pub mod coerce;
mod date;
mod demand;
mod survey;

pub use date::parse_date_stamp;
pub use demand::{normalize_demand_point, NormalizedDemandPoint};
pub use survey::{
    flatten_line_items, normalize_survey, LineItem, NormalizedSurvey, SurveyTotals,
    CONTRACTOR_CATEGORY,
};
