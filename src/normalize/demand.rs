//! Historic demand point normalization
//!
//! Demand rows were ingested offline from spreadsheets, so field names carry
//! their original column headings and vary by batch (`"Locality"` vs
//! `"locality"`). Coordinates were resolved from postcodes upstream; rows
//! that never resolved carry no location and are skipped by the map while
//! still counting in non-geo aggregates.

use super::coerce;
use super::date::parse_date_stamp;
use crate::store::RawRecord;
use crate::types::{DateStamp, LngLat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A historic demand point in stable, flat form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDemandPoint {
    /// Property address, empty when missing
    pub address: String,
    /// Postcode, empty when missing
    pub postcode: String,
    /// Let classification, `"Unknown"` when missing
    pub let_type: String,
    /// Responsible local authority, `"Unknown"` when missing
    pub local_authority: String,
    /// Void classification, `"Unknown"` when missing
    pub void_type: String,
    /// Area grouping, `"Unknown"` when missing
    pub locality: String,
    /// End of the previous tenancy
    pub tenancy_end: DateStamp,
    /// Resolved coordinates, when the upstream geocode succeeded
    pub location: Option<LngLat>,
}

/// Reads a coordinate column strictly: number or numeric string only
fn finite_num(value: Option<&Value>) -> Option<f64> {
    let f = match value {
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}

fn location_of(raw: &RawRecord) -> Option<LngLat> {
    let lat = finite_num(raw.get("Latitude"))?;
    let lng = finite_num(raw.get("Longitude"))?;
    LngLat::new(lng, lat)
}

/// Build a [`NormalizedDemandPoint`] from a raw record
///
/// Pure and idempotent; every field is defensively defaulted.
pub fn normalize_demand_point(raw: &RawRecord) -> NormalizedDemandPoint {
    // Older batches used a lowercase locality column
    let locality = raw.get("Locality").or_else(|| raw.get("locality"));
    NormalizedDemandPoint {
        address: coerce::string(raw.get("Address of property")),
        postcode: coerce::string(raw.get("Postcode")),
        let_type: coerce::string_or(raw.get("Let Type"), "Unknown"),
        local_authority: coerce::string_or(raw.get("Local Authority"), "Unknown"),
        void_type: coerce::string_or(raw.get("Major or Minor void?"), "Unknown"),
        locality: coerce::string_or(locality, "Unknown"),
        tenancy_end: parse_date_stamp(raw.get("Tenancy end date")),
        location: location_of(raw),
    }
}
