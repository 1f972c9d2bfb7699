//! Historic demand filters

use super::Facet;
use crate::normalize::NormalizedDemandPoint;
use crate::types::MonthKey;
use serde::{Deserialize, Serialize};

/// Facets for the historic demand map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandFilter {
    /// Let type, exact match
    pub let_type: Facet<String>,
    /// Void type, exact match
    pub void_type: Facet<String>,
    /// Locality, exact match
    pub locality: Facet<String>,
    /// Tenancy-end month bucket
    pub month: Facet<MonthKey>,
}

impl DemandFilter {
    /// Whether a point passes every active facet
    ///
    /// A `Relet` let-type selection never matches rows whose void type is
    /// `"n/a"` (case-insensitive), mirroring the upstream ingestion filter
    /// for that cut of the data.
    pub fn admits(&self, point: &NormalizedDemandPoint) -> bool {
        if self.let_type.selected().map(String::as_str) == Some("Relet")
            && point.void_type.eq_ignore_ascii_case("n/a")
        {
            return false;
        }
        let month_ok = match &self.month {
            Facet::All => true,
            Facet::Only(m) => point.tenancy_end.month_key() == Some(*m),
        };
        month_ok
            && self.let_type.admits(&point.let_type)
            && self.void_type.admits(&point.void_type)
            && self.locality.admits(&point.locality)
    }
}

/// Apply demand facets over the full cache
///
/// Always consumes the complete cache slice; never feed a prior filtered
/// result back in.
pub fn filter_demand<'a>(
    cache: &'a [NormalizedDemandPoint],
    filter: &DemandFilter,
) -> Vec<&'a NormalizedDemandPoint> {
    cache.iter().filter(|p| filter.admits(p)).collect()
}
