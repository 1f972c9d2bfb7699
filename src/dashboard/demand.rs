//! Historic demand dashboard
//!
//! Two distinct cuts of the demand cache coexist here and must not be
//! conflated: map features and their breakdowns only include coordinate-
//! bearing points, while the fixed-window summary table counts every cached
//! point (Relet, non-"n/a") whether or not it could be mapped.

use crate::aggregate::{group_count, stacked_window_series, MonthWindow, StackedRow};
use crate::filter::{filter_demand, DemandFilter};
use crate::map::{locality_color, FeatureCollection, MapFeature};
use crate::normalize::NormalizedDemandPoint;
use crate::types::MonthKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Localities with a fixed summary-table row, in display order
pub const SUMMARY_LOCALITIES: [&str; 4] = ["WOE", "Glouc", "S&M", "Central"];

/// Per-facet counts over a set of demand points
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemandBreakdown {
    /// Counts per let type
    pub let_types: IndexMap<String, u64>,
    /// Counts per void type
    pub void_types: IndexMap<String, u64>,
    /// Counts per locality
    pub localities: IndexMap<String, u64>,
}

impl DemandBreakdown {
    fn over(points: &[&NormalizedDemandPoint]) -> Self {
        Self {
            let_types: group_count(points, |p| p.let_type.clone()),
            void_types: group_count(points, |p| p.void_type.clone()),
            localities: group_count(points, |p| p.locality.clone()),
        }
    }
}

/// Everything the demand map page renders outside the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandView {
    /// Map features for the filtered, coordinate-bearing points
    pub features: FeatureCollection,
    /// Number of features currently visible
    pub visible_count: u64,
    /// Counts over the filtered features
    pub breakdown: DemandBreakdown,
    /// Counts over all mappable points, facets ignored
    pub overall: DemandBreakdown,
    /// Tenancy-end months with at least one visible feature, newest first
    pub available_months: Vec<MonthKey>,
}

/// One locality row of the fixed-window summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSummaryRow {
    /// The row's locality
    pub locality: String,
    /// One count per window month, in window order
    pub counts: Vec<u64>,
    /// Row total across the window
    pub total: u64,
}

/// The fixed-window Relet demand summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSummaryTable {
    /// The window months, in order
    pub months: Vec<MonthKey>,
    /// One row per summary locality, in [`SUMMARY_LOCALITIES`] order
    pub rows: Vec<DemandSummaryRow>,
    /// Per-month totals across all points, localities outside the fixed
    /// rows included
    pub column_totals: Vec<u64>,
    /// Grand total across the window
    pub grand_total: u64,
    /// Per-month locality counts for the stacked chart
    pub by_locality: Vec<StackedRow>,
    /// Per-month void-type counts for the stacked chart
    pub by_void_type: Vec<StackedRow>,
}

/// Build map features for coordinate-bearing demand points
///
/// Points without resolvable coordinates are skipped here but still count in
/// the non-geo aggregates.
pub fn demand_features(points: &[&NormalizedDemandPoint]) -> FeatureCollection {
    let features = points
        .iter()
        .filter_map(|p| {
            let location = p.location?;
            Some(MapFeature {
                location,
                color: locality_color(&p.locality).to_string(),
                properties: vec![
                    ("address".to_string(), p.address.clone()),
                    ("postcode".to_string(), p.postcode.clone()),
                    ("let_type".to_string(), p.let_type.clone()),
                    ("local_authority".to_string(), p.local_authority.clone()),
                    ("void_type".to_string(), p.void_type.clone()),
                    ("locality".to_string(), p.locality.clone()),
                    ("tenancy_end".to_string(), p.tenancy_end.date_label()),
                ],
            })
        })
        .collect();
    FeatureCollection::new(features)
}

/// Build the demand map view from the full cache
pub fn demand_view(cache: &[NormalizedDemandPoint], filter: &DemandFilter) -> DemandView {
    let mappable: Vec<&NormalizedDemandPoint> =
        cache.iter().filter(|p| p.location.is_some()).collect();
    let visible: Vec<&NormalizedDemandPoint> = filter_demand(cache, filter)
        .into_iter()
        .filter(|p| p.location.is_some())
        .collect();

    let mut available_months: Vec<MonthKey> = Vec::new();
    for point in &visible {
        if let Some(month) = point.tenancy_end.month_key() {
            if !available_months.contains(&month) {
                available_months.push(month);
            }
        }
    }
    available_months.sort();
    available_months.reverse();

    DemandView {
        features: demand_features(&visible),
        visible_count: visible.len() as u64,
        breakdown: DemandBreakdown::over(&visible),
        overall: DemandBreakdown::over(&mappable),
        available_months,
    }
}

/// Whether a point counts toward the Relet summary table
fn summary_eligible(point: &NormalizedDemandPoint) -> bool {
    point.let_type == "Relet" && !point.void_type.eq_ignore_ascii_case("n/a")
}

/// Build the fixed-window summary table from the full cache
///
/// Uses every cached point regardless of coordinates. Column totals count
/// all eligible points, so localities outside the fixed rows still
/// contribute to the totals row.
pub fn demand_summary(cache: &[NormalizedDemandPoint], window: MonthWindow) -> DemandSummaryTable {
    let eligible: Vec<&NormalizedDemandPoint> =
        cache.iter().filter(|p| summary_eligible(p)).collect();
    let months: Vec<MonthKey> = window.iter().collect();

    let count_cell = |locality: Option<&str>, month: MonthKey| -> u64 {
        eligible
            .iter()
            .filter(|p| {
                p.tenancy_end.month_key() == Some(month)
                    && locality.map_or(true, |l| p.locality == l)
            })
            .count() as u64
    };

    let rows: Vec<DemandSummaryRow> = SUMMARY_LOCALITIES
        .iter()
        .map(|locality| {
            let counts: Vec<u64> = months
                .iter()
                .map(|m| count_cell(Some(locality), *m))
                .collect();
            DemandSummaryRow {
                locality: locality.to_string(),
                total: counts.iter().sum(),
                counts,
            }
        })
        .collect();

    let column_totals: Vec<u64> = months.iter().map(|m| count_cell(None, *m)).collect();
    let grand_total = column_totals.iter().sum();

    DemandSummaryTable {
        by_locality: stacked_window_series(cache, |p| p.tenancy_end, |p| p.locality.clone(), window),
        by_void_type: stacked_window_series(
            cache,
            |p| p.tenancy_end,
            |p| p.void_type.clone(),
            window,
        ),
        months,
        rows,
        column_totals,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Facet;
    use crate::normalize::normalize_demand_point;
    use serde_json::json;

    fn point(fields: serde_json::Value) -> NormalizedDemandPoint {
        normalize_demand_point(fields.as_object().unwrap())
    }

    fn window() -> MonthWindow {
        MonthWindow::new(MonthKey::new(2024, 3).unwrap(), 13)
    }

    fn cache() -> Vec<NormalizedDemandPoint> {
        vec![
            point(json!({
                "Address of property": "1 High St",
                "Postcode": "BS1 1AA",
                "Locality": "WOE",
                "Let Type": "Relet",
                "Major or Minor void?": "Major",
                "Tenancy end date": "2024-04-15",
                "Latitude": "51.45",
                "Longitude": "-2.58"
            })),
            // Eligible but unmappable: still counts in the summary table
            point(json!({
                "Locality": "Glouc",
                "Let Type": "Relet",
                "Major or Minor void?": "Minor",
                "Tenancy end date": "2024-04-20"
            })),
            // Relet but "n/a" void type: never eligible
            point(json!({
                "Locality": "WOE",
                "Let Type": "Relet",
                "Major or Minor void?": "N/A",
                "Tenancy end date": "2024-04-01",
                "Latitude": "51.5",
                "Longitude": "-2.6"
            })),
            // Outside the window
            point(json!({
                "Locality": "Central",
                "Let Type": "Relet",
                "Major or Minor void?": "Major",
                "Tenancy end date": "2023-01-10",
                "Latitude": "52.0",
                "Longitude": "-2.0"
            })),
        ]
    }

    #[test]
    fn test_spec_cell_and_grand_total() {
        let cache = vec![point(json!({
            "Locality": "WOE",
            "Let Type": "Relet",
            "Major or Minor void?": "Major",
            "Tenancy end date": "2024-04-15"
        }))];
        let table = demand_summary(&cache, window());
        let apr = MonthKey::new(2024, 4).unwrap();
        let col = table.months.iter().position(|m| *m == apr).unwrap();
        let woe = &table.rows[0];
        assert_eq!(woe.locality, "WOE");
        assert_eq!(woe.counts[col], 1);
        assert_eq!(table.column_totals[col], 1);
        assert_eq!(table.grand_total, 1);
    }

    #[test]
    fn test_summary_includes_unmappable_points() {
        let cache = cache();
        let table = demand_summary(&cache, window());
        // WOE row excludes the n/a point; Glouc row keeps the unmappable one
        assert_eq!(table.rows[0].total, 1);
        assert_eq!(table.rows[1].total, 1);
        // Out-of-window and n/a points never reach the grand total
        assert_eq!(table.grand_total, 2);
    }

    #[test]
    fn test_table_always_has_window_width() {
        let table = demand_summary(&[], window());
        assert_eq!(table.months.len(), 13);
        assert_eq!(table.column_totals.len(), 13);
        for row in &table.rows {
            assert_eq!(row.counts.len(), 13);
        }
        assert_eq!(table.grand_total, 0);
    }

    #[test]
    fn test_view_counts_only_mappable_features() {
        let cache = cache();
        let view = demand_view(&cache, &DemandFilter::default());
        assert_eq!(view.visible_count, 3);
        assert_eq!(view.features.len(), 3);
        // The unmappable Glouc point is absent from the map breakdowns
        assert_eq!(view.breakdown.localities.get("Glouc"), None);
    }

    #[test]
    fn test_available_months_newest_first_over_visible() {
        let cache = cache();
        let filter = DemandFilter {
            locality: Facet::only("WOE"),
            ..DemandFilter::default()
        };
        let view = demand_view(&cache, &filter);
        assert_eq!(
            view.available_months,
            vec![MonthKey::new(2024, 4).unwrap()]
        );
    }

    #[test]
    fn test_features_carry_popup_properties() {
        let cache = cache();
        let view = demand_view(&cache, &DemandFilter::default());
        let feature = &view.features.features[0];
        assert_eq!(feature.property("address"), Some("1 High St"));
        assert_eq!(feature.property("locality"), Some("WOE"));
        assert_eq!(feature.color, "#1d4ed8");
    }
}
