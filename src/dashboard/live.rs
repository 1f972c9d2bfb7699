//! Live submissions map
//!
//! Projects recent, mappable survey submissions into map features. Circle
//! colors are per-surveyor so a surveyor's patch reads as one color, and the
//! popup shows the survey's headline totals.

use crate::filter::{live_surveys, Facet, LiveFilter};
use crate::map::{surveyor_color, FeatureCollection, MapFeature};
use crate::normalize::NormalizedSurvey;
use serde::{Deserialize, Serialize};

/// Everything the live map renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveView {
    /// Map features for the filtered submissions
    pub features: FeatureCollection,
    /// Distinct surveyors among all in-range submissions, first-seen order
    pub surveyors: Vec<String>,
    /// Distinct visit types among all in-range submissions
    pub visit_types: Vec<String>,
    /// Distinct void types among all in-range submissions
    pub void_types: Vec<String>,
}

/// Round to one decimal place, ties away from zero
///
/// Fixed-precision formatting alone rounds ties to even, so 2.25 would
/// render as "2.2"; the dashboards always show 2.25 days as "2.3".
fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Build map features for live submissions
pub fn live_features(surveys: &[&NormalizedSurvey]) -> FeatureCollection {
    let features = surveys
        .iter()
        .filter_map(|s| {
            let location = s.location?;
            Some(MapFeature {
                location,
                color: surveyor_color(&s.surveyor_name),
                properties: vec![
                    ("address".to_string(), s.property_address.clone()),
                    ("surveyor".to_string(), s.surveyor_name.clone()),
                    ("visit_type".to_string(), s.visit_type.clone()),
                    ("void_type".to_string(), s.void_type.clone()),
                    (
                        "void_time".to_string(),
                        format!("{:.1} days", round_tenth(s.totals.days_decimal)),
                    ),
                    (
                        "total_cost".to_string(),
                        format!("£{:.2}", s.totals.cost),
                    ),
                ],
            })
        })
        .collect();
    FeatureCollection::new(features)
}

/// Build the live map view from the full cache
///
/// Dropdown options come from every submission in the filter's date range,
/// facets ignored, so narrowing one facet never hides the others' options.
pub fn live_view(cache: &[NormalizedSurvey], filter: &LiveFilter) -> LiveView {
    let in_range = live_surveys(
        cache,
        &LiveFilter {
            range: filter.range,
            visit_type: Facet::All,
            void_type: Facet::All,
            surveyor: Facet::All,
        },
    );
    let visible = live_surveys(cache, filter);

    let mut surveyors: Vec<String> = Vec::new();
    let mut visit_types: Vec<String> = Vec::new();
    let mut void_types: Vec<String> = Vec::new();
    for survey in &in_range {
        if !surveyors.contains(&survey.surveyor_name) {
            surveyors.push(survey.surveyor_name.clone());
        }
        if !visit_types.contains(&survey.visit_type) {
            visit_types.push(survey.visit_type.clone());
        }
        if !void_types.contains(&survey.void_type) {
            void_types.push(survey.void_type.clone());
        }
    }

    LiveView {
        features: live_features(&visible),
        surveyors,
        visit_types,
        void_types,
    }
}
