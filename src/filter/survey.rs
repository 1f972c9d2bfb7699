//! Survey filters
//!
//! Two filter shapes exist for surveys: the chart dashboards constrain by
//! surveyor and month (plus a line-item work-type facet the dashboards apply
//! themselves, because it narrows items rather than whole records), and the
//! live submissions map constrains by a date range plus visit/void/surveyor
//! facets with its own case-insensitive surveyor matching.

use super::Facet;
use crate::normalize::NormalizedSurvey;
use crate::types::MonthKey;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record-level facets shared by the chart dashboards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyFilter {
    /// Exact surveyor name match
    pub surveyor: Facet<String>,
    /// Submission month bucket
    pub month: Facet<MonthKey>,
    /// Line-item description match, applied by dashboards at item level
    pub work_type: Facet<String>,
}

impl SurveyFilter {
    /// Whether a survey passes the record-level facets
    ///
    /// The work-type facet is not evaluated here: it reduces the line-item
    /// projection, not the record set.
    pub fn admits(&self, survey: &NormalizedSurvey) -> bool {
        let month_ok = match &self.month {
            Facet::All => true,
            Facet::Only(m) => survey.submitted_at.month_key() == Some(*m),
        };
        month_ok && self.surveyor.admits(&survey.surveyor_name)
    }
}

/// Apply record-level facets over the full cache
///
/// Always consumes the complete cache slice; never feed a prior filtered
/// result back in.
pub fn filter_surveys<'a>(
    cache: &'a [NormalizedSurvey],
    filter: &SurveyFilter,
) -> Vec<&'a NormalizedSurvey> {
    cache.iter().filter(|s| filter.admits(s)).collect()
}

/// An inclusive day range
///
/// The end bound covers the whole end day, so a submission at 23:59 on the
/// end date is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First included day
    pub start: NaiveDate,
    /// Last included day (whole day)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The default live-map range: the last `days` days ending today
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Whether a timestamp falls inside the range
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let day = at.date();
        day >= self.start && day <= self.end
    }
}

/// Facets for the live submissions map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFilter {
    /// Submission date range
    pub range: DateRange,
    /// Visit type, exact match
    pub visit_type: Facet<String>,
    /// Void type, exact match
    pub void_type: Facet<String>,
    /// Surveyor, trimmed and case-insensitive, since surveyor names in live
    /// submissions carry inconsistent casing and stray whitespace
    pub surveyor: Facet<String>,
}

impl LiveFilter {
    /// A filter admitting the last 30 days with no facet constraints
    pub fn default_window() -> Self {
        Self {
            range: DateRange::last_days(30),
            visit_type: Facet::All,
            void_type: Facet::All,
            surveyor: Facet::All,
        }
    }

    /// Whether a survey passes the live-map facets
    ///
    /// Only mappable submissions qualify: a known timestamp inside the range
    /// and resolvable coordinates.
    pub fn admits(&self, survey: &NormalizedSurvey) -> bool {
        if survey.location.is_none() {
            return false;
        }
        let Some(at) = survey.submitted_at.datetime() else {
            return false;
        };
        if !self.range.contains(at) {
            return false;
        }
        let surveyor_ok = match &self.surveyor {
            Facet::All => true,
            Facet::Only(name) => {
                survey
                    .surveyor_name
                    .trim()
                    .eq_ignore_ascii_case(name.trim())
            }
        };
        surveyor_ok
            && self.visit_type.admits(&survey.visit_type)
            && self.void_type.admits(&survey.void_type)
    }
}

/// Apply live-map facets over the full cache
pub fn live_surveys<'a>(
    cache: &'a [NormalizedSurvey],
    filter: &LiveFilter,
) -> Vec<&'a NormalizedSurvey> {
    cache.iter().filter(|s| filter.admits(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_survey;
    use serde_json::json;

    fn survey(fields: serde_json::Value) -> NormalizedSurvey {
        normalize_survey(fields.as_object().unwrap())
    }

    fn cache() -> Vec<NormalizedSurvey> {
        vec![
            survey(json!({
                "surveyorName": "Alice",
                "submittedAt": "2024-04-15T09:30:00Z",
                "visitType": "Initial",
                "voidType": "Major",
                "location": {"latitude": 52.5, "longitude": -1.9}
            })),
            survey(json!({
                "surveyorName": " alice ",
                "submittedAt": "2024-05-02T10:00:00Z",
                "visitType": "Follow-up",
                "voidType": "Minor",
                "location": {"latitude": 52.4, "longitude": -1.8}
            })),
            survey(json!({
                "surveyorName": "Bob",
                "submittedAt": "not a date"
            })),
        ]
    }

    #[test]
    fn test_default_filter_admits_all() {
        let cache = cache();
        assert_eq!(filter_surveys(&cache, &SurveyFilter::default()).len(), 3);
    }

    #[test]
    fn test_facets_compose_by_and() {
        let cache = cache();
        let filter = SurveyFilter {
            surveyor: Facet::only("Alice"),
            month: Facet::Only(MonthKey::new(2024, 4).unwrap()),
            work_type: Facet::All,
        };
        let matched = filter_surveys(&cache, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].surveyor_name, "Alice");
    }

    #[test]
    fn test_unknown_date_fails_month_facet() {
        let cache = cache();
        let filter = SurveyFilter {
            month: Facet::Only(MonthKey::new(2024, 4).unwrap()),
            ..SurveyFilter::default()
        };
        // Bob's unparsable date excludes him from any month bucket
        assert!(filter_surveys(&cache, &filter)
            .iter()
            .all(|s| s.surveyor_name != "Bob"));
    }

    #[test]
    fn test_refiltering_starts_from_full_cache() {
        let cache = cache();
        let narrow = SurveyFilter {
            surveyor: Facet::only("Alice"),
            ..SurveyFilter::default()
        };
        let _ = filter_surveys(&cache, &narrow);
        // Clearing the facet recovers everything: no residual exclusions
        assert_eq!(filter_surveys(&cache, &SurveyFilter::default()).len(), 3);
    }

    #[test]
    fn test_date_range_end_is_whole_day_inclusive() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        )
        .unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 4, 30)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert!(range.contains(late));
        let next_day = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(!range.contains(next_day));
    }

    #[test]
    fn test_live_surveyor_match_is_case_insensitive() {
        let cache = cache();
        let filter = LiveFilter {
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            )
            .unwrap(),
            visit_type: Facet::All,
            void_type: Facet::All,
            surveyor: Facet::only("ALICE"),
        };
        // Matches both "Alice" and " alice " despite case and padding
        assert_eq!(live_surveys(&cache, &filter).len(), 2);
    }

    #[test]
    fn test_live_filter_requires_coordinates_and_known_date() {
        let cache = vec![
            survey(json!({
                "surveyorName": "Cara",
                "submittedAt": "2024-04-15T09:30:00Z"
            })),
            survey(json!({
                "surveyorName": "Dan",
                "location": {"latitude": 52.5, "longitude": -1.9}
            })),
        ];
        let filter = LiveFilter {
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            )
            .unwrap(),
            visit_type: Facet::All,
            void_type: Facet::All,
            surveyor: Facet::All,
        };
        assert!(live_surveys(&cache, &filter).is_empty());
    }
}
