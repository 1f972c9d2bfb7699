//! Gifting dashboard
//!
//! Works off the lowercased gifted-items notes captured at normalization.
//! Categories are keyword matches over the note text; a note can match more
//! than one category, and `Other` catches notes matching none.

use crate::filter::predicate::gifted;
use crate::filter::Facet;
use crate::normalize::NormalizedSurvey;
use crate::types::Rate;
use serde::{Deserialize, Serialize};

const FLOORING_KEYWORDS: [&str; 5] = ["carpet", "vinyl", "laminate", "floor", "flooring"];
const WINDOW_KEYWORDS: [&str; 2] = ["curtain", "blind"];
const SHED_KEYWORD: &str = "shed";

/// A gifted-item category derived from note keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftCategory {
    /// Carpet, vinyl, laminate, or any flooring mention
    Flooring,
    /// Curtains or blinds
    WindowCoverings,
    /// Sheds
    Shed,
    /// No known keyword matched
    Other,
}

impl GiftCategory {
    /// Whether a lowercased note matches this category
    pub fn matches(&self, note: &str) -> bool {
        match self {
            GiftCategory::Flooring => FLOORING_KEYWORDS.iter().any(|k| note.contains(k)),
            GiftCategory::WindowCoverings => WINDOW_KEYWORDS.iter().any(|k| note.contains(k)),
            GiftCategory::Shed => note.contains(SHED_KEYWORD),
            GiftCategory::Other => {
                !FLOORING_KEYWORDS.iter().any(|k| note.contains(k))
                    && !WINDOW_KEYWORDS.iter().any(|k| note.contains(k))
                    && !note.contains(SHED_KEYWORD)
            }
        }
    }
}

/// Facets for the gifting dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GiftingFilter {
    /// Exact surveyor name match
    pub surveyor: Facet<String>,
    /// Gifted-item category match
    pub gift_type: Facet<GiftCategory>,
}

/// One gifted survey's display fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftedRecord {
    /// Document id
    pub id: String,
    /// Property address
    pub address: String,
    /// Submitting surveyor
    pub surveyor_name: String,
    /// Lowercased gifted-items notes
    pub notes: String,
}

/// Everything the gifting dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftingView {
    /// All cached submissions, gifted or not
    pub total_surveys: u64,
    /// Gifted records under the active facets, in cache order
    pub gifted: Vec<GiftedRecord>,
    /// Share of all cached submissions in `gifted`
    pub gifted_rate: Rate,
    /// Gifted records failing the category facet (surveyor facet still
    /// applied); 0 when no category facet is active
    pub non_gifted_count: u64,
    /// `(category, count)` over the faceted records; a record may count in
    /// several categories, and `Other` only when none matched
    pub category_counts: Vec<(GiftCategory, u64)>,
    /// Distinct surveyors among all gifted records, first-seen order
    pub surveyors: Vec<String>,
}

/// Build the gifting dashboard from the full cache
pub fn gifting_view(cache: &[NormalizedSurvey], filter: &GiftingFilter) -> GiftingView {
    let all_gifted: Vec<&NormalizedSurvey> = cache.iter().filter(|s| gifted(s)).collect();

    let by_surveyor: Vec<&NormalizedSurvey> = all_gifted
        .iter()
        .copied()
        .filter(|s| filter.surveyor.admits(&s.surveyor_name))
        .collect();

    let (matched, complement): (Vec<&NormalizedSurvey>, Vec<&NormalizedSurvey>) =
        match filter.gift_type.selected() {
            Some(category) => by_surveyor
                .iter()
                .copied()
                .partition(|s| category.matches(&s.gifted_notes)),
            None => (by_surveyor.clone(), Vec::new()),
        };

    let mut counts = [
        (GiftCategory::Flooring, 0u64),
        (GiftCategory::WindowCoverings, 0),
        (GiftCategory::Shed, 0),
        (GiftCategory::Other, 0),
    ];
    for survey in &matched {
        for (category, count) in counts.iter_mut() {
            if category.matches(&survey.gifted_notes) {
                *count += 1;
            }
        }
    }

    let mut surveyors: Vec<String> = Vec::new();
    for survey in &all_gifted {
        if !surveyors.contains(&survey.surveyor_name) {
            surveyors.push(survey.surveyor_name.clone());
        }
    }

    GiftingView {
        total_surveys: cache.len() as u64,
        gifted_rate: Rate::of(matched.len() as f64, cache.len() as f64),
        gifted: matched
            .iter()
            .map(|s| GiftedRecord {
                id: s.id.clone(),
                address: s.property_address.clone(),
                surveyor_name: s.surveyor_name.clone(),
                notes: s.gifted_notes.clone(),
            })
            .collect(),
        non_gifted_count: complement.len() as u64,
        category_counts: counts.to_vec(),
        surveyors,
    }
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
                "propertyAddress": "1 High St",
                "giftedItemsNotes": "Carpet in lounge, curtains in bedroom"
            })),
            survey(json!({
                "surveyorName": "Bob",
                "giftedItemsNotes": "Garden SHED left in good condition"
            })),
            survey(json!({
                "surveyorName": "Alice",
                "giftedItemsNotes": "Washing machine"
            })),
            survey(json!({"surveyorName": "Cara"})),
        ]
    }

    #[test]
    fn test_only_noted_surveys_are_gifted() {
        let cache = cache();
        let view = gifting_view(&cache, &GiftingFilter::default());
        assert_eq!(view.total_surveys, 4);
        assert_eq!(view.gifted.len(), 3);
        assert_eq!(view.non_gifted_count, 0);
        assert_eq!(view.gifted_rate.to_string(), "75.0%");
    }

    #[test]
    fn test_gifted_rate_tracks_facets_and_is_na_when_empty() {
        let cache = cache();
        let filter = GiftingFilter {
            gift_type: Facet::Only(GiftCategory::Shed),
            ..GiftingFilter::default()
        };
        let view = gifting_view(&cache, &filter);
        assert_eq!(view.gifted_rate.to_string(), "25.0%");

        let view = gifting_view(&[], &GiftingFilter::default());
        assert_eq!(view.gifted_rate, Rate::NotApplicable);
    }

    #[test]
    fn test_notes_match_case_insensitively() {
        // Notes are lowercased at normalization, so "SHED" matches
        let cache = cache();
        let filter = GiftingFilter {
            gift_type: Facet::Only(GiftCategory::Shed),
            ..GiftingFilter::default()
        };
        let view = gifting_view(&cache, &filter);
        assert_eq!(view.gifted.len(), 1);
        assert_eq!(view.gifted[0].surveyor_name, "Bob");
    }

    #[test]
    fn test_category_facet_tracks_complement() {
        let cache = cache();
        let filter = GiftingFilter {
            gift_type: Facet::Only(GiftCategory::Flooring),
            ..GiftingFilter::default()
        };
        let view = gifting_view(&cache, &filter);
        assert_eq!(view.gifted.len(), 1);
        assert_eq!(view.non_gifted_count, 2);
    }

    #[test]
    fn test_record_may_count_in_several_categories() {
        let cache = cache();
        let view = gifting_view(&cache, &GiftingFilter::default());
        let count_for = |c: GiftCategory| {
            view.category_counts
                .iter()
                .find(|(cat, _)| *cat == c)
                .map(|(_, n)| *n)
                .unwrap_or(0)
        };
        // Alice's first note has both carpet and curtains
        assert_eq!(count_for(GiftCategory::Flooring), 1);
        assert_eq!(count_for(GiftCategory::WindowCoverings), 1);
        assert_eq!(count_for(GiftCategory::Shed), 1);
        assert_eq!(count_for(GiftCategory::Other), 1);
    }

    #[test]
    fn test_other_means_no_keyword_matched() {
        assert!(GiftCategory::Other.matches("washing machine"));
        assert!(!GiftCategory::Other.matches("old carpet"));
    }

    #[test]
    fn test_surveyor_list_ignores_facets() {
        let cache = cache();
        let filter = GiftingFilter {
            surveyor: Facet::only("Bob"),
            ..GiftingFilter::default()
        };
        let view = gifting_view(&cache, &filter);
        assert_eq!(view.surveyors, vec!["Alice", "Bob"]);
        assert_eq!(view.gifted.len(), 1);
    }
}
