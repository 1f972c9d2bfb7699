//! Contractor works dashboard
//!
//! Flattens meaningful contractor line items out of the filtered surveys and
//! derives the stat cards, breakdowns, monthly trend, and cost bands from
//! them. The work-type facet narrows the item list, not the record set, so
//! cost aggregates reflect matching items rather than whole surveys.

use crate::aggregate::{
    band_counts, group_count, monthly_series, sorted_desc, Band, BandSpec, SeriesPoint,
};
use crate::filter::predicate::{contractor_items, has_contractor_work, meaningful_work};
use crate::filter::{filter_surveys, SurveyFilter};
use crate::normalize::{LineItem, NormalizedSurvey};
use crate::types::{DateStamp, Rate};
use serde::{Deserialize, Serialize};

/// One meaningful contractor item with its parent survey's context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorWorkRow {
    /// Submitting surveyor
    pub surveyor_name: String,
    /// Parent survey's property address
    pub property_address: String,
    /// Parent survey's submission timestamp
    pub submitted_at: DateStamp,
    /// The flattened line item
    pub item: LineItem,
}

/// Everything the contractor dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorView {
    /// All cached submissions, the rate denominator
    pub total_submissions: u64,
    /// Surveys with meaningful contractor work under the active facets
    pub voids_with_contractor_work: u64,
    /// Share of all submissions with contractor work
    pub contractor_rate: Rate,
    /// Meaningful contractor items, work-type facet applied
    pub works: Vec<ContractorWorkRow>,
    /// Summed cost over `works`
    pub total_cost: f64,
    /// Mean cost over `works`, 0 when empty
    pub average_cost: f64,
    /// Summed time estimate over `works`, in minutes
    pub total_time_minutes: f64,
    /// Mean time estimate over `works`, in minutes, 0 when empty
    pub average_time_minutes: f64,
    /// Contractor-void counts per surveyor, descending
    pub by_surveyor: Vec<(String, u64)>,
    /// Item counts per description, descending, `"Unknown"` for blank
    pub by_description: Vec<(String, u64)>,
    /// Per-month contractor-void count and item cost, chronological
    pub monthly: Vec<SeriesPoint>,
    /// Distinct non-empty descriptions over the whole cache, sorted
    pub work_types: Vec<String>,
    /// Cost distribution over `works`
    pub cost_bands: Vec<Band>,
}

/// Build the contractor dashboard from the full cache
pub fn contractor_view(
    cache: &[NormalizedSurvey],
    filter: &SurveyFilter,
    bands: &BandSpec,
) -> ContractorView {
    let scoped = filter_surveys(cache, filter);
    let contractor_voids: Vec<&NormalizedSurvey> = scoped
        .iter()
        .copied()
        .filter(|s| has_contractor_work(s))
        .collect();

    let work_type = filter.work_type.selected();
    let works: Vec<ContractorWorkRow> = contractor_voids
        .iter()
        .flat_map(|s| {
            contractor_items(s)
                .filter(|i| meaningful_work(i))
                .filter(|i| work_type.map_or(true, |wt| i.description == *wt))
                .map(|i| ContractorWorkRow {
                    surveyor_name: s.surveyor_name.clone(),
                    property_address: s.property_address.clone(),
                    submitted_at: s.submitted_at,
                    item: i.clone(),
                })
        })
        .collect();

    // With a work-type facet active, a survey only counts as a contractor
    // void if one of its meaningful items matches that type
    let faceted_voids: Vec<&NormalizedSurvey> = match work_type {
        Some(wt) => contractor_voids
            .iter()
            .copied()
            .filter(|s| {
                contractor_items(s)
                    .any(|i| i.description == *wt && meaningful_work(i))
            })
            .collect(),
        None => contractor_voids.clone(),
    };

    let total_cost: f64 = works.iter().map(|w| w.item.cost).sum();
    let total_time_minutes: f64 = works.iter().map(|w| w.item.time_estimate).sum();
    let n = works.len() as f64;
    let average_cost = if works.is_empty() { 0.0 } else { total_cost / n };
    let average_time_minutes = if works.is_empty() {
        0.0
    } else {
        total_time_minutes / n
    };

    let monthly = monthly_series(
        &faceted_voids,
        |s| s.submitted_at,
        |s| {
            contractor_items(s)
                .filter(|i| work_type.map_or(true, |wt| i.description == *wt))
                .map(|i| i.cost)
                .sum()
        },
    );

    let mut work_types: Vec<String> = Vec::new();
    for survey in cache {
        for item in contractor_items(survey) {
            if !item.description.is_empty() && !work_types.contains(&item.description) {
                work_types.push(item.description.clone());
            }
        }
    }
    work_types.sort();

    let costs: Vec<f64> = works.iter().map(|w| w.item.cost).collect();

    ContractorView {
        total_submissions: cache.len() as u64,
        voids_with_contractor_work: faceted_voids.len() as u64,
        contractor_rate: Rate::of(faceted_voids.len() as f64, cache.len() as f64),
        total_cost,
        average_cost,
        total_time_minutes,
        average_time_minutes,
        by_surveyor: sorted_desc(&group_count(&contractor_voids, |s| {
            s.surveyor_name.clone()
        })),
        by_description: sorted_desc(&group_count(&works, |w| {
            if w.item.description.is_empty() {
                "Unknown".to_string()
            } else {
                w.item.description.clone()
            }
        })),
        monthly,
        work_types,
        cost_bands: band_counts(&costs, bands),
        works,
    }
}
