//! Recharge dashboard
//!
//! Selects surveys with tenant-damage recharges and derives cost/time impact
//! stats, breakdowns, the monthly trend, and the detail table. Survey
//! selection uses the broad recharge rule (any recharge signal); item-level
//! breakdowns use the narrow rule (explicit flag only); see
//! [`crate::filter::predicate`] for why the two are kept apart.

use crate::aggregate::{group_count, group_sum, monthly_series, sorted_desc, SeriesPoint};
use crate::filter::predicate::{has_recharge, recharge_item};
use crate::filter::{filter_surveys, SurveyFilter};
use crate::normalize::NormalizedSurvey;
use crate::types::{DateStamp, Rate};
use serde::{Deserialize, Serialize};

/// One row of the recharge detail table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeDetailRow {
    /// Property address
    pub property_address: String,
    /// Submitting surveyor
    pub surveyor_name: String,
    /// Submission timestamp
    pub submitted_at: DateStamp,
    /// Survey-level recharge cost
    pub recharge_cost: f64,
    /// Survey-level recharge time in minutes
    pub recharge_minutes: f64,
    /// Up to three flagged item descriptions, comma-joined
    pub items: String,
}

/// Everything the recharge dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeView {
    /// Submissions under the active facets, the rate denominator
    pub total_submissions: u64,
    /// Surveys with any recharge signal
    pub voids_with_recharge: u64,
    /// Share of filtered submissions with a recharge
    pub with_recharge_rate: Rate,
    /// Complementary share without a recharge
    pub no_recharge_rate: Rate,
    /// Summed recharge cost over the selected surveys
    pub total_cost: f64,
    /// Summed recharge time over the selected surveys, in minutes
    pub total_minutes: f64,
    /// Mean recharge cost per selected survey, `None` when none selected
    pub average_cost: Option<f64>,
    /// Mean recharge time per selected survey, `None` when none selected
    pub average_minutes: Option<f64>,
    /// Recharge-void counts per surveyor, descending
    pub by_surveyor: Vec<(String, u64)>,
    /// Flagged-item quantity per description, descending, top 10
    pub by_type: Vec<(String, f64)>,
    /// Flagged-item quantity per `code - description`, descending, top 10
    pub top_codes: Vec<(String, f64)>,
    /// Per-month recharge-void count and cost, chronological
    pub monthly: Vec<SeriesPoint>,
    /// Detail rows, one per selected survey, in cache order
    pub detail: Vec<RechargeDetailRow>,
}

/// Minutes of recharge time carried on a survey's totals
fn recharge_minutes(survey: &NormalizedSurvey) -> f64 {
    survey.totals.recharge_days_decimal * 60.0
}

/// Descending `(key, quantity)` pairs, ties in first-seen order, top `n`
fn top_quantities(sums: indexmap::IndexMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = sums.into_iter().collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}

/// Build the recharge dashboard from the full cache
pub fn recharge_view(cache: &[NormalizedSurvey], filter: &SurveyFilter) -> RechargeView {
    let scoped = filter_surveys(cache, filter);
    let voids: Vec<&NormalizedSurvey> = scoped
        .iter()
        .copied()
        .filter(|s| has_recharge(s))
        .collect();

    let total_cost: f64 = voids.iter().map(|s| s.totals.recharge_cost).sum();
    let total_minutes: f64 = voids.iter().map(|s| recharge_minutes(s)).sum();
    let n = voids.len() as f64;

    let flagged = |s: &&NormalizedSurvey| {
        s.line_items
            .iter()
            .filter(|i| recharge_item(i))
            .cloned()
            .collect::<Vec<_>>()
    };

    let flagged_items: Vec<_> = voids.iter().flat_map(flagged).collect();

    let by_type = top_quantities(
        group_sum(
            &flagged_items,
            |i| {
                if i.description.is_empty() {
                    "Unknown".to_string()
                } else {
                    i.description.clone()
                }
            },
            |i| i.quantity,
        ),
        10,
    );

    let top_codes = top_quantities(
        group_sum(
            &flagged_items,
            |i| format!("{} - {}", i.code, i.description),
            |i| i.quantity,
        ),
        10,
    );

    let detail = voids
        .iter()
        .map(|s| {
            let items: Vec<String> = s
                .line_items
                .iter()
                .filter(|i| recharge_item(i))
                .map(|i| i.description.clone())
                .filter(|d| !d.is_empty())
                .take(3)
                .collect();
            RechargeDetailRow {
                property_address: s.property_address.clone(),
                surveyor_name: s.surveyor_name.clone(),
                submitted_at: s.submitted_at,
                recharge_cost: s.totals.recharge_cost,
                recharge_minutes: recharge_minutes(s),
                items: items.join(", "),
            }
        })
        .collect();

    RechargeView {
        total_submissions: scoped.len() as u64,
        voids_with_recharge: voids.len() as u64,
        with_recharge_rate: Rate::of(voids.len() as f64, scoped.len() as f64),
        no_recharge_rate: Rate::of((scoped.len() - voids.len()) as f64, scoped.len() as f64),
        total_cost,
        total_minutes,
        average_cost: (!voids.is_empty()).then(|| total_cost / n),
        average_minutes: (!voids.is_empty()).then(|| total_minutes / n),
        by_surveyor: sorted_desc(&group_count(&voids, |s| s.surveyor_name.clone())),
        by_type,
        top_codes,
        monthly: monthly_series(&voids, |s| s.submitted_at, |s| s.totals.recharge_cost),
        detail,
    }
}
