//! Submissions listing

use crate::normalize::NormalizedSurvey;
use crate::types::DateStamp;
use serde::{Deserialize, Serialize};

/// One submission card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionCard {
    /// Document id
    pub id: String,
    /// Submitting surveyor
    pub surveyor_name: String,
    /// Property address
    pub property_address: String,
    /// Survey total cost
    pub total_cost: f64,
    /// Submission timestamp
    pub submitted_at: DateStamp,
}

/// Build the submissions listing, one card per cached survey in cache order
pub fn submissions_view(cache: &[NormalizedSurvey]) -> Vec<SubmissionCard> {
    cache
        .iter()
        .map(|s| SubmissionCard {
            id: s.id.clone(),
            surveyor_name: s.surveyor_name.clone(),
            property_address: s.property_address.clone(),
            total_cost: s.totals.cost,
            submitted_at: s.submitted_at,
        })
        .collect()
}
