//! Named line-item and survey predicates
//!
//! Several dashboards classify "has contractor work" / "has recharge" with
//! near-identical but not identical rules. Each rule is kept under its own
//! name and tested independently; unifying them would silently change
//! dashboard counts.

use crate::normalize::{LineItem, NormalizedSurvey, CONTRACTOR_CATEGORY};

/// The shared "meaningful line item" rule
///
/// An item counts as real contractor work iff it has a positive cost, a
/// non-empty description, or a non-empty comment (both trimmed). Every
/// "voids with contractor work" classification uses exactly this predicate.
pub fn meaningful_work(item: &LineItem) -> bool {
    item.cost > 0.0
        || !item.description.trim().is_empty()
        || !item.comment.trim().is_empty()
}

/// Survey-level recharge selection (recharge dashboard)
///
/// Broad form: any truthy recharge signal counts (the flag, a positive
/// recharge time, or a positive recharge cost) as long as the item has a
/// quantity.
pub fn recharge_void(item: &LineItem) -> bool {
    item.quantity > 0.0
        && (item.recharge || item.recharge_time > 0.0 || item.recharge_cost > 0.0)
}

/// Item-level recharge selection (recharge breakdowns and detail rows)
///
/// Narrow form: only the explicit flag counts.
pub fn recharge_item(item: &LineItem) -> bool {
    item.quantity > 0.0 && item.recharge
}

/// Whether a survey was gifted: lowercased notes are non-empty
pub fn gifted(survey: &NormalizedSurvey) -> bool {
    !survey.gifted_notes.is_empty()
}

/// The contractor-category items of a survey
pub fn contractor_items(survey: &NormalizedSurvey) -> impl Iterator<Item = &LineItem> {
    survey
        .line_items
        .iter()
        .filter(|i| i.category == CONTRACTOR_CATEGORY)
}

/// Whether a survey has any meaningful contractor work
pub fn has_contractor_work(survey: &NormalizedSurvey) -> bool {
    contractor_items(survey).any(meaningful_work)
}

/// Whether a survey has any recharge-selected item (broad form)
pub fn has_recharge(survey: &NormalizedSurvey) -> bool {
    survey.line_items.iter().any(recharge_void)
}
