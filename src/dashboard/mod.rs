//! Dashboard view models
//!
//! Each dashboard is a pure function from `(cache, filter)` to a view model;
//! no dashboard holds state and none mutates the cache. Recomputing on every
//! facet change always starts from the full cache, so clearing a facet can
//! never leave residual exclusions.
//!
//! The dashboards deliberately differ in small ways: the contractor rate
//! divides by the whole cache while the recharge rate divides by the
//! filtered set, and their recharge selection rules diverge. Those
//! differences are live business rules, kept under separately named
//! predicates in [`crate::filter::predicate`].

mod contractor;
mod demand;
mod gifting;
mod live;
mod recharge;
mod submissions;

pub use contractor::{contractor_view, ContractorView, ContractorWorkRow};
pub use demand::{
    demand_features, demand_summary, demand_view, DemandBreakdown, DemandSummaryRow,
    DemandSummaryTable, DemandView,
};
pub use gifting::{gifting_view, GiftCategory, GiftedRecord, GiftingFilter, GiftingView};
pub use live::{live_features, live_view, LiveView};
pub use recharge::{recharge_view, RechargeDetailRow, RechargeView};
pub use submissions::{submissions_view, SubmissionCard};
