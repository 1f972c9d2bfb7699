//! Composable multi-facet filtering
//!
//! Each facet is a typed [`Facet`] holder: `All` is the identity predicate,
//! `Only(v)` constrains to one value. Active facets compose by logical AND
//! and are commutative. Filtering is re-entrant: every filter function takes
//! the full cache slice, never a previously filtered subset, so clearing a
//! facet can never leave residual exclusions.
//!
//! The per-dashboard line-item predicates live in [`predicate`] under
//! separate names. Their small divergences (flag-only vs flag-or-cost
//! recharge checks, exact vs case-insensitive surveyor matching) are
//! long-standing dashboard behavior and are deliberately not unified.

mod demand;
mod facet;
pub mod predicate;
mod survey;

pub use demand::{filter_demand, DemandFilter};
pub use facet::Facet;
pub use survey::{filter_surveys, live_surveys, DateRange, LiveFilter, SurveyFilter};
