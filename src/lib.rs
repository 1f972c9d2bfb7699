//! Voidhub - Property survey and demand analytics pipeline
//!
//! This library turns schema-less survey and demand documents into dashboard
//! view models:
//! - Defensive normalization of heterogeneous raw records
//! - Composable multi-facet filtering, always from the full cache
//! - Counts, sums, cost bands, and month-bucketed time series
//! - A map layer synchronizer that survives asynchronous style reloads

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

/// Configuration management with TOML support
pub mod config;

/// Document store gateway and in-memory implementation
pub mod store;

/// Raw record normalization: coercion, dates, surveys, demand points
pub mod normalize;

/// Facets, filters, and the named classification predicates
pub mod filter;

/// Aggregation engine: grouped counts/sums, bands, time series
pub mod aggregate;

/// Map layer lifecycle: rendering surface, layer plans, synchronizer
pub mod map;

/// Dashboard view models, pure functions of `(cache, filter)`
pub mod dashboard;

/// WYSIWYG tabular exports over the view models
pub mod export;

/// The analytics hub owning the caches and the store gateway
pub mod hub;

// Re-export main types
pub use error::{Error, Result};
pub use hub::Hub;
pub use types::{DateStamp, LngLat, MonthKey, Rate};
