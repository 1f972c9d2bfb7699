//! Aggregation engine
//!
//! Derives counts, sums, bands, and time-series from a filtered entity set.
//! All aggregators are pure folds over slices; none can fail on missing
//! fields, because the normalizer already defaulted them.
//!
//! ```text
//! filtered set ──► group_count / group_sum ──► insertion-ordered maps
//!             ──► band_counts              ──► cost distribution bands
//!             ──► monthly_series           ──► chronological series
//!             ──► fixed_window_series      ──► zero-filled N-month window
//! ```

mod bands;
mod group;
mod series;

pub use bands::{band_counts, Band, BandSpec};
pub use group::{group_count, group_stats, group_sum, sorted_desc, top_n, GroupStats};
pub use series::{fixed_window_series, monthly_series, stacked_window_series, MonthWindow, SeriesPoint, StackedRow};
