//! The analytics hub
//!
//! Owns the normalized caches and the document-store gateway. Fetches are
//! one-shot and fire-and-forget: a failed refresh logs a warning and leaves
//! the cache exactly as it was, and concurrent refreshes resolve last-write-
//! wins: whichever response lands last overwrites the cache. Dashboards
//! read cheap `Arc` snapshots, so a refresh landing mid-render never mutates
//! a set a dashboard is iterating.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use voidhub::config::HubConfig;
//! use voidhub::hub::Hub;
//! use voidhub::store::MemoryStore;
//!
//! # async fn demo() {
//! let config = HubConfig::default();
//! let store = Arc::new(MemoryStore::new().with_collection(&config.store.surveys_collection, Vec::new()));
//! let hub = Hub::new(store, config);
//! hub.refresh_surveys().await;
//! let surveys = hub.surveys();
//! # }
//! ```

use crate::aggregate::{BandSpec, MonthWindow};
use crate::config::HubConfig;
use crate::normalize::{
    normalize_demand_point, normalize_survey, NormalizedDemandPoint, NormalizedSurvey,
};
use crate::store::DocumentStore;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Normalized caches over one document store
pub struct Hub {
    store: Arc<dyn DocumentStore>,
    config: HubConfig,
    surveys: RwLock<Arc<Vec<NormalizedSurvey>>>,
    demand: RwLock<Arc<Vec<NormalizedDemandPoint>>>,
}

impl Hub {
    /// Create a hub over a store; both caches start empty
    pub fn new(store: Arc<dyn DocumentStore>, config: HubConfig) -> Self {
        Self {
            store,
            config,
            surveys: RwLock::new(Arc::new(Vec::new())),
            demand: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// The hub's configuration
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Snapshot of the survey cache
    pub fn surveys(&self) -> Arc<Vec<NormalizedSurvey>> {
        Arc::clone(&self.surveys.read())
    }

    /// Snapshot of the demand cache
    pub fn demand(&self) -> Arc<Vec<NormalizedDemandPoint>> {
        Arc::clone(&self.demand.read())
    }

    /// The configured fixed summary window
    ///
    /// `None` only for a config that failed or skipped validation.
    pub fn summary_window(&self) -> Option<MonthWindow> {
        self.config
            .summary
            .start()
            .map(|start| MonthWindow::new(start, self.config.summary.months))
    }

    /// The configured cost band spec
    pub fn band_spec(&self) -> BandSpec {
        BandSpec::new(&self.config.bands.boundaries)
    }

    /// Refresh the survey cache from the store
    ///
    /// Fetches every survey document, normalizes, and swaps the cache. On
    /// fetch failure the existing cache is kept and the error is only
    /// logged; no retry is attempted.
    pub async fn refresh_surveys(&self) {
        let collection = &self.config.store.surveys_collection;
        match self.store.fetch_all(collection, None).await {
            Ok(records) => {
                let normalized: Vec<NormalizedSurvey> =
                    records.iter().map(normalize_survey).collect();
                debug!(%collection, count = normalized.len(), "survey cache refreshed");
                *self.surveys.write() = Arc::new(normalized);
            }
            Err(e) => {
                warn!(%collection, error = %e, "survey fetch failed; keeping cached data");
            }
        }
    }

    /// Refresh the demand cache from the store
    ///
    /// The demand collection is large, so the fetch is capped at the
    /// configured limit. Failure semantics match
    /// [`refresh_surveys`](Self::refresh_surveys).
    pub async fn refresh_demand(&self) {
        let collection = &self.config.store.demand_collection;
        let cap = self.config.store.demand_fetch_cap;
        match self.store.fetch_all(collection, Some(cap)).await {
            Ok(records) => {
                let normalized: Vec<NormalizedDemandPoint> =
                    records.iter().map(normalize_demand_point).collect();
                debug!(%collection, count = normalized.len(), "demand cache refreshed");
                *self.demand.write() = Arc::new(normalized);
            }
            Err(e) => {
                warn!(%collection, error = %e, "demand fetch failed; keeping cached data");
            }
        }
    }
}
