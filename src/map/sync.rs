//! The layer synchronizer state machine
//!
//! # Example
//!
//! ```
//! use voidhub::config::MapConfig;
//! use voidhub::map::{stubs::RecordingSurface, FeatureCollection, LayerPlan, MapSynchronizer};
//!
//! let plan = LayerPlan::historic_demand(&MapConfig::default());
//! let mut sync = MapSynchronizer::new(RecordingSurface::new(), plan);
//! sync.initialize();
//! sync.update_data(FeatureCollection::default()); // deferred, style still loading
//! sync.style_loaded(); // source + layer + handler created, deferred data applied
//! ```

use super::plan::LayerPlan;
use super::surface::{FeatureCollection, RenderSurface};
use tracing::{debug, warn};

/// Synchronizer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No style requested yet
    Uninitialized,
    /// A style load is in flight; the surface holds no registrations
    StyleLoading,
    /// The current style epoch has its source, layer, and handler
    Ready,
}

/// Drives one rendering surface through style swaps and data refreshes
///
/// All surface mutation goes through this type. A style swap invalidates
/// every registration on the surface, so the synchronizer rebuilds the full
/// plan on each style-loaded notification and never patches incrementally.
pub struct MapSynchronizer<S> {
    surface: S,
    plan: LayerPlan,
    state: SyncState,
    /// Data applied to the current epoch's source, replayed into the next
    current: FeatureCollection,
    /// Refresh that arrived while loading; last write wins
    pending: Option<FeatureCollection>,
}

impl<S: RenderSurface> MapSynchronizer<S> {
    /// Wrap a surface; no style is requested until [`initialize`](Self::initialize)
    pub fn new(surface: S, plan: LayerPlan) -> Self {
        Self {
            surface,
            plan,
            state: SyncState::Uninitialized,
            current: FeatureCollection::default(),
            pending: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The wrapped surface, for inspection
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Request the plan's initial style
    pub fn initialize(&mut self) {
        let style = self.plan.initial_style.clone();
        self.set_style(&style);
    }

    /// Request a style change
    ///
    /// Valid from any state. The surface discards every prior registration
    /// on style swap, so the current epoch is over regardless of whether it
    /// ever reached `Ready`.
    pub fn set_style(&mut self, style: &str) {
        debug!(style, state = ?self.state, "requesting style load");
        self.surface.set_style(style);
        self.state = SyncState::StyleLoading;
    }

    /// Handle the surface's style-loaded notification
    ///
    /// Creates the point source, circle layer, and click handler exactly
    /// once per epoch, then applies any refresh deferred during the load. A
    /// notification outside `StyleLoading` is ignored; re-registering would
    /// duplicate the click handler.
    pub fn style_loaded(&mut self) {
        if self.state != SyncState::StyleLoading {
            debug!(state = ?self.state, "ignoring style-loaded notification");
            return;
        }

        if self.plan.decorations {
            // Decorations are shared surface furniture, not part of the
            // plan's source/layer pair; existence checks guard a surface
            // that preserved them across the swap.
            if !self.surface.has_terrain_relief() {
                self.surface.add_terrain_relief();
            }
            if !self.surface.has_building_extrusions() {
                self.surface.add_building_extrusions();
            }
        }

        if let Some(deferred) = self.pending.take() {
            debug!(features = deferred.len(), "replaying deferred data refresh");
            self.current = deferred;
        }

        self.surface.add_point_source(&self.plan.source_id, &self.current);
        self.surface.add_circle_layer(&self.plan.layer);
        self.surface
            .register_click_popup(&self.plan.layer.id, &self.plan.popup);
        self.state = SyncState::Ready;
    }

    /// Apply a data refresh
    ///
    /// When `Ready`, replaces the source data in place. Otherwise the
    /// refresh is deferred until the next style-loaded notification;
    /// applying it now would be a silent no-op since no source exists.
    /// Concurrent refreshes collapse to the latest.
    pub fn update_data(&mut self, data: FeatureCollection) {
        match self.state {
            SyncState::Ready => {
                self.surface.set_point_data(&self.plan.source_id, &data);
                self.current = data;
            }
            SyncState::StyleLoading => {
                if self.pending.is_some() {
                    warn!("superseding a deferred data refresh; last write wins");
                }
                self.pending = Some(data);
            }
            SyncState::Uninitialized => {
                debug!("holding data refresh until first style load");
                self.pending = Some(data);
            }
        }
    }
}
