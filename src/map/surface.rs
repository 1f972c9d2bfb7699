//! Rendering surface abstraction
//!
//! The trait mirrors the imperative surface API one-to-one so the
//! synchronizer's behavior is observable through a recording stub in tests.

use super::plan::{CircleLayer, PopupTemplate};
use crate::types::LngLat;
use serde::{Deserialize, Serialize};

/// One point feature with display properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    /// Point coordinate
    pub location: LngLat,
    /// Circle fill color, resolved at feature build time
    pub color: String,
    /// Popup property key/value pairs, in display order
    pub properties: Vec<(String, String)>,
}

impl MapFeature {
    /// Look up a popup property by key
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A set of point features fed to one source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// The features, in display order
    pub features: Vec<MapFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<MapFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// The imperative surface the synchronizer drives
///
/// Implementations must match the real surface's semantics: `set_style`
/// discards all previously registered sources, layers, and handlers, and
/// `set_point_data` on an unregistered source is a silent no-op.
pub trait RenderSurface: Send {
    /// Begin an asynchronous style load, discarding prior registrations
    fn set_style(&mut self, style: &str);

    /// Whether a source is registered against the current style
    fn has_source(&self, id: &str) -> bool;

    /// Register a point source with initial data
    fn add_point_source(&mut self, id: &str, data: &FeatureCollection);

    /// Replace a registered source's data without recreating it
    fn set_point_data(&mut self, id: &str, data: &FeatureCollection);

    /// Whether a layer is registered against the current style
    fn has_layer(&self, id: &str) -> bool;

    /// Register a circle layer over a source
    fn add_circle_layer(&mut self, layer: &CircleLayer);

    /// Register the click→popup handler for a layer
    fn register_click_popup(&mut self, layer_id: &str, popup: &PopupTemplate);

    /// Add the terrain relief decoration
    fn add_terrain_relief(&mut self);

    /// Whether terrain relief is already present
    fn has_terrain_relief(&self) -> bool;

    /// Add the extruded buildings decoration
    fn add_building_extrusions(&mut self);

    /// Whether extruded buildings are already present
    fn has_building_extrusions(&self) -> bool;
}
