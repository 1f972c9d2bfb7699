//! Recording surface for tests
//!
//! [`RecordingSurface`] implements [`RenderSurface`] with the real surface's
//! semantics: a style swap discards every registration, and setting data on
//! an unregistered source is a silent no-op. It additionally keeps lifetime
//! counters so tests can assert how often something was (re)created, not
//! just what exists now.

use super::plan::{CircleLayer, PopupTemplate};
use super::surface::{FeatureCollection, RenderSurface};
use std::collections::HashMap;

/// In-memory surface that records every registration
#[derive(Debug, Default)]
pub struct RecordingSurface {
    style: Option<String>,
    sources: HashMap<String, FeatureCollection>,
    layers: HashMap<String, CircleLayer>,
    click_handlers: Vec<String>,
    terrain: bool,
    buildings: bool,
    /// Lifetime add_point_source calls per id, never reset by style swaps
    source_adds: HashMap<String, usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently requested style
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Data currently held by a source
    pub fn source_data(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    /// Lifetime count of `add_point_source` calls for an id
    pub fn source_add_count(&self, id: &str) -> usize {
        self.source_adds.get(id).copied().unwrap_or(0)
    }

    /// Click handlers currently registered for a layer
    pub fn click_handler_count(&self, layer_id: &str) -> usize {
        self.click_handlers.iter().filter(|l| *l == layer_id).count()
    }
}

impl RenderSurface for RecordingSurface {
    fn set_style(&mut self, style: &str) {
        // A style swap throws away everything registered against the old one
        self.style = Some(style.to_string());
        self.sources.clear();
        self.layers.clear();
        self.click_handlers.clear();
        self.terrain = false;
        self.buildings = false;
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_point_source(&mut self, id: &str, data: &FeatureCollection) {
        self.sources.insert(id.to_string(), data.clone());
        *self.source_adds.entry(id.to_string()).or_insert(0) += 1;
    }

    fn set_point_data(&mut self, id: &str, data: &FeatureCollection) {
        // Silent no-op on an unregistered source, like the real surface
        if let Some(existing) = self.sources.get_mut(id) {
            *existing = data.clone();
        }
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.contains_key(id)
    }

    fn add_circle_layer(&mut self, layer: &CircleLayer) {
        self.layers.insert(layer.id.clone(), layer.clone());
    }

    fn register_click_popup(&mut self, layer_id: &str, _popup: &PopupTemplate) {
        self.click_handlers.push(layer_id.to_string());
    }

    fn add_terrain_relief(&mut self) {
        self.terrain = true;
    }

    fn has_terrain_relief(&self) -> bool {
        self.terrain
    }

    fn add_building_extrusions(&mut self) {
        self.buildings = true;
    }

    fn has_building_extrusions(&self) -> bool {
        self.buildings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_swap_discards_registrations() {
        let mut surface = RecordingSurface::new();
        surface.add_point_source("s", &FeatureCollection::default());
        surface.add_terrain_relief();
        surface.set_style("a");
        assert!(!surface.has_source("s"));
        assert!(!surface.has_terrain_relief());
        assert_eq!(surface.source_add_count("s"), 1);
    }

    #[test]
    fn test_set_data_on_missing_source_is_a_no_op() {
        let mut surface = RecordingSurface::new();
        surface.set_point_data("absent", &FeatureCollection::default());
        assert!(!surface.has_source("absent"));
    }
}
