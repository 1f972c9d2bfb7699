//! Layer plans
//!
//! A plan bundles everything the synchronizer needs to rebuild a style epoch
//! from scratch: source and layer identity, circle paint values, popup
//! layout, and whether the decorative terrain/buildings layers apply. The
//! two dashboards each have a fixed plan.

use super::surface::MapFeature;
use crate::config::MapConfig;
use serde::{Deserialize, Serialize};

/// Circle layer registration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleLayer {
    /// Layer id
    pub id: String,
    /// Source the layer draws from
    pub source: String,
    /// Circle radius in pixels
    pub radius: f64,
    /// Circle opacity
    pub opacity: f64,
}

/// Fixed-field popup layout
///
/// The heading and each line resolve against feature properties by key; a
/// missing key renders as an empty value, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupTemplate {
    /// Property key rendered as the bold heading
    pub heading_key: String,
    /// `(label, property key)` pairs, in display order
    pub lines: Vec<(String, String)>,
}

impl PopupTemplate {
    fn new(heading_key: &str, lines: &[(&str, &str)]) -> Self {
        Self {
            heading_key: heading_key.to_string(),
            lines: lines
                .iter()
                .map(|(label, key)| (label.to_string(), key.to_string()))
                .collect(),
        }
    }

    /// Resolve the layout against one feature's properties
    ///
    /// Returns the heading value and the `(label, value)` lines in display
    /// order; a missing key renders as an empty value.
    pub fn render(&self, feature: &MapFeature) -> (String, Vec<(String, String)>) {
        let value = |key: &str| feature.property(key).unwrap_or("").to_string();
        (
            value(&self.heading_key),
            self.lines
                .iter()
                .map(|(label, key)| (label.clone(), value(key)))
                .collect(),
        )
    }
}

/// Everything needed to rebuild one map's layers after a style load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPlan {
    /// Point source id
    pub source_id: String,
    /// Circle layer definition
    pub layer: CircleLayer,
    /// Style applied on first mount
    pub initial_style: String,
    /// Click→popup layout for the circle layer
    pub popup: PopupTemplate,
    /// Whether terrain relief and extruded buildings are added per epoch
    pub decorations: bool,
}

impl LayerPlan {
    /// Plan for the historic demand map
    pub fn historic_demand(config: &MapConfig) -> Self {
        Self {
            source_id: "historicDemand".to_string(),
            layer: CircleLayer {
                id: "demand-points".to_string(),
                source: "historicDemand".to_string(),
                radius: 5.0,
                opacity: 0.7,
            },
            initial_style: config.demand_style.clone(),
            popup: PopupTemplate::new(
                "address",
                &[
                    ("Postcode", "postcode"),
                    ("Let Type", "let_type"),
                    ("Local Authority", "local_authority"),
                    ("Void Type", "void_type"),
                    ("Locality", "locality"),
                    ("Est. Tenancy End", "tenancy_end"),
                ],
            ),
            decorations: true,
        }
    }

    /// Plan for the live submissions map
    pub fn live_submissions(config: &MapConfig) -> Self {
        Self {
            source_id: "liveDemand".to_string(),
            layer: CircleLayer {
                id: "live-demand-points".to_string(),
                source: "liveDemand".to_string(),
                radius: 6.0,
                opacity: 0.6,
            },
            initial_style: config.live_style.clone(),
            popup: PopupTemplate::new(
                "address",
                &[
                    ("Surveyor", "surveyor"),
                    ("Visit Type", "visit_type"),
                    ("Void Type", "void_type"),
                    ("Void Time", "void_time"),
                    ("Total Cost", "total_cost"),
                ],
            ),
            decorations: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plans_use_distinct_ids() {
        let config = MapConfig::default();
        let historic = LayerPlan::historic_demand(&config);
        let live = LayerPlan::live_submissions(&config);
        assert_ne!(historic.source_id, live.source_id);
        assert_ne!(historic.layer.id, live.layer.id);
        assert_eq!(historic.layer.source, historic.source_id);
        assert_eq!(live.layer.source, live.source_id);
    }

    #[test]
    fn test_popup_render_leaves_missing_keys_empty() {
        let popup = PopupTemplate::new("address", &[("Locality", "locality"), ("Postcode", "postcode")]);
        let feature = MapFeature {
            location: crate::types::LngLat::new(-2.58, 51.45).unwrap(),
            color: "#1d4ed8".to_string(),
            properties: vec![
                ("address".to_string(), "1 High St".to_string()),
                ("locality".to_string(), "WOE".to_string()),
            ],
        };
        let (heading, lines) = popup.render(&feature);
        assert_eq!(heading, "1 High St");
        assert_eq!(lines[0], ("Locality".to_string(), "WOE".to_string()));
        // No postcode property on the feature
        assert_eq!(lines[1], ("Postcode".to_string(), String::new()));
    }

    #[test]
    fn test_only_historic_plan_carries_decorations() {
        let config = MapConfig::default();
        assert!(LayerPlan::historic_demand(&config).decorations);
        assert!(!LayerPlan::live_submissions(&config).decorations);
    }
}
