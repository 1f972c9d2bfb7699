//! Configuration management for the analytics hub
//!
//! TOML config files with environment variable overrides and sensible
//! defaults. Every knob a dashboard needs from outside lives here: the
//! collection names and fetch cap, the fixed summary window, the default map
//! camera and named styles, and the cost band boundaries.

use crate::error::ConfigError;
use crate::types::MonthKey;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubConfig {
    /// Document store collections and fetch limits
    #[serde(default)]
    pub store: StoreConfig,

    /// Fixed summary window for the demand table
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Map camera and styles
    #[serde(default)]
    pub map: MapConfig,

    /// Cost band boundaries
    #[serde(default)]
    pub bands: BandConfig,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Collection holding live survey submissions
    #[serde(default = "default_surveys_collection")]
    pub surveys_collection: String,

    /// Collection holding historic demand points
    #[serde(default = "default_demand_collection")]
    pub demand_collection: String,

    /// Fetch cap for the demand collection (one-shot reads only)
    #[serde(default = "default_demand_fetch_cap")]
    pub demand_fetch_cap: usize,
}

/// Fixed summary window configuration
///
/// The demand summary table always shows exactly `months` consecutive months
/// from the configured start, zero-filled, regardless of data sparsity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryConfig {
    /// First year of the window
    #[serde(default = "default_window_year")]
    pub start_year: i32,

    /// First month of the window (1-12)
    #[serde(default = "default_window_month")]
    pub start_month: u32,

    /// Number of consecutive months in the window
    #[serde(default = "default_window_months")]
    pub months: usize,
}

impl SummaryConfig {
    /// The first month bucket of the window
    ///
    /// `validate()` guarantees the month is in range, so this only returns
    /// `None` for an unvalidated config.
    pub fn start(&self) -> Option<MonthKey> {
        MonthKey::new(self.start_year, self.start_month)
    }
}

/// Map camera and style configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// Default camera center longitude
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Default camera center latitude
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Default camera zoom
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// Style applied to the historic demand map on first mount
    #[serde(default = "default_demand_style")]
    pub demand_style: String,

    /// Style applied to the live submissions map on first mount
    #[serde(default = "default_live_style")]
    pub live_style: String,

    /// Named styles offered by the style picker, `(name, url)` pairs
    #[serde(default = "default_styles")]
    pub styles: Vec<(String, String)>,
}

/// Cost band configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BandConfig {
    /// Ascending inclusive upper bounds; values above the last go to the
    /// overflow band
    #[serde(default = "default_band_boundaries")]
    pub boundaries: Vec<f64>,
}

// Default value functions
fn default_surveys_collection() -> String {
    "surveys".to_string()
}
fn default_demand_collection() -> String {
    "historicDemand".to_string()
}
fn default_demand_fetch_cap() -> usize {
    5000
}
fn default_window_year() -> i32 {
    2024
}
fn default_window_month() -> u32 {
    3
}
fn default_window_months() -> usize {
    13
}
fn default_center_lng() -> f64 {
    -1.9
}
fn default_center_lat() -> f64 {
    52.5
}
fn default_zoom() -> f64 {
    7.0
}
fn default_demand_style() -> String {
    "mapbox://styles/mapbox/streets-v11".to_string()
}
fn default_live_style() -> String {
    "mapbox://styles/mapbox/light-v10".to_string()
}
fn default_styles() -> Vec<(String, String)> {
    vec![
        (
            "Streets".to_string(),
            "mapbox://styles/mapbox/streets-v11".to_string(),
        ),
        (
            "Outdoors".to_string(),
            "mapbox://styles/mapbox/outdoors-v11".to_string(),
        ),
        (
            "Light".to_string(),
            "mapbox://styles/mapbox/light-v10".to_string(),
        ),
        (
            "Satellite".to_string(),
            "mapbox://styles/mapbox/satellite-streets-v12".to_string(),
        ),
    ]
}
fn default_band_boundaries() -> Vec<f64> {
    vec![100.0, 250.0, 500.0]
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            summary: SummaryConfig::default(),
            map: MapConfig::default(),
            bands: BandConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            surveys_collection: default_surveys_collection(),
            demand_collection: default_demand_collection(),
            demand_fetch_cap: default_demand_fetch_cap(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            start_year: default_window_year(),
            start_month: default_window_month(),
            months: default_window_months(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lng: default_center_lng(),
            center_lat: default_center_lat(),
            zoom: default_zoom(),
            demand_style: default_demand_style(),
            live_style: default_live_style(),
            styles: default_styles(),
        }
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            boundaries: default_band_boundaries(),
        }
    }
}

impl HubConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn from_file_with_env(path: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from environment variables only
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("VOIDHUB_SURVEYS_COLLECTION") {
            self.store.surveys_collection = name;
        }
        if let Ok(name) = std::env::var("VOIDHUB_DEMAND_COLLECTION") {
            self.store.demand_collection = name;
        }
        if let Ok(cap) = std::env::var("VOIDHUB_DEMAND_FETCH_CAP") {
            if let Ok(c) = cap.parse() {
                self.store.demand_fetch_cap = c;
            }
        }
        if let Ok(style) = std::env::var("VOIDHUB_DEMAND_STYLE") {
            self.map.demand_style = style;
        }
        if let Ok(style) = std::env::var("VOIDHUB_LIVE_STYLE") {
            self.map.live_style = style;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.surveys_collection.is_empty() {
            return Err(ConfigError::Invalid(
                "Surveys collection name cannot be empty".to_string(),
            ));
        }
        if self.store.demand_collection.is_empty() {
            return Err(ConfigError::Invalid(
                "Demand collection name cannot be empty".to_string(),
            ));
        }
        if self.store.demand_fetch_cap == 0 {
            return Err(ConfigError::Invalid(
                "Demand fetch cap must be > 0".to_string(),
            ));
        }
        if !(1..=12).contains(&self.summary.start_month) {
            return Err(ConfigError::Invalid(format!(
                "Summary start month {} is out of range 1-12",
                self.summary.start_month
            )));
        }
        if self.summary.months == 0 {
            return Err(ConfigError::Invalid(
                "Summary window must cover at least one month".to_string(),
            ));
        }
        if !self.map.center_lng.is_finite() || !self.map.center_lat.is_finite() {
            return Err(ConfigError::Invalid(
                "Map camera center must be finite".to_string(),
            ));
        }
        let mut prev = f64::NEG_INFINITY;
        for b in &self.bands.boundaries {
            if !b.is_finite() || *b <= prev {
                return Err(ConfigError::Invalid(
                    "Band boundaries must be finite and strictly ascending".to_string(),
                ));
            }
            prev = *b;
        }
        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        std::fs::write(path, contents).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.store.surveys_collection, "surveys");
        assert_eq!(config.store.demand_fetch_cap, 5000);
        assert_eq!(config.summary.months, 13);
        assert_eq!(config.summary.start(), MonthKey::new(2024, 3));
        assert_eq!(config.bands.boundaries, vec![100.0, 250.0, 500.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let mut config = HubConfig::default();
        config.summary.start_month = 13;
        assert!(config.validate().is_err());

        let mut config = HubConfig::default();
        config.summary.months = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unordered_bands() {
        let mut config = HubConfig::default();
        config.bands.boundaries = vec![250.0, 100.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = HubConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: HubConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.store.demand_collection, "historicDemand");
        assert_eq!(parsed.map.zoom, 7.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: HubConfig = toml::from_str(
            r#"
            [store]
            demand_fetch_cap = 100
            "#,
        )
        .unwrap();
        assert_eq!(parsed.store.demand_fetch_cap, 100);
        assert_eq!(parsed.store.surveys_collection, "surveys");
        assert_eq!(parsed.summary.months, 13);
    }
}
