//! Map layer synchronizer integration tests
//!
//! Drives the synchronizer through the racy sequences the rendering surface
//! produces in practice: style swaps racing style-loaded notifications, and
//! data refreshes landing while a style load is in flight.

use voidhub::config::MapConfig;
use voidhub::dashboard::demand_features;
use voidhub::filter::{filter_demand, DemandFilter};
use voidhub::map::{
    stubs::RecordingSurface, FeatureCollection, LayerPlan, MapSynchronizer, RenderSurface,
    SyncState,
};
use voidhub::normalize::{normalize_demand_point, NormalizedDemandPoint};

fn demand_point(locality: &str, lat: f64, lng: f64) -> NormalizedDemandPoint {
    let raw = serde_json::json!({
        "Address of property": "1 High St",
        "Locality": locality,
        "Let Type": "Relet",
        "Major or Minor void?": "Major",
        "Tenancy end date": "2024-04-15",
        "Latitude": lat.to_string(),
        "Longitude": lng.to_string()
    });
    normalize_demand_point(raw.as_object().unwrap())
}

fn historic_sync() -> MapSynchronizer<RecordingSurface> {
    MapSynchronizer::new(
        RecordingSurface::new(),
        LayerPlan::historic_demand(&MapConfig::default()),
    )
}

#[test]
fn test_two_style_changes_before_first_load_leave_one_epoch() {
    let mut sync = historic_sync();
    sync.initialize();
    sync.set_style("mapbox://styles/mapbox/dark-v10");
    // Only the latest style's load notification arrives
    sync.style_loaded();

    assert_eq!(sync.state(), SyncState::Ready);
    let surface = sync.surface();
    assert_eq!(surface.style(), Some("mapbox://styles/mapbox/dark-v10"));
    // Exactly one source/layer pair and exactly one click handler
    assert_eq!(surface.source_add_count("historicDemand"), 1);
    assert!(surface.has_layer("demand-points"));
    assert_eq!(surface.click_handler_count("demand-points"), 1);
}

#[test]
fn test_refresh_during_style_load_replays_once_ready() {
    let cache = vec![
        demand_point("WOE", 51.45, -2.58),
        demand_point("Glouc", 51.86, -2.24),
    ];
    let features = demand_features(&filter_demand(&cache, &DemandFilter::default()));

    let mut sync = historic_sync();
    sync.initialize();
    sync.update_data(features);
    // Deferred: the surface has no source to receive the data yet
    assert!(!sync.surface().has_source("historicDemand"));

    sync.style_loaded();
    let data = sync.surface().source_data("historicDemand").unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.features[0].property("locality"), Some("WOE"));
    assert_eq!(data.features[0].color, "#1d4ed8");
}

#[test]
fn test_data_only_update_when_ready() {
    let cache = vec![demand_point("WOE", 51.45, -2.58)];
    let mut sync = historic_sync();
    sync.initialize();
    sync.style_loaded();

    sync.update_data(demand_features(&cache.iter().collect::<Vec<_>>()));
    sync.update_data(FeatureCollection::default());

    // Both refreshes applied in place; the source was created exactly once
    assert_eq!(sync.surface().source_add_count("historicDemand"), 1);
    assert!(sync.surface().source_data("historicDemand").unwrap().is_empty());
}

#[test]
fn test_style_swap_recreates_layers_with_current_data() {
    let cache = vec![demand_point("Central", 52.0, -2.0)];
    let mut sync = historic_sync();
    sync.initialize();
    sync.style_loaded();
    sync.update_data(demand_features(&cache.iter().collect::<Vec<_>>()));

    sync.set_style("mapbox://styles/mapbox/satellite-v9");
    // The swap wiped the surface; nothing may be patched incrementally
    assert!(!sync.surface().has_source("historicDemand"));
    assert!(!sync.surface().has_terrain_relief());

    sync.style_loaded();
    assert_eq!(sync.state(), SyncState::Ready);
    assert_eq!(sync.surface().source_data("historicDemand").unwrap().len(), 1);
    assert_eq!(sync.surface().click_handler_count("demand-points"), 1);
    assert!(sync.surface().has_terrain_relief());
    assert!(sync.surface().has_building_extrusions());
}

#[test]
fn test_live_plan_runs_without_decorations() {
    let mut sync = MapSynchronizer::new(
        RecordingSurface::new(),
        LayerPlan::live_submissions(&MapConfig::default()),
    );
    sync.initialize();
    sync.style_loaded();

    assert_eq!(sync.surface().style(), Some("mapbox://styles/mapbox/light-v10"));
    assert!(sync.surface().has_source("liveDemand"));
    assert!(sync.surface().has_layer("live-demand-points"));
    assert!(!sync.surface().has_terrain_relief());
    assert!(!sync.surface().has_building_extrusions());
}
