//! Configuration loading and validation tests

use std::fs;

use crossing_sim::simulation::{
    ConfigError, Grid, GridPos, Heading, RenderMode, SimConfig, VehicleSpec, DEFAULT_TICKS,
};

#[test]
fn test_default_config() {
    let config = SimConfig::default();
    assert_eq!(config.name, "default");
    assert_eq!(config.ticks, DEFAULT_TICKS);
    assert_eq!(config.grid, Grid::new(20, 10));
    assert_eq!(config.light.interval, 5);
    assert_eq!(
        config.vehicles,
        vec![
            VehicleSpec::new(10, 9, Heading::North),
            VehicleSpec::new(0, 5, Heading::East),
        ]
    );
    assert!(config.render.enabled);
    assert_eq!(config.render.mode, RenderMode::Grid);
    assert!(config.report_path.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = SimConfig::from_json_str("{}").expect("empty object is valid");
    assert_eq!(config, SimConfig::default());
}

#[test]
fn test_default_vehicles_follow_grid_size() {
    let config = SimConfig::from_json_str(r#"{ "grid": { "width": 30, "height": 12 } }"#).unwrap();
    assert_eq!(
        config.vehicles,
        vec![
            VehicleSpec::new(15, 11, Heading::North),
            VehicleSpec::new(0, 6, Heading::East),
        ]
    );
}

#[test]
fn test_explicit_vehicles_and_heading_aliases() {
    let json = r#"{
        "name": "aliases",
        "ticks": 12,
        "light": { "interval": 3 },
        "vehicles": [
            { "x": 10, "y": 9, "heading": "up" },
            { "x": 0, "y": 5, "heading": "right" },
            { "x": 10, "y": 0, "heading": "south" },
            { "x": 19, "y": 5, "heading": "west" }
        ],
        "render": { "enabled": false, "mode": "list" }
    }"#;
    let config = SimConfig::from_json_str(json).unwrap();
    assert_eq!(config.name, "aliases");
    assert_eq!(config.ticks, 12);
    assert_eq!(config.light.interval, 3);
    assert_eq!(
        config.vehicles.iter().map(|v| v.heading).collect::<Vec<_>>(),
        vec![Heading::North, Heading::East, Heading::South, Heading::West]
    );
    assert!(!config.render.enabled);
    assert_eq!(config.render.mode, RenderMode::List);
    assert_eq!(config.render.delay_ms, 500);
}

#[test]
fn test_empty_vehicle_list_is_kept() {
    let config = SimConfig::from_json_str(r#"{ "vehicles": [] }"#).unwrap();
    assert!(config.vehicles.is_empty());
}

#[test]
fn test_rejects_vehicle_outside_grid() {
    let json = r#"{ "vehicles": [ { "x": 3, "y": 10, "heading": "north" } ] }"#;
    let err = SimConfig::from_json_str(json).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::VehicleOutOfBounds { index: 0, x: 3, y: 10, width: 20, height: 10 }
    ));
}

#[test]
fn test_rejects_zero_dimensions_and_interval() {
    let err = SimConfig::from_json_str(r#"{ "grid": { "width": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyGrid { width: 0, height: 10 }));

    let err = SimConfig::from_json_str(r#"{ "light": { "interval": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroInterval));
}

#[test]
fn test_rejects_malformed_json() {
    let err = SimConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));

    // Negative sizes never make it past deserialization
    let err = SimConfig::from_json_str(r#"{ "grid": { "width": -4 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));

    let err = SimConfig::from_json_str(r#"{ "vehicles": [ { "x": 1, "y": 1, "heading": "up-left" } ] }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_load_resolves_relative_report_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config_path = dir.path().join("baseline.json");
    fs::write(
        &config_path,
        r#"{ "name": "baseline", "report_path": "reports/local.json" }"#,
    )
    .unwrap();

    let config = SimConfig::load(&config_path).expect("config should load");
    assert_eq!(config.name, "baseline");
    assert_eq!(
        config.report_path,
        Some(dir.path().join("reports").join("local.json"))
    );
}

#[test]
fn test_load_keeps_absolute_report_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let absolute = dir.path().join("elsewhere.json");
    let config_path = dir.path().join("abs.json");
    let json = serde_json::json!({ "report_path": absolute }).to_string();
    fs::write(&config_path, json).unwrap();

    let config = SimConfig::load(&config_path).unwrap();
    assert_eq!(config.report_path, Some(absolute));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = SimConfig::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_random_vehicles_are_reproducible() {
    let first = SimConfig::default().with_random_vehicles(12, 99);
    let second = SimConfig::default().with_random_vehicles(12, 99);
    assert_eq!(first.vehicles.len(), 12);
    assert_eq!(first.vehicles, second.vehicles);
}

#[test]
fn test_random_vehicles_sit_on_approach_roads() {
    let config = SimConfig::default().with_random_vehicles(40, 3);
    let center = config.grid.intersection();
    assert!(config.validate().is_ok());

    for spec in &config.vehicles {
        match spec.heading {
            Heading::North => assert!(spec.x == center.x && spec.y > center.y),
            Heading::South => assert!(spec.x == center.x && spec.y < center.y),
            Heading::East => assert!(spec.y == center.y && spec.x < center.x),
            Heading::West => assert!(spec.y == center.y && spec.x > center.x),
        }
    }
}

#[test]
fn test_random_vehicles_on_single_cell_grid() {
    let config = SimConfig::new(Grid::new(1, 1), 2, vec![]).with_random_vehicles(3, 1);
    assert_eq!(config.vehicles.len(), 3);
    assert!(config
        .vehicles
        .iter()
        .all(|spec| spec.position() == GridPos::new(0, 0)));
}
