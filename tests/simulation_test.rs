use std::fs;
use std::process::{Command, Output};

fn run_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crossing_sim"))
        .args(args)
        .env("RUST_LOG", "warn,crossing_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs headless without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_sim(&["--no-render", "--ticks", "20"]);

    assert!(
        output.status.success(),
        "Simulation failed to run headless. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="), "stdout: {}", stdout);
    assert!(stdout.contains("Tick: 20"), "stdout: {}", stdout);
    assert!(stdout.contains("Average speed:"), "stdout: {}", stdout);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Simulation complete after 20 ticks"),
        "stderr: {}",
        stderr
    );
}

/// Test that the list renderer prints one block per tick
#[test]
fn test_list_rendering() {
    let output = run_sim(&["--list", "--ticks", "3", "--delay-ms", "0"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Tick 1 |"));
    assert!(stdout.contains("Tick 3 |"));
    assert!(!stdout.contains("Tick 4 |"));
}

/// Test that a report is written with the run's metrics and timeline
#[test]
fn test_report_written() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let report_path = dir.path().join("nested").join("report.json");
    let report_arg = report_path.to_string_lossy().to_string();

    let output = run_sim(&[
        "--no-render",
        "--ticks",
        "12",
        "--random-vehicles",
        "5",
        "--seed",
        "11",
        "--timeline",
        "--out",
        &report_arg,
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let data = fs::read_to_string(&report_path).expect("report should exist");
    let report: serde_json::Value = serde_json::from_str(&data).expect("report is JSON");
    assert_eq!(report["config_name"], "default");
    assert_eq!(report["metrics"]["ticks"], 12);
    assert_eq!(report["metrics"]["vehicles"], 5);
    assert_eq!(report["timeline"].as_array().map(|t| t.len()), Some(12));

    let speed = report["metrics"]["average_speed"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&speed));
}

/// Test that an invalid config is rejected before the run starts
#[test]
fn test_invalid_config_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config_path = dir.path().join("bad.json");
    fs::write(&config_path, r#"{ "grid": { "width": 0, "height": 10 } }"#).unwrap();

    let output = run_sim(&["--config", &config_path.to_string_lossy(), "--no-render"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("grid must have positive dimensions"),
        "stderr: {}",
        stderr
    );
}

/// Test that compare mode runs each config and prints a table
#[test]
fn test_compare_mode() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let fast = dir.path().join("fast.json");
    let slow = dir.path().join("slow.json");
    fs::write(&fast, r#"{ "name": "fast-cycle", "ticks": 30, "light": { "interval": 2 } }"#).unwrap();
    fs::write(&slow, r#"{ "name": "slow-cycle", "ticks": 30, "light": { "interval": 10 } }"#).unwrap();

    let compare = format!("{},{}", fast.display(), slow.display());
    let output = run_sim(&["--compare", &compare]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Comparison:"));
    assert!(stdout.contains("fast-cycle | 30 | 2 |"));
    assert!(stdout.contains("slow-cycle | 30 | 2 |"));
}

/// Test that compare mode needs two configs
#[test]
fn test_compare_mode_requires_two_configs() {
    let output = run_sim(&["--compare", "only-one.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("at least two config paths"));
}
