use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossing_sim::render::{GridRenderer, ListRenderer, Renderer};
use crossing_sim::simulation::{write_report, RenderMode, Report, SimConfig, SimEngine};

#[derive(Parser)]
#[command(name = "crossing_sim")]
#[command(about = "Grid simulation of vehicles crossing a signalised intersection")]
struct Cli {
    /// Path to a simulation config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run (overrides the config)
    #[arg(long)]
    ticks: Option<usize>,

    /// Pause between rendered ticks in milliseconds (overrides the config)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Disable per-tick rendering
    #[arg(long)]
    no_render: bool,

    /// Print a vehicle list each tick instead of the grid
    #[arg(long)]
    list: bool,

    /// Replace the configured vehicles with this many seeded random placements
    #[arg(long)]
    random_vehicles: Option<usize>,

    /// Seed for --random-vehicles
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Include a per-tick timeline in the report
    #[arg(long)]
    timeline: bool,

    /// Report output path (overrides the config)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Comma-separated config paths to run headless and compare
    #[arg(long, value_delimiter = ',')]
    compare: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if !cli.compare.is_empty() {
        return run_compare(&cli.compare);
    }

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.render.delay_ms = delay_ms;
    }
    if cli.no_render {
        config.render.enabled = false;
    }
    if cli.list {
        config.render.mode = RenderMode::List;
    }
    if let Some(count) = cli.random_vehicles {
        config = config.with_random_vehicles(count, cli.seed);
    }
    if let Some(out) = cli.out.clone() {
        config.report_path = Some(out);
    }

    run(config, cli.timeline)
}

/// Run one scenario through the driver loop
fn run(config: SimConfig, capture_timeline: bool) -> Result<()> {
    let ticks = config.ticks;
    let render = config.render;
    let report_path = config.report_path.clone();

    let mut engine = SimEngine::new(config).context("Invalid simulation config")?;
    if capture_timeline {
        engine = engine.with_timeline();
    }

    let mut renderer: Option<Box<dyn Renderer>> = match (render.enabled, render.mode) {
        (false, _) => None,
        (true, RenderMode::Grid) => {
            let grid = GridRenderer::new(io::stdout()).with_color(render.color);
            Some(Box::new(grid) as Box<dyn Renderer>)
        }
        (true, RenderMode::List) => Some(Box::new(ListRenderer::new(io::stdout())) as Box<dyn Renderer>),
    };

    info!("Running {} ticks", ticks);
    for tick in 0..ticks {
        engine.step();
        if let Some(renderer) = renderer.as_mut() {
            renderer.render(&engine.snapshot())?;
            if render.delay_ms > 0 && tick + 1 < ticks {
                std::thread::sleep(Duration::from_millis(render.delay_ms));
            }
        }
    }

    println!("=== Final State ===");
    engine.print_summary();
    let report = Report::from_engine(&mut engine);
    print_metrics(&report);
    info!("Simulation complete after {} ticks", engine.tick());

    if let Some(path) = report_path {
        write_report(&path, &report)?;
        println!();
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn print_metrics(report: &Report) {
    let metrics = &report.metrics;
    println!("Scenario: {}", metrics.scenario);
    println!("{}", metrics.summary());
    for (heading, stats) in &metrics.per_heading {
        println!(
            "  {} -> vehicles={} moves={} waits={} avg_speed={:.3}",
            heading, stats.vehicles, stats.moves, stats.waits, stats.average_speed
        );
    }
}

fn run_compare(paths: &[PathBuf]) -> Result<()> {
    if paths.len() < 2 {
        bail!("Compare mode requires at least two config paths");
    }

    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let config = SimConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let ticks = config.ticks;
        let report_path = config.report_path.clone();
        let mut engine = SimEngine::new(config)?;
        engine.run(ticks);
        let report = Report::from_engine(&mut engine);
        if let Some(report_path) = report_path {
            write_report(&report_path, &report)?;
        }
        reports.push(report);
    }

    println!("Comparison:");
    println!("Scenario | Ticks | Vehicles | Avg Speed | Blocked (signal) | Crossings");
    for report in &reports {
        let m = &report.metrics;
        println!(
            "{} | {} | {} | {:.3} | {} | {}",
            m.scenario, m.ticks, m.vehicles, m.average_speed, m.blocked_by_signal, m.intersection_crossings
        );
    }
    Ok(())
}
