//! Simulation configuration
//!
//! A [`SimConfig`] is built once (from defaults, a JSON file, or a seeded
//! scenario) and handed to the engine by value. Nothing in it changes while
//! the simulation runs.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::{Grid, GridPos, Heading};

/// Default number of ticks in a run
pub const DEFAULT_TICKS: usize = 50;
/// Default number of ticks each light phase lasts
pub const DEFAULT_LIGHT_INTERVAL: usize = 5;
/// Default pause between rendered ticks
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Rejected configuration. Raised at construction, never during a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have positive dimensions, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("light interval must be at least one tick")]
    ZeroInterval,

    #[error("vehicle {index} starts at ({x}, {y}), outside the {width}x{height} grid")]
    VehicleOutOfBounds {
        index: usize,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Initial placement of one vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
}

impl VehicleSpec {
    pub fn new(x: usize, y: usize, heading: Heading) -> Self {
        Self { x, y, heading }
    }

    pub fn position(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Ticks per phase
    pub interval: usize,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_LIGHT_INTERVAL,
        }
    }
}

/// How the driver displays each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub enabled: bool,
    pub delay_ms: u64,
    pub mode: RenderMode,
    /// Use ANSI colours in the grid view
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: DEFAULT_DELAY_MS,
            mode: RenderMode::Grid,
            color: true,
        }
    }
}

/// Full configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    pub name: String,
    pub ticks: usize,
    pub grid: Grid,
    pub light: LightConfig,
    pub vehicles: Vec<VehicleSpec>,
    pub render: RenderConfig,
    pub report_path: Option<PathBuf>,
}

/// On-disk shape. `vehicles` is optional so the default lanes can follow the grid size.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigFile {
    name: String,
    ticks: usize,
    grid: Grid,
    light: LightConfig,
    vehicles: Option<Vec<VehicleSpec>>,
    render: RenderConfig,
    report_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            ticks: DEFAULT_TICKS,
            grid: Grid::default(),
            light: LightConfig::default(),
            vehicles: None,
            render: RenderConfig::default(),
            report_path: None,
        }
    }
}

impl From<ConfigFile> for SimConfig {
    fn from(file: ConfigFile) -> Self {
        let vehicles = file
            .vehicles
            .unwrap_or_else(|| default_vehicles(&file.grid));
        Self {
            name: file.name,
            ticks: file.ticks,
            grid: file.grid,
            light: file.light,
            vehicles,
            render: file.render,
            report_path: file.report_path,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        ConfigFile::default().into()
    }
}

/// One northbound vehicle on the bottom row and one eastbound on the left edge
pub fn default_vehicles(grid: &Grid) -> Vec<VehicleSpec> {
    let center = grid.intersection();
    vec![
        VehicleSpec::new(center.x, grid.height.saturating_sub(1), Heading::North),
        VehicleSpec::new(0, center.y, Heading::East),
    ]
}

impl SimConfig {
    /// Build a config with the given grid, interval, and vehicles; everything else default
    pub fn new(grid: Grid, interval: usize, vehicles: Vec<VehicleSpec>) -> Self {
        Self {
            grid,
            light: LightConfig { interval },
            vehicles,
            ..Self::default()
        }
    }

    /// Parse a JSON document. Relative paths are left as written.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json, "<inline>".to_string())
    }

    /// Read, parse, and validate a JSON config file.
    ///
    /// A relative `report_path` is resolved against the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&data, path.display().to_string())?;
        if let Some(base_dir) = path.parent() {
            config.resolve_paths(base_dir);
        }
        Ok(config)
    }

    fn parse(json: &str, origin: String) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { origin, source })?;
        let config = SimConfig::from(file);
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        if let Some(report_path) = &self.report_path {
            if report_path.is_relative() {
                self.report_path = Some(base_dir.join(report_path));
            }
        }
    }

    /// Check the construction preconditions. Out-of-range values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Grid { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if self.light.interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for (index, spec) in self.vehicles.iter().enumerate() {
            if !self.grid.contains(spec.position()) {
                return Err(ConfigError::VehicleOutOfBounds {
                    index,
                    x: spec.x,
                    y: spec.y,
                    width,
                    height,
                });
            }
        }
        Ok(())
    }

    /// Replace the vehicle list with `count` vehicles placed on the approach
    /// roads, each heading towards the intersection. Same seed, same scenario.
    pub fn with_random_vehicles(mut self, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let center = self.grid.intersection();
        let approaches: Vec<(Heading, Range<usize>)> = Heading::ALL
            .iter()
            .map(|&heading| (heading, approach_span(&self.grid, heading)))
            .filter(|(_, span)| !span.is_empty())
            .collect();

        self.vehicles = (0..count)
            .map(|_| match approaches.choose(&mut rng) {
                Some((heading, span)) => {
                    let offset = rng.random_range(span.clone());
                    if heading.is_vertical() {
                        VehicleSpec::new(center.x, offset, *heading)
                    } else {
                        VehicleSpec::new(offset, center.y, *heading)
                    }
                }
                // No room on any approach; only the intersection cell exists.
                None => {
                    let heading = Heading::ALL.choose(&mut rng).copied().unwrap_or(Heading::North);
                    VehicleSpec::new(center.x, center.y, heading)
                }
            })
            .collect();
        self
    }
}

/// Cells along the road feeding the intersection for vehicles travelling `heading`.
/// For vertical headings the range is over `y`, otherwise over `x`.
fn approach_span(grid: &Grid, heading: Heading) -> Range<usize> {
    let center = grid.intersection();
    match heading {
        Heading::North => center.y + 1..grid.height,
        Heading::South => 0..center.y,
        Heading::East => 0..center.x,
        Heading::West => center.x + 1..grid.width,
    }
}
