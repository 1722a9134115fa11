//! Crossing simulation core
//!
//! World state, the per-tick update rule, and the light's state machine.
//! Nothing here performs terminal I/O except [`SimEngine::print_summary`].

mod config;
mod engine;
mod intersection;
mod metrics;
mod report;
mod traffic_light;
mod types;
mod vehicle;

pub use config::{
    default_vehicles, ConfigError, LightConfig, RenderConfig, RenderMode, SimConfig, VehicleSpec,
    DEFAULT_DELAY_MS, DEFAULT_LIGHT_INTERVAL, DEFAULT_TICKS,
};
pub use engine::{Frame, SimEngine, Snapshot, VehicleFrame};
pub use intersection::IntersectionPolicy;
pub use metrics::{average_speed, Counters, HeadingStats, Metrics};
pub use report::{write_report, Report};
pub use traffic_light::{Phase, TrafficLight};
pub use types::{Grid, GridPos, Heading, VehicleId};
pub use vehicle::{MoveOutcome, Vehicle};
