//! Simulation engine that ties everything together
//!
//! The engine exclusively owns the vehicles and the light. Each call to
//! [`SimEngine::step`] evaluates every vehicle against the phase the light
//! had at the start of the tick, then advances the light.

use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::config::{ConfigError, SimConfig};
use super::intersection::IntersectionPolicy;
use super::metrics::{average_speed, Counters, HeadingStats, Metrics};
use super::traffic_light::{Phase, TrafficLight};
use super::types::{Grid, GridPos, Heading, VehicleId};
use super::vehicle::Vehicle;

/// Read-only view of the engine between ticks
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub name: &'a str,
    pub grid: Grid,
    /// Ticks completed so far
    pub tick: usize,
    pub light: &'a TrafficLight,
    pub vehicles: &'a [Vehicle],
}

impl Snapshot<'_> {
    pub fn phase(&self) -> Phase {
        self.light.phase()
    }

    /// Owned copy suitable for a timeline
    pub fn to_frame(&self) -> Frame {
        Frame {
            tick: self.tick,
            phase: self.light.phase(),
            elapsed_ticks: self.light.elapsed_ticks(),
            vehicles: self
                .vehicles
                .iter()
                .map(|v| VehicleFrame {
                    id: v.id,
                    x: v.position.x,
                    y: v.position.y,
                    heading: v.heading,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleFrame {
    pub id: VehicleId,
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
}

/// State of the world after one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub tick: usize,
    pub phase: Phase,
    pub elapsed_ticks: usize,
    pub vehicles: Vec<VehicleFrame>,
}

/// The crossing simulation
#[derive(Debug, Clone)]
pub struct SimEngine {
    name: String,
    grid: Grid,
    policy: IntersectionPolicy,
    light: TrafficLight,
    vehicles: Vec<Vehicle>,
    tick: usize,
    counters: Counters,
    /// Present only when timeline capture is enabled
    timeline: Option<Vec<Frame>>,
}

impl SimEngine {
    /// Build an engine from a validated config
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let light = TrafficLight::new(config.light.interval)?;
        let policy = IntersectionPolicy::new(&config.grid);

        let mut seen = HashSet::new();
        let vehicles: Vec<Vehicle> = config
            .vehicles
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let position = spec.position();
                if !seen.insert(position) {
                    warn!("Vehicle #{} shares its start cell {} with another vehicle", index, position);
                }
                if policy.is_intersection(position) {
                    warn!("Vehicle #{} starts inside the intersection {}", index, position);
                }
                Vehicle::new(VehicleId(index), position, spec.heading)
            })
            .collect();

        info!(
            "Created simulation '{}': {}x{} grid, {} vehicles, light interval {}",
            config.name,
            config.grid.width,
            config.grid.height,
            vehicles.len(),
            light.interval()
        );

        Ok(Self {
            name: config.name,
            grid: config.grid,
            policy,
            light,
            vehicles,
            tick: 0,
            counters: Counters::default(),
            timeline: None,
        })
    }

    /// Record a frame after every tick from now on
    pub fn with_timeline(mut self) -> Self {
        self.timeline.get_or_insert_with(Vec::new);
        self
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        let phase = self.light.phase();

        for vehicle in &mut self.vehicles {
            let outcome = vehicle.update(&self.grid, &self.policy, phase);
            self.counters.record(outcome);
        }

        self.light.advance();
        self.tick += 1;

        debug!(
            "Tick {}: evaluated under {}, light now {} ({}/{}), moves so far {}",
            self.tick,
            phase,
            self.light.phase(),
            self.light.elapsed_ticks(),
            self.light.interval(),
            self.counters.successful_moves
        );

        if self.timeline.is_some() {
            let frame = self.snapshot().to_frame();
            if let Some(timeline) = &mut self.timeline {
                timeline.push(frame);
            }
        }
    }

    /// Step `ticks` times
    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            name: &self.name,
            grid: self.grid,
            tick: self.tick,
            light: &self.light,
            vehicles: &self.vehicles,
        }
    }

    pub fn metrics(&self) -> Metrics {
        let mut per_heading: BTreeMap<Heading, HeadingStats> = BTreeMap::new();
        for vehicle in &self.vehicles {
            let stats = per_heading.entry(vehicle.heading).or_default();
            stats.vehicles += 1;
            stats.moves += vehicle.moved_ticks;
            stats.waits += vehicle.wait_ticks;
        }
        for stats in per_heading.values_mut() {
            stats.average_speed = average_speed(stats.moves, stats.vehicles, self.tick);
        }

        Metrics {
            scenario: self.name.clone(),
            ticks: self.tick,
            vehicles: self.vehicles.len(),
            successful_moves: self.counters.successful_moves,
            average_speed: average_speed(
                self.counters.successful_moves,
                self.vehicles.len(),
                self.tick,
            ),
            blocked_by_signal: self.counters.blocked_by_signal,
            blocked_by_boundary: self.counters.blocked_by_boundary,
            intersection_crossings: self.counters.intersection_crossings,
            per_heading,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn intersection(&self) -> GridPos {
        self.policy.cell
    }

    pub fn light(&self) -> &TrafficLight {
        &self.light
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Ticks completed so far
    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn timeline(&self) -> &[Frame] {
        self.timeline.as_deref().unwrap_or_default()
    }

    /// Hand the captured frames to the caller, leaving capture enabled
    pub fn take_timeline(&mut self) -> Vec<Frame> {
        self.timeline.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Crossing Simulation Summary ===");
        println!("Scenario: {}", self.name);
        println!("Tick: {}", self.tick);
        println!(
            "Grid: {}x{}, intersection at {}",
            self.grid.width, self.grid.height, self.policy.cell
        );
        println!(
            "Light: {} ({} of {} ticks elapsed)",
            self.light.phase(),
            self.light.elapsed_ticks(),
            self.light.interval()
        );
        println!("Vehicles: {}", self.vehicles.len());
        for vehicle in &self.vehicles {
            println!(
                "  Vehicle {}: heading={}, position={}, moved={}, waited={}",
                vehicle.id, vehicle.heading, vehicle.position, vehicle.moved_ticks, vehicle.wait_ticks
            );
        }
        println!();
    }
}
