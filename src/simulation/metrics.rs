//! Run statistics for the crossing simulation
//!
//! Counters are accumulated by the engine every tick; [`Metrics`] is the
//! end-of-run view derived from them.

use serde::Serialize;
use std::collections::BTreeMap;

use super::types::Heading;
use super::vehicle::MoveOutcome;

/// Fraction of vehicle-ticks that produced a move. Zero when there were no vehicle-ticks.
pub fn average_speed(moves: usize, vehicles: usize, ticks: usize) -> f64 {
    let vehicle_ticks = vehicles * ticks;
    if vehicle_ticks == 0 {
        return 0.0;
    }
    moves as f64 / vehicle_ticks as f64
}

/// Running counters owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub successful_moves: usize,
    pub blocked_by_signal: usize,
    pub blocked_by_boundary: usize,
    pub intersection_crossings: usize,
}

impl Counters {
    pub fn record(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved {
                entered_intersection,
            } => {
                self.successful_moves += 1;
                if entered_intersection {
                    self.intersection_crossings += 1;
                }
            }
            MoveOutcome::BlockedBySignal => self.blocked_by_signal += 1,
            MoveOutcome::BlockedByBoundary => self.blocked_by_boundary += 1,
        }
    }
}

/// Per-heading breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadingStats {
    pub vehicles: usize,
    pub moves: usize,
    pub waits: usize,
    pub average_speed: f64,
}

/// End-of-run summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub scenario: String,
    pub ticks: usize,
    pub vehicles: usize,
    pub successful_moves: usize,
    /// `successful_moves / (vehicles * ticks)`, in `[0, 1]`
    pub average_speed: f64,
    pub blocked_by_signal: usize,
    pub blocked_by_boundary: usize,
    pub intersection_crossings: usize,
    pub per_heading: BTreeMap<Heading, HeadingStats>,
}

impl Metrics {
    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Ticks: {} | Vehicles: {} | Moves: {} | Average speed: {:.3} | Blocked (signal/boundary): {}/{} | Crossings: {}",
            self.ticks,
            self.vehicles,
            self.successful_moves,
            self.average_speed,
            self.blocked_by_signal,
            self.blocked_by_boundary,
            self.intersection_crossings
        )
    }
}
