//! Vehicle movement logic for the crossing simulation

use log::trace;
use serde::Serialize;

use super::intersection::IntersectionPolicy;
use super::traffic_light::Phase;
use super::types::{Grid, GridPos, Heading, VehicleId};

/// Result of a vehicle update for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Vehicle advanced one cell
    Moved { entered_intersection: bool },
    /// Next cell is the intersection and the light is red for this heading
    BlockedBySignal,
    /// Next cell is off the grid
    BlockedByBoundary,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// A vehicle in the crossing simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: GridPos,
    pub heading: Heading,
    /// Ticks on which this vehicle changed cell
    pub moved_ticks: usize,
    /// Ticks on which this vehicle held position
    pub wait_ticks: usize,
}

impl Vehicle {
    pub fn new(id: VehicleId, position: GridPos, heading: Heading) -> Self {
        Self {
            id,
            position,
            heading,
            moved_ticks: 0,
            wait_ticks: 0,
        }
    }

    /// Attempt one cell of travel against the given phase.
    ///
    /// The caller passes the same `phase` to every vehicle in a tick.
    pub fn update(&mut self, grid: &Grid, policy: &IntersectionPolicy, phase: Phase) -> MoveOutcome {
        let outcome = match grid.neighbor(self.position, self.heading) {
            None => MoveOutcome::BlockedByBoundary,
            Some(candidate) if !policy.allows(candidate, phase, self.heading) => {
                MoveOutcome::BlockedBySignal
            }
            Some(candidate) => {
                self.position = candidate;
                MoveOutcome::Moved {
                    entered_intersection: policy.is_intersection(candidate),
                }
            }
        };

        if outcome.moved() {
            self.moved_ticks += 1;
        } else {
            self.wait_ticks += 1;
            trace!(
                "Vehicle {} heading {} held at {}: {:?}",
                self.id,
                self.heading,
                self.position,
                outcome
            );
        }

        outcome
    }
}
