//! Right-of-way rules for the intersection cell
//!
//! Only entry into the intersection cell is governed by the light. A vehicle
//! already inside the cell is never held there by a phase change.

use super::traffic_light::Phase;
use super::types::{Grid, GridPos, Heading};

/// Decides whether a move into a cell is permitted under the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionPolicy {
    /// The cell at `(width / 2, height / 2)`
    pub cell: GridPos,
}

impl IntersectionPolicy {
    pub fn new(grid: &Grid) -> Self {
        Self {
            cell: grid.intersection(),
        }
    }

    /// North/south may enter on vertical green, east/west on horizontal green.
    /// Never true for both axes under the same phase.
    pub fn can_enter(phase: Phase, heading: Heading) -> bool {
        phase.is_green_for(heading)
    }

    /// Check a candidate move. Cells other than the intersection are always allowed.
    pub fn allows(&self, candidate: GridPos, phase: Phase, heading: Heading) -> bool {
        candidate != self.cell || Self::can_enter(phase, heading)
    }

    pub fn is_intersection(&self, pos: GridPos) -> bool {
        pos == self.cell
    }
}
