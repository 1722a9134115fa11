//! Core types for the crossing simulation
//!
//! Grid geometry, headings, and identifiers shared by every other module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a vehicle
/// Assigned in configuration order, starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub usize);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of travel. Fixed for a vehicle's lifetime.
///
/// North decreases `y` (towards the top row), East increases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    #[serde(alias = "up")]
    North,
    #[serde(alias = "down")]
    South,
    #[serde(alias = "right")]
    East,
    #[serde(alias = "left")]
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::East, Heading::West];

    /// Unit displacement `(dx, dy)` for one tick of travel
    pub fn unit_vector(self) -> (isize, isize) {
        match self {
            Heading::North => (0, -1),
            Heading::South => (0, 1),
            Heading::East => (1, 0),
            Heading::West => (-1, 0),
        }
    }

    /// True for the north/south axis, which moves on the vertical green phase
    pub fn is_vertical(self) -> bool {
        matches!(self, Heading::North | Heading::South)
    }

    /// Glyph used by the renderers
    pub fn glyph(self) -> char {
        match self {
            Heading::North => '^',
            Heading::South => 'v',
            Heading::East => '>',
            Heading::West => '<',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "north",
            Heading::South => "south",
            Heading::East => "east",
            Heading::West => "west",
        };
        f.write_str(name)
    }
}

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// The single cell where right-of-way applies
    pub fn intersection(&self) -> GridPos {
        GridPos::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The cell one unit along `heading` from `pos`, or `None` if that leaves the grid.
    pub fn neighbor(&self, pos: GridPos, heading: Heading) -> Option<GridPos> {
        let (dx, dy) = heading.unit_vector();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        let candidate = GridPos::new(x, y);
        self.contains(candidate).then_some(candidate)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(20, 10)
    }
}
