//! Timed traffic light for the crossing
//!
//! The light owns its phase and countdown. It only ever changes through
//! [`TrafficLight::advance`], once per tick.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::ConfigError;
use super::types::Heading;

/// Which axis currently holds right-of-way at the intersection cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// North/south traffic may enter
    VerticalGreen,
    /// East/west traffic may enter
    HorizontalGreen,
}

impl Phase {
    pub fn flipped(self) -> Self {
        match self {
            Phase::VerticalGreen => Phase::HorizontalGreen,
            Phase::HorizontalGreen => Phase::VerticalGreen,
        }
    }

    pub fn is_vertical_green(self) -> bool {
        self == Phase::VerticalGreen
    }

    /// True when traffic travelling along `heading` holds the green
    pub fn is_green_for(self, heading: Heading) -> bool {
        heading.is_vertical() == self.is_vertical_green()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::VerticalGreen => f.write_str("VERTICAL GREEN"),
            Phase::HorizontalGreen => f.write_str("HORIZONTAL GREEN"),
        }
    }
}

/// A two-phase light that flips every `interval` ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficLight {
    phase: Phase,
    /// Ticks spent in the current phase. Always `< interval` after `advance`.
    elapsed_ticks: usize,
    interval: usize,
}

impl TrafficLight {
    /// Create a light in `VerticalGreen` with its timer at zero.
    /// An interval of zero is rejected.
    pub fn new(interval: usize) -> Result<Self, ConfigError> {
        if interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self {
            phase: Phase::VerticalGreen,
            elapsed_ticks: 0,
            interval,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_vertical_green(&self) -> bool {
        self.phase.is_vertical_green()
    }

    pub fn elapsed_ticks(&self) -> usize {
        self.elapsed_ticks
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Ticks left before the next flip
    pub fn remaining_ticks(&self) -> usize {
        self.interval - self.elapsed_ticks
    }

    /// Advance the timer by one tick, flipping the phase when the interval is reached.
    /// Returns true if the phase flipped.
    pub fn advance(&mut self) -> bool {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.interval {
            self.phase = self.phase.flipped();
            self.elapsed_ticks = 0;
            debug!("Light flipped to {}", self.phase);
            return true;
        }
        false
    }
}
