//! Crossing Simulation Library
//!
//! A discrete-time grid simulation of vehicles crossing a single
//! signalised intersection, with terminal renderers for the driver.

pub mod render;
pub mod simulation;
