//! JSON run reports

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::engine::{Frame, SimEngine};
use super::metrics::Metrics;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub config_name: String,
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<Frame>,
}

impl Report {
    /// Collect metrics and any captured timeline from a finished run
    pub fn from_engine(engine: &mut SimEngine) -> Self {
        Self {
            config_name: engine.name().to_string(),
            metrics: engine.metrics(),
            timeline: engine.take_timeline(),
        }
    }
}

/// Write `report` as pretty JSON, creating parent directories as needed
pub fn write_report(path: impl AsRef<Path>, report: &Report) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    }

    let data = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, data)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(())
}
