//! Mission configuration.

use crate::core::Cell;
use crate::error::{NavError, Result};
use serde::Deserialize;

/// Mission configuration, immutable for a run.
///
/// The goal tile is always the corner opposite the origin. Capability
/// flags select behavior at construction time; they are not runtime
/// mutable.
#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    /// Number of grid rows (default: 7)
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of grid columns (default: 6)
    #[serde(default = "default_cols")]
    pub cols: usize,

    #[serde(default)]
    pub capabilities: CapabilityConfig,
}

/// Sensing and memory capabilities of the robot.
#[derive(Clone, Debug, Deserialize)]
pub struct CapabilityConfig {
    /// Robot carries rear-facing range sensors (default: false)
    #[serde(default = "default_rear_sensing")]
    pub rear_sensing: bool,

    /// Robot can sense two segments out per side (default: true)
    #[serde(default = "default_long_range_sensing")]
    pub long_range_sensing: bool,

    /// Keep a per-tile visit count during the mission (default: false)
    #[serde(default = "default_track_visited")]
    pub track_visited: bool,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            rear_sensing: default_rear_sensing(),
            long_range_sensing: default_long_range_sensing(),
            track_visited: default_track_visited(),
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            capabilities: CapabilityConfig::default(),
        }
    }
}

// Default value functions
fn default_rows() -> usize {
    7
}
fn default_cols() -> usize {
    6
}
fn default_rear_sensing() -> bool {
    false
}
fn default_long_range_sensing() -> bool {
    true
}
fn default_track_visited() -> bool {
    false
}

impl MissionConfig {
    /// Reject degenerate grids. The goal must be a different tile than
    /// the origin, so both dimensions need at least two tiles.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 || self.cols < 2 {
            return Err(NavError::Config(format!(
                "grid must be at least 2x2, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// The start tile, upper-left corner.
    pub fn origin(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// The goal tile, fixed as the corner opposite the origin.
    pub fn goal(&self) -> Cell {
        Cell::new(self.rows as i32 - 1, self.cols as i32 - 1)
    }
}
