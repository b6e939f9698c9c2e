//! Configuration loading for VyuhaNav

use crate::error::{Result, VyuhaError};
use serde::Deserialize;
use std::path::Path;
use vyuha_map::harness::GridWorld;
use vyuha_map::MissionConfig;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub mission: MissionConfig,

    #[serde(default)]
    pub world: WorldConfig,
}

/// Simulated obstacle layout, as `[row, col]` segment coordinates.
///
/// A horizontal segment `[r, c]` sits above row `r` at column `c`; a
/// vertical segment `[r, c]` sits left of column `c` at row `r`. The
/// outer boundary is always walled and does not need listing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub blocked_horizontal: Vec<[usize; 2]>,

    #[serde(default)]
    pub blocked_vertical: Vec<[usize; 2]>,
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<NavConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: NavConfig = toml::from_str(&content)?;
        config.mission.validate()?;
        Ok(config)
    }

    /// Build the simulated world this configuration describes.
    pub fn build_world(&self) -> Result<GridWorld> {
        let (rows, cols) = (self.mission.rows, self.mission.cols);
        let mut world = GridWorld::new(rows, cols);
        for &[row, col] in &self.world.blocked_horizontal {
            if row == 0 || row >= rows || col >= cols {
                return Err(VyuhaError::Config(format!(
                    "horizontal segment [{row}, {col}] outside a {rows}x{cols} grid"
                )));
            }
            world.block_horizontal(row, col);
        }
        for &[row, col] in &self.world.blocked_vertical {
            if row >= rows || col == 0 || col >= cols {
                return Err(VyuhaError::Config(format!(
                    "vertical segment [{row}, {col}] outside a {rows}x{cols} grid"
                )));
            }
            world.block_vertical(row, col);
        }
        Ok(world)
    }
}
