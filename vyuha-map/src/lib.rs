//! # Vyuha-Map: Grid Maze Navigation Library
//!
//! Navigation stack for a robot crossing a walled grid it cannot see
//! in advance. The robot only learns the maze through short-range
//! probes around its current tile, accumulates that knowledge in a
//! tri-state segment store, and drives two legs: a greedy outbound
//! run to the far corner, and a planned return trip home.
//!
//! ## Quick Start
//!
//! ```rust
//! use vyuha_map::harness::{GridWorld, SimRobot};
//! use vyuha_map::{MissionConfig, MissionController};
//!
//! let config = MissionConfig::default();
//! let robot = SimRobot::new(GridWorld::new(config.rows, config.cols));
//! let mut mission = MissionController::new(config, robot)?;
//! let report = mission.run()?;
//! assert!(report.goal_captured && report.returned_home);
//! # Ok::<(), vyuha_map::NavError>(())
//! ```
//!
//! ## Coordinate Frame
//!
//! Tiles are addressed `(row, col)` with the origin at the top-left
//! corner. Row numbers grow downward, column numbers grow rightward,
//! so `Direction::Down` is `(+1, 0)` and `Direction::Right` is
//! `(0, +1)`. The goal corner is always `(rows - 1, cols - 1)`.
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types (Cell, Direction, Pose, SegmentState)
//! - [`config`]: Mission and capability configuration
//! - [`grid`]: The tri-state segment knowledge store
//! - [`sensing`]: Sensor fusion from range probes into the store
//! - [`motion`]: Turn and move execution over an actuator link
//! - [`search`]: Bounded iterative-deepening route planning
//! - [`mission`]: End-to-end mission orchestration
//! - [`harness`]: Simulated world and robot for tests
//!
//! The outbound and homing drive loops live in [`mission`]'s
//! controller; the hardware seam is the pair of traits
//! [`RangeSensor`] and [`Actuator`], implemented by the real robot
//! link in production and by [`harness::SimRobot`] here.

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod harness;
pub mod mission;
pub mod motion;
mod homing;
mod outbound;
pub mod search;
pub mod sensing;

// Re-export main types at crate root
pub use config::{CapabilityConfig, MissionConfig};
pub use error::{NavError, Result};
pub use grid::SegmentGrid;
pub use mission::{MissionController, MissionReport};

// Re-export the hardware seam traits
pub use motion::Actuator;
pub use sensing::{RangeSensor, ScanSummary, SensorCaps, SensorFusion};

// Re-export planning types
pub use search::{plan_return, Path, SearchFailure, SearchOutcome};
