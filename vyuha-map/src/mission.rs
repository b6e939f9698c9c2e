//! Mission orchestration.
//!
//! A [`MissionController`] owns the knowledge store, the sensor fusion
//! layer and the motion executor, and drives one full mission over a
//! hardware link: sense, run the outbound heuristic to the goal corner,
//! then plan and follow a route back home. The link is anything that
//! implements both [`RangeSensor`] and [`Actuator`]; production uses
//! the real robot, tests use [`crate::harness::SimRobot`].

use log::{debug, info};

use crate::config::MissionConfig;
use crate::core::{Cell, Direction, Pose, RelativeDirection, SegmentState};
use crate::error::Result;
use crate::grid::SegmentGrid;
use crate::motion::{Actuator, MotionExecutor};
use crate::sensing::{RangeSensor, ScanSummary, SensorCaps, SensorFusion};

/// What one forward step observed.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StepOutcome {
    /// The step entered the goal tile for the first time.
    pub goal_captured: bool,
    /// The scan after the step changed a segment adjacent to the
    /// entered tile. Far readings two tiles out are deliberately not
    /// counted; a route walker cares about them only once it stands
    /// next to them, where the per-step passability check applies.
    pub knowledge_changed: bool,
}

/// Per-tile visit counts, kept only when the capability is enabled.
#[derive(Clone, Debug)]
pub(crate) struct VisitLog {
    counts: Vec<u16>,
    cols: usize,
}

impl VisitLog {
    fn new(rows: usize, cols: usize) -> VisitLog {
        VisitLog {
            counts: vec![0; rows * cols],
            cols,
        }
    }

    pub fn record(&mut self, cell: Cell) {
        let idx = cell.row as usize * self.cols + cell.col as usize;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn visit_count(&self, cell: Cell) -> u16 {
        self.counts[cell.row as usize * self.cols + cell.col as usize]
    }

    pub fn tiles_visited(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Internal mission counters, folded into the final report.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MissionStats {
    pub sense_cycles: u64,
    pub plans: u64,
    pub refusals: u64,
    pub fallback_used: bool,
}

/// Summary of a completed mission.
#[derive(Clone, Debug)]
pub struct MissionReport {
    pub goal_captured: bool,
    pub returned_home: bool,
    pub moves: u64,
    pub quarter_turns: u64,
    pub sense_cycles: u64,
    pub plans: u64,
    pub fallback_used: bool,
    /// Distinct tiles entered, when visit tracking is enabled.
    pub tiles_visited: Option<usize>,
}

/// Drives one mission end to end over a sensing and actuation link.
pub struct MissionController<L> {
    pub(crate) grid: SegmentGrid,
    pub(crate) fusion: SensorFusion,
    pub(crate) motion: MotionExecutor,
    pub(crate) link: L,
    pub(crate) config: MissionConfig,
    pub(crate) visits: Option<VisitLog>,
    /// Last tile where the recovery branch fired, for stall detection.
    pub(crate) trouble_spot: Option<Cell>,
    pub(crate) stats: MissionStats,
}

impl<L: RangeSensor + Actuator> MissionController<L> {
    /// Build a controller at the origin corner, facing Down toward the
    /// goal. The knowledge store starts all-Unknown with the outer
    /// boundary Blocked.
    pub fn new(config: MissionConfig, link: L) -> Result<MissionController<L>> {
        config.validate()?;

        let grid = SegmentGrid::new(config.rows, config.cols);
        let fusion = SensorFusion::new(SensorCaps {
            rear: config.capabilities.rear_sensing,
            long_range: config.capabilities.long_range_sensing,
        });
        let motion = MotionExecutor::new(
            Pose {
                cell: config.origin(),
                facing: Direction::Down,
            },
            config.goal(),
        );
        let visits = config.capabilities.track_visited.then(|| {
            let mut log = VisitLog::new(config.rows, config.cols);
            log.record(config.origin());
            log
        });

        Ok(MissionController {
            grid,
            fusion,
            motion,
            link,
            config,
            visits,
            trouble_spot: None,
            stats: MissionStats::default(),
        })
    }

    /// Run the whole mission: initial scan, outbound drive, return
    /// trip. Returns the report even when the return trip fell back to
    /// the boundary sweep.
    pub fn run(&mut self) -> Result<MissionReport> {
        info!(
            "mission start: {}x{} grid, goal ({}, {})",
            self.config.rows,
            self.config.cols,
            self.motion.goal().row,
            self.motion.goal().col
        );

        self.sense();
        self.drive_to_goal()?;
        debug!(
            "goal captured after {} moves, {} quarter-turns",
            self.motion.moves(),
            self.motion.quarter_turns()
        );
        let returned_home = self.return_home()?;

        let report = MissionReport {
            goal_captured: self.motion.goal_reached(),
            returned_home,
            moves: self.motion.moves(),
            quarter_turns: self.motion.quarter_turns(),
            sense_cycles: self.stats.sense_cycles,
            plans: self.stats.plans,
            fallback_used: self.stats.fallback_used,
            tiles_visited: self.visits.as_ref().map(|v| v.tiles_visited()),
        };
        info!(
            "mission done: returned_home={}, {} moves, {} plans",
            report.returned_home, report.moves, report.plans
        );
        Ok(report)
    }

    /// Current knowledge store.
    pub fn grid(&self) -> &SegmentGrid {
        &self.grid
    }

    /// Current pose.
    pub fn pose(&self) -> Pose {
        self.motion.pose()
    }

    /// Visit count for a tile, when tracking is enabled.
    pub fn visit_count(&self, cell: Cell) -> Option<u16> {
        self.visits.as_ref().map(|v| v.visit_count(cell))
    }

    /// Sweep the sensors at the current pose and fold the readings
    /// into the knowledge store.
    pub(crate) fn sense(&mut self) -> ScanSummary {
        let pose = self.motion.pose();
        let summary = self.fusion.scan(&mut self.link, &mut self.grid, &pose);
        self.stats.sense_cycles += 1;
        self.stats.refusals += summary.refused as u64;
        summary
    }

    /// Move one tile forward in the current heading, then re-scan.
    ///
    /// The caller must have established that the segment ahead is known
    /// `Unblocked`; anything else is a logic error.
    pub(crate) fn advance(&mut self) -> Result<StepOutcome> {
        let goal_captured = self.motion.move_forward(&mut self.link, &self.grid)?;
        if let Some(visits) = &mut self.visits {
            visits.record(self.motion.cell());
        }
        let cell = self.motion.cell();
        let before = Direction::ALL.map(|d| self.grid.segment_beside(cell, d));
        self.sense();
        let after = Direction::ALL.map(|d| self.grid.segment_beside(cell, d));
        Ok(StepOutcome {
            goal_captured,
            knowledge_changed: before != after,
        })
    }

    pub(crate) fn cell(&self) -> Cell {
        self.motion.cell()
    }

    /// Segment state beside the current tile in an absolute direction.
    pub(crate) fn beside(&self, dir: Direction) -> SegmentState {
        self.grid.segment_beside(self.motion.cell(), dir)
    }

    /// True when the segment in `dir` is known passable.
    pub(crate) fn open(&self, dir: Direction) -> bool {
        self.beside(dir) == SegmentState::Unblocked
    }

    /// Like [`Self::open`], relative to the current heading.
    pub(crate) fn rel_open(&self, rel: RelativeDirection) -> bool {
        self.open(self.motion.facing().relative(rel))
    }
}
