//! Return trip: goal corner back to the origin.
//!
//! Plans the cheapest provable route over current knowledge and walks
//! it, replanning whenever a walk invalidates what the plan assumed.
//! Knowledge only ever tightens, so each replan works with at least as
//! much information and the loop makes progress. When no route can be
//! proven at all the robot falls back to a boundary sweep: climb to
//! the top wall, then zig-zag along the grid edges until it stumbles
//! onto home.

use log::{debug, warn};

use crate::core::{Direction, SegmentState, Turn};
use crate::error::{NavError, Result};
use crate::mission::MissionController;
use crate::motion::Actuator;
use crate::search::{plan_return, Path};
use crate::sensing::RangeSensor;

impl<L: RangeSensor + Actuator> MissionController<L> {
    /// Drive from the current tile back to the origin corner.
    ///
    /// Returns true when home is reached; the flag also covers the
    /// fallback sweep, which only terminates at home.
    pub(crate) fn return_home(&mut self) -> Result<bool> {
        let home = self.config.origin();
        loop {
            if self.cell() == home {
                return Ok(true);
            }

            let outcome =
                plan_return(&self.grid, self.cell(), self.motion.facing(), home)?;
            self.stats.plans += 1;

            let Some(route) = outcome.route else {
                warn!("no provable route home; sweeping the boundary");
                self.stats.fallback_used = true;
                self.boundary_sweep_home()?;
                return Ok(true);
            };
            debug!(
                "following route home: {} tiles, cost {}",
                route.len(),
                route.cost()
            );
            if !self.follow_route(&route)? {
                debug!("route invalidated at ({}, {}); replanning", self.cell().row, self.cell().col);
            }
        }
    }

    /// Walk a planned route step by step.
    ///
    /// Returns false when the walk has to stop early: either the next
    /// segment is no longer known passable, or the scan after a step
    /// changed a segment beside the tile just entered. The caller
    /// replans from wherever the walk ended.
    fn follow_route(&mut self, route: &Path) -> Result<bool> {
        for step in &route.steps()[1..] {
            let dir = step.entered;
            if self.cell().neighbor(dir) != step.cell {
                return Err(NavError::Logic(format!(
                    "route step ({}, {}) is not adjacent to ({}, {}) via {:?}",
                    step.cell.row,
                    step.cell.col,
                    self.cell().row,
                    self.cell().col,
                    dir
                )));
            }
            if self.beside(dir) != SegmentState::Unblocked {
                return Ok(false);
            }
            self.motion.turn_to_face(&mut self.link, dir);
            let outcome = self.advance()?;
            if outcome.knowledge_changed {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Last-resort path home when planning proves nothing: climb to the
    /// top wall, then alternate edge-hugging sweeps between the left
    /// column and the top row until home is underfoot.
    fn boundary_sweep_home(&mut self) -> Result<()> {
        let home = self.config.origin();
        let rows = self.config.rows as i32;
        let cols = self.config.cols as i32;

        self.motion.turn_to_face(&mut self.link, Direction::Up);
        while self.open(Direction::Up) {
            self.advance()?;
        }

        while self.cell() != home {
            self.motion.turn_to_face(&mut self.link, Direction::Left);
            self.wall_hug_until(Turn::Right, move |c| {
                let cell = c.cell();
                cell.col == 0 || cell.row == rows - 1
            })?;
            self.motion.turn_to_face(&mut self.link, Direction::Right);
            self.wall_hug_until(Turn::Left, move |c| {
                let cell = c.cell();
                cell.col == cols - 1 || cell.row == 0
            })?;
        }
        Ok(())
    }
}
