//! Outbound drive: origin corner to goal corner.
//!
//! The heuristic is greedy toward the goal: run Down as far as known
//! passable, then Right as far as known passable, repeat. When both
//! are walled off it recovers by backtracking Up or Left toward the
//! grid center, wall-hugging around obstacles until an opening toward
//! the goal appears. A tile with all four sides known `Blocked` is a
//! dead end no amount of re-sensing can open, since knowledge never
//! loosens; that case surfaces as a logic error instead of a retry.

use log::{debug, warn};

use crate::core::{Direction, RelativeDirection, SegmentState, Turn};
use crate::error::{NavError, Result};
use crate::mission::MissionController;
use crate::motion::Actuator;
use crate::sensing::RangeSensor;

/// Where a greedy run starts: the full down-then-right sequence, or
/// just the right leg. Recovery jumps in at the right leg after it has
/// already climbed past an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GreedyEntry {
    DownThenRight,
    RightOnly,
}

impl<L: RangeSensor + Actuator> MissionController<L> {
    /// Drive from the current tile to the goal corner.
    pub(crate) fn drive_to_goal(&mut self) -> Result<()> {
        while self.cell() != self.config.goal() {
            if self.open(Direction::Down) || self.open(Direction::Right) {
                self.greedy_run(GreedyEntry::DownThenRight)?;
            } else if self.open(Direction::Up) || self.open(Direction::Left) {
                self.recover()?;
            } else {
                // No side is known passable. One more sweep resolves
                // any segment still Unknown; if nothing changes the
                // tile is boxed in by known walls, and re-sensing can
                // never reopen one.
                debug!(
                    "no known opening at ({}, {}); re-sensing",
                    self.cell().row,
                    self.cell().col
                );
                if self.sense().changed == 0 {
                    return Err(NavError::Logic(format!(
                        "boxed in at ({}, {}): all four segments known Blocked",
                        self.cell().row,
                        self.cell().col
                    )));
                }
            }
        }
        Ok(())
    }

    /// Push Down while the segment below is known passable, then push
    /// Right the same way. The caller re-dispatches afterwards, so a
    /// passage Down that opens mid-run is taken on the next pass.
    pub(crate) fn greedy_run(&mut self, entry: GreedyEntry) -> Result<()> {
        if entry == GreedyEntry::DownThenRight && self.open(Direction::Down) {
            self.motion.turn_to_face(&mut self.link, Direction::Down);
            loop {
                self.advance()?;
                if !self.open(Direction::Down) {
                    break;
                }
            }
        }
        if self.open(Direction::Right) {
            self.motion.turn_to_face(&mut self.link, Direction::Right);
            loop {
                self.advance()?;
                if !self.open(Direction::Right) {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Both goalward segments are walled off. Back out Up or Left,
    /// whichever keeps the robot closer to the grid center, hugging
    /// walls until an opening toward the goal appears.
    fn recover(&mut self) -> Result<()> {
        let here = self.cell();
        if self.trouble_spot == Some(here) {
            // TODO: pick an escape hug direction when the same trouble
            // spot repeats instead of re-running the same recovery
            warn!("recovery restarted at trouble spot ({}, {})", here.row, here.col);
        } else {
            self.trouble_spot = Some(here);
        }

        let rows = self.config.rows as i32;
        let cols = self.config.cols as i32;

        if (rows - here.row <= cols - here.col && self.open(Direction::Up))
            || self.beside(Direction::Left) == SegmentState::Blocked
        {
            // Climb until blocked above or the wall to the right ends.
            self.motion.turn_to_face(&mut self.link, Direction::Up);
            loop {
                self.advance()?;
                if !(self.open(Direction::Up)
                    && self.beside(Direction::Right) == SegmentState::Blocked)
                {
                    break;
                }
            }
            if self.open(Direction::Right) {
                return self.greedy_run(GreedyEntry::RightOnly);
            }

            if self.cell().row > 0 {
                // Hug the right wall until the top row, or an opening
                // Right in a row above where the climb stalled.
                let stall_row = self.cell().row;
                self.wall_hug_until(Turn::Right, move |c| {
                    let cell = c.cell();
                    cell.row == 0 || (cell.row < stall_row && c.open(Direction::Right))
                })?;
                if self.open(Direction::Right) {
                    return self.greedy_run(GreedyEntry::RightOnly);
                }
            }
            if self.cell().row == 0 {
                // Top row with the right still walled. Drop back down
                // along the left-hand wall until an opening Right.
                self.motion.turn_to_face(&mut self.link, Direction::Down);
                self.wall_hug_until(Turn::Left, move |c| {
                    c.cell().row == rows - 1 || c.open(Direction::Right)
                })?;
                if self.open(Direction::Right) {
                    return self.greedy_run(GreedyEntry::RightOnly);
                }
            }
        } else {
            // Mirror image: slide Left until blocked or the wall below
            // ends.
            self.motion.turn_to_face(&mut self.link, Direction::Left);
            loop {
                self.advance()?;
                if !(self.open(Direction::Left)
                    && self.beside(Direction::Down) == SegmentState::Blocked)
                {
                    break;
                }
            }
            if self.open(Direction::Down) {
                return self.greedy_run(GreedyEntry::DownThenRight);
            }

            if self.cell().col > 0 {
                let stall_col = self.cell().col;
                self.wall_hug_until(Turn::Left, move |c| {
                    let cell = c.cell();
                    cell.col == 0 || (cell.col < stall_col && c.open(Direction::Down))
                })?;
                if self.open(Direction::Down) {
                    return self.greedy_run(GreedyEntry::DownThenRight);
                }
            }
            if self.cell().col == 0 {
                self.motion.turn_to_face(&mut self.link, Direction::Right);
                self.wall_hug_until(Turn::Right, move |c| {
                    c.cell().col == cols - 1 || c.open(Direction::Down)
                })?;
                if self.open(Direction::Down) {
                    return self.greedy_run(GreedyEntry::DownThenRight);
                }
            }
        }
        Ok(())
    }

    /// Follow the wall on `side` until `stop` holds.
    ///
    /// At each tile: turn into a passage on the hugged side if one is
    /// open, otherwise turn away from a blocked front and re-evaluate
    /// before moving. Every segment around the current tile is known
    /// by the time this runs, so the checks never see `Unknown`.
    pub(crate) fn wall_hug_until(
        &mut self,
        side: Turn,
        stop: impl Fn(&Self) -> bool,
    ) -> Result<()> {
        let side_rel = match side {
            Turn::Left => RelativeDirection::Left,
            Turn::Right => RelativeDirection::Right,
        };
        while !stop(self) {
            if self.rel_open(side_rel) {
                match side {
                    Turn::Left => self.motion.turn_left(&mut self.link),
                    Turn::Right => self.motion.turn_right(&mut self.link),
                }
            } else if !self.rel_open(RelativeDirection::Front) {
                match side {
                    Turn::Left => self.motion.turn_right(&mut self.link),
                    Turn::Right => self.motion.turn_left(&mut self.link),
                }
                continue;
            }
            self.advance()?;
        }
        Ok(())
    }
}
