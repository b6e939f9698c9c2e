//! Motion executor: the only component that changes the robot's pose.
//!
//! Turns are issued as quarter-turn actuator commands; `turn_to_face`
//! computes the minimal rotation (none, one quarter, or a reversal) so
//! the actuator never receives more than two quarter-turns per
//! re-orientation. `move_forward` requires the segment ahead to be
//! known `Unblocked`; commanding a move through anything else is a
//! logic error in the caller, reported and never retried.

use log::trace;

use crate::core::{Cell, Direction, Pose, SegmentState, Turn};
use crate::error::{NavError, Result};
use crate::grid::SegmentGrid;

/// Drive and signalling interface consumed by the executor.
///
/// `move_one_tile` must not return until physical displacement is
/// complete: sensor fusion runs immediately afterwards and assumes the
/// readings reflect the new tile's surroundings.
pub trait Actuator {
    fn turn_quarter(&mut self, turn: Turn);
    fn move_one_tile(&mut self);
    fn signal_goal_capture(&mut self);
}

/// Owns the single [`Pose`] of the mission and all pose mutation.
#[derive(Debug)]
pub struct MotionExecutor {
    pose: Pose,
    goal: Cell,
    goal_reached: bool,
    moves: u64,
    quarter_turns: u64,
}

impl MotionExecutor {
    pub fn new(start: Pose, goal: Cell) -> MotionExecutor {
        MotionExecutor {
            pose: start,
            goal,
            goal_reached: false,
            moves: 0,
            quarter_turns: 0,
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        self.pose.cell
    }

    #[inline]
    pub fn facing(&self) -> Direction {
        self.pose.facing
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// True once the goal tile has been entered at least once.
    #[inline]
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    #[inline]
    pub fn quarter_turns(&self) -> u64 {
        self.quarter_turns
    }

    pub fn turn_left<A: Actuator>(&mut self, actuator: &mut A) {
        actuator.turn_quarter(Turn::Left);
        self.pose.facing = self.pose.facing.rotated_left();
        self.quarter_turns += 1;
    }

    pub fn turn_right<A: Actuator>(&mut self, actuator: &mut A) {
        actuator.turn_quarter(Turn::Right);
        self.pose.facing = self.pose.facing.rotated_right();
        self.quarter_turns += 1;
    }

    /// Reverse heading, delivered as two quarter-turns.
    pub fn turn_180<A: Actuator>(&mut self, actuator: &mut A) {
        self.turn_left(actuator);
        self.turn_left(actuator);
    }

    /// Rotate to an absolute heading with the minimal number of turns.
    pub fn turn_to_face<A: Actuator>(&mut self, actuator: &mut A, target: Direction) {
        match (target.index() + 4 - self.pose.facing.index()) % 4 {
            0 => {}
            1 => self.turn_right(actuator),
            2 => self.turn_180(actuator),
            _ => self.turn_left(actuator),
        }
    }

    /// Advance one tile in the current heading.
    ///
    /// Precondition: the segment directly ahead is known `Unblocked` in
    /// the knowledge store. Returns true when this move entered the
    /// goal tile for the first time (goal capture is signalled exactly
    /// once).
    pub fn move_forward<A: Actuator>(
        &mut self,
        actuator: &mut A,
        grid: &SegmentGrid,
    ) -> Result<bool> {
        let ahead = grid.segment_beside(self.pose.cell, self.pose.facing);
        if ahead != SegmentState::Unblocked {
            return Err(NavError::Logic(format!(
                "move_forward from ({}, {}) facing {:?}: segment ahead is {:?}, not Unblocked",
                self.pose.cell.row, self.pose.cell.col, self.pose.facing, ahead
            )));
        }

        actuator.move_one_tile();
        self.pose.cell = self.pose.cell.neighbor(self.pose.facing);
        self.moves += 1;
        debug_assert!(grid.contains(self.pose.cell));
        trace!(
            "moved to ({}, {}) facing {:?}",
            self.pose.cell.row,
            self.pose.cell.col,
            self.pose.facing
        );

        if self.pose.cell == self.goal && !self.goal_reached {
            self.goal_reached = true;
            actuator.signal_goal_capture();
            return Ok(true);
        }
        Ok(false)
    }
}
