//! Simulated grid and robot for tests and dry runs.
//!
//! [`GridWorld`] holds the physical layout the robot cannot see
//! directly. [`SimRobot`] tracks its own pose, answers range probes
//! against the layout, and executes motion commands. A roamer tile can
//! stand in for another robot on the grid; probes report it the same
//! way they report a wall.

use crate::core::{Cell, Direction, Pose, RelativeDirection, Turn};
use crate::motion::Actuator;
use crate::sensing::RangeSensor;

/// Physical obstacle layout. Segments are blocked or free; the outer
/// boundary is always blocked.
#[derive(Clone, Debug)]
pub struct GridWorld {
    rows: usize,
    cols: usize,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl GridWorld {
    /// An unobstructed world of the given size.
    pub fn new(rows: usize, cols: usize) -> GridWorld {
        let mut world = GridWorld {
            rows,
            cols,
            horizontal: vec![false; (rows + 1) * cols],
            vertical: vec![false; rows * (cols + 1)],
        };
        for col in 0..cols {
            world.horizontal[col] = true;
            world.horizontal[rows * cols + col] = true;
        }
        for row in 0..rows {
            world.vertical[row * (cols + 1)] = true;
            world.vertical[row * (cols + 1) + cols] = true;
        }
        world
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Place a wall on the horizontal segment above row `row` at
    /// column `col`.
    pub fn block_horizontal(&mut self, row: usize, col: usize) {
        assert!(row <= self.rows && col < self.cols, "segment out of range");
        self.horizontal[row * self.cols + col] = true;
    }

    /// Place a wall on the vertical segment left of column `col` at
    /// row `row`.
    pub fn block_vertical(&mut self, row: usize, col: usize) {
        assert!(row < self.rows && col <= self.cols, "segment out of range");
        self.vertical[row * (self.cols + 1) + col] = true;
    }

    fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Whether the segment beside `cell` in `dir` is physically
    /// blocked. Anything outside the grid reads as blocked.
    pub fn blocked_beside(&self, cell: Cell, dir: Direction) -> bool {
        if !self.contains(cell) {
            return true;
        }
        let (row, col) = (cell.row as usize, cell.col as usize);
        match dir {
            Direction::Up => self.horizontal[row * self.cols + col],
            Direction::Down => self.horizontal[(row + 1) * self.cols + col],
            Direction::Left => self.vertical[row * (self.cols + 1) + col],
            Direction::Right => self.vertical[row * (self.cols + 1) + col + 1],
        }
    }
}

/// Simulated robot wired to a [`GridWorld`].
#[derive(Clone, Debug)]
pub struct SimRobot {
    world: GridWorld,
    pose: Pose,
    roamer: Option<Cell>,
    goal_captures: u32,
}

impl SimRobot {
    /// A robot at the origin corner facing Down, matching the mission
    /// start pose.
    pub fn new(world: GridWorld) -> SimRobot {
        SimRobot {
            world,
            pose: Pose {
                cell: Cell::new(0, 0),
                facing: Direction::Down,
            },
            roamer: None,
            goal_captures: 0,
        }
    }

    pub fn with_roamer(mut self, cell: Cell) -> SimRobot {
        self.roamer = Some(cell);
        self
    }

    /// Move or remove the roamer between probes.
    pub fn set_roamer(&mut self, roamer: Option<Cell>) {
        self.roamer = roamer;
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn goal_captures(&self) -> u32 {
        self.goal_captures
    }

    fn occupied(&self, cell: Cell) -> bool {
        self.roamer == Some(cell)
    }
}

impl RangeSensor for SimRobot {
    fn probe(&mut self, dir: RelativeDirection, range: u8) -> bool {
        let abs = self.pose.facing.relative(dir);
        let near = self.pose.cell.neighbor(abs);
        match range {
            1 => self.world.blocked_beside(self.pose.cell, abs) || self.occupied(near),
            2 => {
                self.world.blocked_beside(near, abs) || self.occupied(near.neighbor(abs))
            }
            _ => true,
        }
    }
}

impl Actuator for SimRobot {
    fn turn_quarter(&mut self, turn: Turn) {
        self.pose.facing = match turn {
            Turn::Left => self.pose.facing.rotated_left(),
            Turn::Right => self.pose.facing.rotated_right(),
        };
    }

    fn move_one_tile(&mut self) {
        debug_assert!(
            !self.world.blocked_beside(self.pose.cell, self.pose.facing),
            "drove into a wall at ({}, {})",
            self.pose.cell.row,
            self.pose.cell.col
        );
        self.pose.cell = self.pose.cell.neighbor(self.pose.facing);
    }

    fn signal_goal_capture(&mut self) {
        self.goal_captures += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_blocked() {
        let world = GridWorld::new(7, 6);
        assert!(world.blocked_beside(Cell::new(0, 0), Direction::Up));
        assert!(world.blocked_beside(Cell::new(0, 0), Direction::Left));
        assert!(!world.blocked_beside(Cell::new(0, 0), Direction::Down));
        assert!(world.blocked_beside(Cell::new(6, 5), Direction::Down));
        assert!(world.blocked_beside(Cell::new(6, 5), Direction::Right));
    }

    #[test]
    fn test_blocked_segments_read_from_both_sides() {
        let mut world = GridWorld::new(7, 6);
        world.block_horizontal(3, 2);
        assert!(world.blocked_beside(Cell::new(2, 2), Direction::Down));
        assert!(world.blocked_beside(Cell::new(3, 2), Direction::Up));

        world.block_vertical(4, 3);
        assert!(world.blocked_beside(Cell::new(4, 2), Direction::Right));
        assert!(world.blocked_beside(Cell::new(4, 3), Direction::Left));
    }

    #[test]
    fn test_probe_sees_walls_relative_to_heading() {
        let mut world = GridWorld::new(7, 6);
        world.block_horizontal(1, 0);
        let mut robot = SimRobot::new(world);
        // Facing Down at the origin: the wall below is dead ahead.
        assert!(robot.probe(RelativeDirection::Front, 1));
        // Abs Right is relative Left.
        assert!(!robot.probe(RelativeDirection::Left, 1));
    }

    #[test]
    fn test_long_probe_reaches_two_segments_out() {
        let mut world = GridWorld::new(7, 6);
        world.block_horizontal(2, 0);
        let mut robot = SimRobot::new(world);
        assert!(!robot.probe(RelativeDirection::Front, 1));
        assert!(robot.probe(RelativeDirection::Front, 2));
    }

    #[test]
    fn test_roamer_reads_as_a_block() {
        let world = GridWorld::new(7, 6);
        let mut robot = SimRobot::new(world).with_roamer(Cell::new(1, 0));
        assert!(robot.probe(RelativeDirection::Front, 1));
        robot.set_roamer(Some(Cell::new(2, 0)));
        assert!(!robot.probe(RelativeDirection::Front, 1));
        assert!(robot.probe(RelativeDirection::Front, 2));
    }

    #[test]
    fn test_actuation_tracks_pose() {
        let world = GridWorld::new(7, 6);
        let mut robot = SimRobot::new(world);
        robot.move_one_tile();
        assert_eq!(robot.pose().cell, Cell::new(1, 0));
        robot.turn_quarter(Turn::Left);
        assert_eq!(robot.pose().facing, Direction::Right);
        robot.turn_quarter(Turn::Right);
        robot.turn_quarter(Turn::Right);
        assert_eq!(robot.pose().facing, Direction::Left);
    }
}
