//! Fundamental grid types: directions, tiles, segments, pose.
//!
//! The grid follows the row/column convention of the competition field:
//! row 0 is the top edge, column 0 is the left edge, and `Direction::Down`
//! increases the row index. Directions are cyclic in the order
//! Up, Right, Down, Left so that relative directions compose by index
//! arithmetic modulo 4.

/// Absolute heading on the grid.
///
/// The discriminant order matters: rotating right advances the index by
/// one, and a relative direction is applied by adding indices modulo 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All headings in the fixed scan order used by the search engine.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Cyclic index, Up = 0 through Left = 3.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Heading for a cyclic index (wraps modulo 4).
    #[inline]
    pub fn from_index(index: usize) -> Direction {
        Direction::ALL[index % 4]
    }

    /// Heading after one quarter-turn to the left.
    #[inline]
    pub fn rotated_left(self) -> Direction {
        Direction::from_index(self.index() + 3)
    }

    /// Heading after one quarter-turn to the right.
    #[inline]
    pub fn rotated_right(self) -> Direction {
        Direction::from_index(self.index() + 1)
    }

    /// The reverse heading.
    #[inline]
    pub fn opposite(self) -> Direction {
        Direction::from_index(self.index() + 2)
    }

    /// Absolute heading obtained by applying a relative direction to
    /// this heading. `Front` maps to the heading itself.
    #[inline]
    pub fn relative(self, rel: RelativeDirection) -> Direction {
        Direction::from_index(self.index() + rel.index())
    }

    /// Row/column delta of one tile step in this heading.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Quarter-turns needed to face this heading when currently facing
    /// `from`: 0 for no turn, 1 for a side turn, 2 for a reversal.
    #[inline]
    pub fn quarter_turns_from(self, from: Direction) -> u32 {
        match (self.index() + 4 - from.index()) % 4 {
            0 => 0,
            2 => 2,
            _ => 1,
        }
    }
}

/// Direction relative to the robot's current facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelativeDirection {
    Front,
    Right,
    Back,
    Left,
}

impl RelativeDirection {
    /// Sensing order: front, right, back, left.
    pub const ALL: [RelativeDirection; 4] = [
        RelativeDirection::Front,
        RelativeDirection::Right,
        RelativeDirection::Back,
        RelativeDirection::Left,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            RelativeDirection::Front => 0,
            RelativeDirection::Right => 1,
            RelativeDirection::Back => 2,
            RelativeDirection::Left => 3,
        }
    }
}

/// A quarter-turn command issued to the actuator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// One tile of the grid, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// The adjacent cell one step in `dir`. No bounds checking; the
    /// grid decides validity.
    #[inline]
    pub fn neighbor(self, dir: Direction) -> Cell {
        let (dr, dc) = dir.offset();
        Cell::new(self.row + dr, self.col + dc)
    }
}

/// Knowledge about one boundary segment between two tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentState {
    /// An obstacle (or the grid boundary) sits on this segment.
    Blocked,
    /// The segment has been sensed clear.
    Unblocked,
    /// Never sensed.
    Unknown,
}

/// Which of the two segment arrays a segment belongs to.
///
/// Horizontal segments separate vertically adjacent tiles; segment
/// `(r, c)` sits between tile `(r-1, c)` and tile `(r, c)`. Vertical
/// segments separate horizontally adjacent tiles; segment `(r, c)` sits
/// between tile `(r, c-1)` and tile `(r, c)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Horizontal,
    Vertical,
}

/// The robot's position and heading. Exactly one instance exists per
/// mission; it is owned and mutated only by the motion executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pose {
    pub cell: Cell,
    pub facing: Direction,
}

impl Pose {
    #[inline]
    pub fn new(cell: Cell, facing: Direction) -> Pose {
        Pose { cell, facing }
    }
}
