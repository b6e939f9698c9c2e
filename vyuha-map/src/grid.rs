//! Segment knowledge store.
//!
//! Two rectangular arrays of tri-state segments hold everything the
//! robot knows about boundaries: a `(rows+1) x cols` array of
//! horizontal segments and a `rows x (cols+1)` array of vertical
//! segments. At mission start every segment is `Unknown` except the
//! outer boundary, which is permanently `Blocked`.
//!
//! `get`/`set` are the only access paths and they are bounds-checked;
//! an out-of-range index is a programming error in the caller and
//! panics rather than returning a recoverable error.

use crate::core::{Cell, Direction, SegmentKind, SegmentState};

/// Tri-state segment memory for a fixed-size grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentGrid {
    rows: usize,
    cols: usize,
    /// Row-major, (rows + 1) x cols.
    horizontal: Vec<SegmentState>,
    /// Row-major, rows x (cols + 1).
    vertical: Vec<SegmentState>,
}

impl SegmentGrid {
    /// Create a grid with every interior segment `Unknown` and the
    /// outer boundary `Blocked`.
    pub fn new(rows: usize, cols: usize) -> SegmentGrid {
        let mut grid = SegmentGrid {
            rows,
            cols,
            horizontal: vec![SegmentState::Unknown; (rows + 1) * cols],
            vertical: vec![SegmentState::Unknown; rows * (cols + 1)],
        };
        for col in 0..cols {
            let top = grid.h_index(0, col);
            let bottom = grid.h_index(rows, col);
            grid.horizontal[top] = SegmentState::Blocked;
            grid.horizontal[bottom] = SegmentState::Blocked;
        }
        for row in 0..rows {
            let left = grid.v_index(row, 0);
            let right = grid.v_index(row, cols);
            grid.vertical[left] = SegmentState::Blocked;
            grid.vertical[right] = SegmentState::Blocked;
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn h_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn v_index(&self, row: usize, col: usize) -> usize {
        row * (self.cols + 1) + col
    }

    fn checked_index(&self, kind: SegmentKind, row: i32, col: i32) -> usize {
        let (max_row, max_col) = match kind {
            SegmentKind::Horizontal => (self.rows as i32, self.cols as i32 - 1),
            SegmentKind::Vertical => (self.rows as i32 - 1, self.cols as i32),
        };
        assert!(
            row >= 0 && row <= max_row && col >= 0 && col <= max_col,
            "{kind:?} segment ({row}, {col}) out of range for {}x{} grid",
            self.rows,
            self.cols
        );
        match kind {
            SegmentKind::Horizontal => self.h_index(row as usize, col as usize),
            SegmentKind::Vertical => self.v_index(row as usize, col as usize),
        }
    }

    /// Read one segment. Panics on an out-of-range index.
    pub fn get(&self, kind: SegmentKind, row: i32, col: i32) -> SegmentState {
        let idx = self.checked_index(kind, row, col);
        match kind {
            SegmentKind::Horizontal => self.horizontal[idx],
            SegmentKind::Vertical => self.vertical[idx],
        }
    }

    /// Write one segment. Panics on an out-of-range index.
    pub fn set(&mut self, kind: SegmentKind, row: i32, col: i32, state: SegmentState) {
        let idx = self.checked_index(kind, row, col);
        match kind {
            SegmentKind::Horizontal => self.horizontal[idx] = state,
            SegmentKind::Vertical => self.vertical[idx] = state,
        }
    }

    /// True when `cell` is a valid tile of this grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && (cell.row as usize) < self.rows
            && cell.col >= 0
            && (cell.col as usize) < self.cols
    }

    /// Segment-array coordinates of the segment adjacent to `cell` in
    /// absolute direction `dir`. Valid for every in-bounds cell: edge
    /// cells resolve to boundary segments.
    pub fn segment_coords(cell: Cell, dir: Direction) -> (SegmentKind, i32, i32) {
        match dir {
            Direction::Up => (SegmentKind::Horizontal, cell.row, cell.col),
            Direction::Down => (SegmentKind::Horizontal, cell.row + 1, cell.col),
            Direction::Left => (SegmentKind::Vertical, cell.row, cell.col),
            Direction::Right => (SegmentKind::Vertical, cell.row, cell.col + 1),
        }
    }

    /// State of the segment adjacent to `cell` in direction `dir`.
    pub fn segment_beside(&self, cell: Cell, dir: Direction) -> SegmentState {
        let (kind, row, col) = Self::segment_coords(cell, dir);
        self.get(kind, row, col)
    }

    /// Coordinates of the adjacent segment, or `None` when it is part
    /// of the outer boundary (nothing to sense there).
    pub fn interior_segment_beside(
        &self,
        cell: Cell,
        dir: Direction,
    ) -> Option<(SegmentKind, i32, i32)> {
        let at_edge = match dir {
            Direction::Up => cell.row == 0,
            Direction::Down => cell.row == self.rows as i32 - 1,
            Direction::Left => cell.col == 0,
            Direction::Right => cell.col == self.cols as i32 - 1,
        };
        if at_edge {
            None
        } else {
            Some(Self::segment_coords(cell, dir))
        }
    }

    /// Coordinates of the segment two tiles out in direction `dir`, or
    /// `None` when no interior segment exists that far out.
    pub fn far_segment_beside(
        &self,
        cell: Cell,
        dir: Direction,
    ) -> Option<(SegmentKind, i32, i32)> {
        match dir {
            Direction::Up if cell.row >= 2 => {
                Some((SegmentKind::Horizontal, cell.row - 1, cell.col))
            }
            Direction::Down if cell.row <= self.rows as i32 - 3 => {
                Some((SegmentKind::Horizontal, cell.row + 2, cell.col))
            }
            Direction::Left if cell.col >= 2 => {
                Some((SegmentKind::Vertical, cell.row, cell.col - 1))
            }
            Direction::Right if cell.col <= self.cols as i32 - 3 => {
                Some((SegmentKind::Vertical, cell.row, cell.col + 2))
            }
            _ => None,
        }
    }

    /// True when the segment beside `cell` in `dir` is known clear.
    #[inline]
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        self.segment_beside(cell, dir) == SegmentState::Unblocked
    }
}
