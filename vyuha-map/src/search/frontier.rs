//! Route and frontier types for the return-home search.
//!
//! A [`Path`] is an owned sequence of steps, each carrying the tile,
//! the heading the robot enters it with, and the cumulative motion
//! cost. The [`Frontier`] maps each terminal tile to the single
//! cheapest path currently known to end there; at most one entry per
//! terminal tile ever exists.

use std::collections::HashMap;

use crate::core::{Cell, Direction};
use crate::error::Result;

/// One step of a candidate route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub cell: Cell,
    /// Heading the robot faces when it enters this tile.
    pub entered: Direction,
    /// Motions (quarter-turns + moves) accumulated from the seed tile.
    pub cost: u32,
}

/// An owned, never-empty, never-cyclic sequence of steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// Single-tile path: the robot where it stands, cost zero.
    pub fn seed(cell: Cell, facing: Direction) -> Path {
        Path {
            steps: vec![PathStep {
                cell,
                entered: facing,
                cost: 0,
            }],
        }
    }

    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The last step. Paths are never empty by construction.
    #[inline]
    pub fn terminal(&self) -> PathStep {
        self.steps[self.steps.len() - 1]
    }

    /// Cumulative motion cost of the whole path.
    #[inline]
    pub fn cost(&self) -> u32 {
        self.terminal().cost
    }

    /// True when `cell` already appears anywhere in this path.
    pub fn visits(&self, cell: Cell) -> bool {
        self.steps.iter().any(|s| s.cell == cell)
    }

    /// A copy of this path with one more step appended. Allocation is
    /// checked so exhaustion surfaces as an error instead of aborting.
    pub fn extended(&self, step: PathStep) -> Result<Path> {
        let mut steps = Vec::new();
        steps.try_reserve_exact(self.steps.len() + 1)?;
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Ok(Path { steps })
    }
}

/// What happened to a path offered to the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    /// No entry existed for the terminal tile; the path was added.
    Inserted,
    /// A strictly costlier entry existed and was replaced.
    Replaced,
    /// An entry at most as costly already exists; the path was dropped.
    Discarded,
}

/// Best-known path per terminal tile.
#[derive(Debug, Default)]
pub struct Frontier {
    entries: HashMap<Cell, Path>,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier {
            entries: HashMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offer a candidate path, keeping the invariant that each terminal
    /// tile has exactly one entry, the cheapest seen so far.
    pub fn offer(&mut self, path: Path) -> Offer {
        let terminal = path.terminal().cell;
        match self.entries.get(&terminal) {
            None => {
                self.entries.insert(terminal, path);
                Offer::Inserted
            }
            Some(existing) if path.cost() < existing.cost() => {
                self.entries.insert(terminal, path);
                Offer::Replaced
            }
            Some(_) => Offer::Discarded,
        }
    }

    /// Snapshot of the current paths, ordered by terminal tile so that
    /// expansion rounds are deterministic.
    pub fn tips(&self) -> Vec<Path> {
        let mut tips: Vec<Path> = self.entries.values().cloned().collect();
        tips.sort_by_key(|p| {
            let t = p.terminal().cell;
            (t.row, t.col)
        });
        tips
    }

    /// Drop entries whose path length fell below the new length bound:
    /// tips that failed to extend last round are dead ends.
    pub fn prune_shorter_than(&mut self, bound: usize) {
        self.entries.retain(|_, p| p.len() >= bound);
    }

    #[cfg(test)]
    pub fn get(&self, cell: Cell) -> Option<&Path> {
        self.entries.get(&cell)
    }
}
