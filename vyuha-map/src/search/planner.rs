//! Bounded iterative-deepening frontier search for the return trip.
//!
//! Each expansion round extends every frontier path by one tile in the
//! fixed scan order Up, Right, Down, Left, crossing only segments known
//! `Unblocked`. A transition costs the quarter-turns needed to face the
//! new heading (0-2) plus one for the move. When a round produces
//! candidates that terminate at the home tile, the cheapest of them is
//! returned; ties keep the candidate found first. After a fruitless round the
//! length bound grows by one and entries that failed to extend are
//! pruned as dead ends. The search fails only when a round changes
//! nothing at all: home is unreachable under current knowledge.

use log::{debug, trace};

use crate::core::{Cell, Direction, SegmentState};
use crate::error::Result;
use crate::grid::SegmentGrid;

use super::frontier::{Frontier, Offer, Path, PathStep};

/// Why the search gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFailure {
    /// No sequence of known-Unblocked segments connects the start tile
    /// to the home tile.
    Unreachable,
}

/// Result of one planning run, in the shape of the teacher's path
/// results: either a route or a failure reason, plus counters.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub route: Option<Path>,
    pub failure: Option<SearchFailure>,
    /// Expansion rounds executed.
    pub rounds: usize,
    /// Candidate successors examined across all rounds.
    pub expansions: usize,
}

impl SearchOutcome {
    fn found(route: Path, rounds: usize, expansions: usize) -> SearchOutcome {
        SearchOutcome {
            route: Some(route),
            failure: None,
            rounds,
            expansions,
        }
    }

    fn failed(failure: SearchFailure, rounds: usize, expansions: usize) -> SearchOutcome {
        SearchOutcome {
            route: None,
            failure: Some(failure),
            rounds,
            expansions,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }
}

/// Plan the cheapest provable route from `start` to `home` over the
/// current knowledge. `facing` is the robot's heading at `start`; the
/// first transition pays for turning away from it.
pub fn plan_return(
    grid: &SegmentGrid,
    start: Cell,
    facing: Direction,
    home: Cell,
) -> Result<SearchOutcome> {
    trace!(
        "plan_return: start=({}, {}) facing {:?}, home=({}, {})",
        start.row,
        start.col,
        facing,
        home.row,
        home.col
    );

    if start == home {
        return Ok(SearchOutcome::found(Path::seed(start, facing), 0, 0));
    }

    let mut frontier = Frontier::new();
    frontier.offer(Path::seed(start, facing));

    let mut bound = 1usize;
    let mut rounds = 0usize;
    let mut expansions = 0usize;

    loop {
        rounds += 1;
        let tips = frontier.tips();
        let mut best_home: Option<Path> = None;
        let mut mutated = false;

        for tip in &tips {
            let last = tip.terminal();
            for dir in Direction::ALL {
                if grid.segment_beside(last.cell, dir) != SegmentState::Unblocked {
                    continue;
                }
                let next = last.cell.neighbor(dir);
                if tip.visits(next) {
                    // Re-entering a tile this path already crossed can
                    // never be cheaper; discarding up front also keeps
                    // every path cycle-free.
                    continue;
                }
                expansions += 1;
                let cost = last.cost + dir.quarter_turns_from(last.entered) + 1;
                let candidate = tip.extended(PathStep {
                    cell: next,
                    entered: dir,
                    cost,
                })?;

                if next == home {
                    let better = best_home.as_ref().map_or(true, |b| cost < b.cost());
                    if better {
                        best_home = Some(candidate);
                    }
                } else if frontier.offer(candidate) != Offer::Discarded {
                    mutated = true;
                }
            }
        }

        if let Some(route) = best_home {
            debug!(
                "route home found: {} tiles, cost {}, {} rounds, {} expansions",
                route.len(),
                route.cost(),
                rounds,
                expansions
            );
            return Ok(SearchOutcome::found(route, rounds, expansions));
        }

        if !mutated {
            debug!("home unreachable under current knowledge after {rounds} rounds");
            return Ok(SearchOutcome::failed(
                SearchFailure::Unreachable,
                rounds,
                expansions,
            ));
        }

        bound += 1;
        frontier.prune_shorter_than(bound);
    }
}
