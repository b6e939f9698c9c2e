//! Route planning over the segment knowledge store.

mod frontier;
mod planner;

pub use frontier::{Frontier, Offer, Path, PathStep};
pub use planner::{plan_return, SearchFailure, SearchOutcome};
