//! Sensor fusion: turning range probes into knowledge store updates.
//!
//! A scan sweeps the relative directions front, right, back (only with
//! rear sensing), left, and writes `Blocked`/`Unblocked` into the
//! segment grid. With long-range sensing the second segment out is
//! queried only after the near segment in that direction was just
//! confirmed clear; a far reading behind an untrusted near segment has
//! no line of sight and is worthless.
//!
//! Knowledge only tightens: a segment once known `Blocked` is never
//! loosened back to `Unblocked` by a later probe. A probe that would
//! loosen is counted as a refusal and dropped (the dynamic-obstacle
//! extension that would allow it is out of scope).

use log::{debug, trace};

use crate::core::{Pose, RelativeDirection, SegmentKind, SegmentState};
use crate::grid::SegmentGrid;

/// Oracle for obstacle presence, relative to the robot's facing.
///
/// `range` is 1 for the adjacent segment or 2 for the segment one tile
/// further out. Returns true when an obstacle is present. The
/// implementation may be physical range sensors or a simulated ground
/// truth; the fusion layer imposes only the near-before-far discipline.
pub trait RangeSensor {
    fn probe(&mut self, dir: RelativeDirection, range: u8) -> bool;
}

/// Sensing capabilities, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct SensorCaps {
    pub rear: bool,
    pub long_range: bool,
}

/// Outcome of one fusion sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Segments whose recorded state changed in this sweep.
    pub changed: usize,
    /// Probes dropped because recording them would have loosened a
    /// known-blocked segment.
    pub refused: usize,
}

/// Fuses range probes into the knowledge store.
#[derive(Clone, Copy, Debug)]
pub struct SensorFusion {
    caps: SensorCaps,
}

impl SensorFusion {
    pub fn new(caps: SensorCaps) -> SensorFusion {
        SensorFusion { caps }
    }

    pub fn caps(&self) -> SensorCaps {
        self.caps
    }

    /// One full sweep around the robot's current pose.
    ///
    /// Called once before any movement and once after every successful
    /// forward move. Re-running against an unchanged layout is
    /// idempotent.
    pub fn scan<S: RangeSensor>(
        &self,
        sensor: &mut S,
        grid: &mut SegmentGrid,
        pose: &Pose,
    ) -> ScanSummary {
        let mut summary = ScanSummary::default();

        for rel in RelativeDirection::ALL {
            if rel == RelativeDirection::Back && !self.caps.rear {
                continue;
            }
            let abs = pose.facing.relative(rel);

            // Boundary segments are permanently blocked; nothing to
            // sense when facing the grid edge.
            let Some((kind, row, col)) = grid.interior_segment_beside(pose.cell, abs) else {
                continue;
            };

            let near = if sensor.probe(rel, 1) {
                SegmentState::Blocked
            } else {
                SegmentState::Unblocked
            };
            record(grid, kind, row, col, near, &mut summary);

            // Far probe only behind a just-confirmed-clear near segment.
            if self.caps.long_range && grid.get(kind, row, col) == SegmentState::Unblocked {
                if let Some((fk, fr, fc)) = grid.far_segment_beside(pose.cell, abs) {
                    let far = if sensor.probe(rel, 2) {
                        SegmentState::Blocked
                    } else {
                        SegmentState::Unblocked
                    };
                    record(grid, fk, fr, fc, far, &mut summary);
                }
            }
        }

        trace!(
            "scan at ({}, {}) facing {:?}: {} changed, {} refused",
            pose.cell.row,
            pose.cell.col,
            pose.facing,
            summary.changed,
            summary.refused
        );
        summary
    }
}

fn record(
    grid: &mut SegmentGrid,
    kind: SegmentKind,
    row: i32,
    col: i32,
    sensed: SegmentState,
    summary: &mut ScanSummary,
) {
    let current = grid.get(kind, row, col);
    if current == sensed {
        return;
    }
    if current == SegmentState::Blocked && sensed == SegmentState::Unblocked {
        debug!("refusing to loosen {kind:?} segment ({row}, {col}) from Blocked");
        summary.refused += 1;
        return;
    }
    grid.set(kind, row, col, sensed);
    summary.changed += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Direction};

    /// Scripted sensor: answers from fixed tables and records the
    /// probes it receives.
    struct ScriptedSensor {
        near_blocked: [bool; 4],
        far_blocked: [bool; 4],
        probes: Vec<(RelativeDirection, u8)>,
    }

    impl ScriptedSensor {
        fn clear() -> Self {
            Self {
                near_blocked: [false; 4],
                far_blocked: [false; 4],
                probes: Vec::new(),
            }
        }
    }

    impl RangeSensor for ScriptedSensor {
        fn probe(&mut self, dir: RelativeDirection, range: u8) -> bool {
            self.probes.push((dir, range));
            match range {
                1 => self.near_blocked[dir.index()],
                _ => self.far_blocked[dir.index()],
            }
        }
    }

    fn center_pose() -> Pose {
        Pose::new(Cell::new(3, 3), Direction::Down)
    }

    #[test]
    fn test_scan_without_rear_skips_back() {
        let fusion = SensorFusion::new(SensorCaps {
            rear: false,
            long_range: false,
        });
        let mut grid = SegmentGrid::new(7, 6);
        let mut sensor = ScriptedSensor::clear();

        fusion.scan(&mut sensor, &mut grid, &center_pose());

        assert!(!sensor
            .probes
            .iter()
            .any(|&(d, _)| d == RelativeDirection::Back));
        assert_eq!(sensor.probes.len(), 3);
    }

    #[test]
    fn test_far_probe_requires_clear_near() {
        let fusion = SensorFusion::new(SensorCaps {
            rear: false,
            long_range: true,
        });
        let mut grid = SegmentGrid::new(7, 6);
        let mut sensor = ScriptedSensor::clear();
        // Front (facing Down) is blocked near; its far segment must not
        // be probed and must stay Unknown.
        sensor.near_blocked[RelativeDirection::Front.index()] = true;

        fusion.scan(&mut sensor, &mut grid, &center_pose());

        assert!(!sensor
            .probes
            .contains(&(RelativeDirection::Front, 2)));
        // Near front: horizontal (4, 3) blocked. Far front: horizontal
        // (5, 3) untouched.
        assert_eq!(
            grid.get(SegmentKind::Horizontal, 4, 3),
            SegmentState::Blocked
        );
        assert_eq!(
            grid.get(SegmentKind::Horizontal, 5, 3),
            SegmentState::Unknown
        );
        // Left (absolute Right from Down) was clear, so its far segment
        // was probed and recorded.
        assert!(sensor.probes.contains(&(RelativeDirection::Left, 2)));
        assert_eq!(
            grid.get(SegmentKind::Vertical, 3, 5),
            SegmentState::Unblocked
        );
    }

    #[test]
    fn test_scan_is_idempotent() {
        let fusion = SensorFusion::new(SensorCaps {
            rear: true,
            long_range: true,
        });
        let mut grid = SegmentGrid::new(7, 6);
        let mut sensor = ScriptedSensor::clear();
        sensor.near_blocked[RelativeDirection::Right.index()] = true;

        let pose = center_pose();
        let first = fusion.scan(&mut sensor, &mut grid, &pose);
        assert!(first.changed > 0);

        let snapshot = grid.clone();
        let second = fusion.scan(&mut sensor, &mut grid, &pose);
        assert_eq!(second.changed, 0);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_loosening_refused() {
        let fusion = SensorFusion::new(SensorCaps {
            rear: false,
            long_range: false,
        });
        let mut grid = SegmentGrid::new(7, 6);
        let pose = center_pose();

        let mut blocked = ScriptedSensor::clear();
        blocked.near_blocked[RelativeDirection::Front.index()] = true;
        fusion.scan(&mut blocked, &mut grid, &pose);
        assert_eq!(
            grid.get(SegmentKind::Horizontal, 4, 3),
            SegmentState::Blocked
        );

        // The obstacle "vanishes"; knowledge must not loosen.
        let mut clear = ScriptedSensor::clear();
        let summary = fusion.scan(&mut clear, &mut grid, &pose);
        assert_eq!(
            grid.get(SegmentKind::Horizontal, 4, 3),
            SegmentState::Blocked
        );
        assert_eq!(summary.refused, 1);
    }

    #[test]
    fn test_edge_pose_senses_only_interior() {
        let fusion = SensorFusion::new(SensorCaps {
            rear: true,
            long_range: false,
        });
        let mut grid = SegmentGrid::new(7, 6);
        let mut sensor = ScriptedSensor::clear();
        // Origin corner facing Down: Up and Left resolve to boundary.
        let pose = Pose::new(Cell::new(0, 0), Direction::Down);

        fusion.scan(&mut sensor, &mut grid, &pose);

        // Facing Down: Front = Down (interior), Left = Right-abs
        // (interior), Right = Left-abs (boundary), Back = Up (boundary).
        assert_eq!(sensor.probes.len(), 2);
        assert!(sensor.probes.contains(&(RelativeDirection::Front, 1)));
        assert!(sensor.probes.contains(&(RelativeDirection::Left, 1)));
    }
}
