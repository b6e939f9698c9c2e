//! End-to-end mission tests over simulated worlds.
//!
//! Each scenario wires a [`MissionController`] to a [`SimRobot`] in a
//! [`GridWorld`] the controller cannot see, runs the full mission, and
//! checks the report and final pose through the public API only.

use vyuha_map::core::{Cell, Direction, RelativeDirection, SegmentKind, SegmentState, Turn};
use vyuha_map::harness::{GridWorld, SimRobot};
use vyuha_map::{
    plan_return, Actuator, CapabilityConfig, MissionConfig, MissionController, RangeSensor,
    SegmentGrid, SensorCaps, SensorFusion,
};

fn config_for(world: &GridWorld) -> MissionConfig {
    MissionConfig {
        rows: world.rows(),
        cols: world.cols(),
        ..MissionConfig::default()
    }
}

#[test]
fn test_open_world_mission_completes() {
    env_logger::try_init().ok();
    let world = GridWorld::new(7, 6);
    let config = config_for(&world);
    let mut mission = MissionController::new(config, SimRobot::new(world)).unwrap();

    let report = mission.run().unwrap();
    assert!(report.goal_captured);
    assert!(report.returned_home);
    assert!(!report.fallback_used);
    assert!(report.plans >= 1);
    assert_eq!(mission.pose().cell, Cell::new(0, 0));
    // Outbound is 11 tiles minimum; the return adds at least as many.
    assert!(report.moves >= 22);
}

#[test]
fn test_walled_world_mission_completes() {
    env_logger::try_init().ok();
    // A handful of walls forcing detours on both legs.
    let mut world = GridWorld::new(7, 6);
    for col in 0..5 {
        world.block_horizontal(3, col);
    }
    world.block_vertical(5, 3);
    world.block_vertical(1, 2);
    world.block_horizontal(5, 4);

    let config = config_for(&world);
    let mut mission = MissionController::new(config, SimRobot::new(world)).unwrap();

    let report = mission.run().unwrap();
    assert!(report.goal_captured);
    assert!(report.returned_home);
    assert_eq!(mission.pose().cell, Cell::new(0, 0));
}

#[test]
fn test_visit_tracking_reports_tile_coverage() {
    let world = GridWorld::new(7, 6);
    let config = MissionConfig {
        rows: world.rows(),
        cols: world.cols(),
        capabilities: CapabilityConfig {
            track_visited: true,
            ..CapabilityConfig::default()
        },
    };
    let mut mission = MissionController::new(config, SimRobot::new(world)).unwrap();

    let report = mission.run().unwrap();
    let visited = report.tiles_visited.expect("tracking enabled");
    // At least the outbound corridor plus home, at most the whole grid.
    assert!(visited >= 12 && visited <= 42);
    assert!(mission.visit_count(Cell::new(0, 0)).unwrap() >= 2);
}

#[test]
fn test_capability_variants_still_complete() {
    for (rear, long_range) in [(true, true), (false, false), (true, false)] {
        let mut world = GridWorld::new(7, 6);
        world.block_horizontal(3, 0);
        world.block_vertical(2, 1);
        let config = MissionConfig {
            rows: world.rows(),
            cols: world.cols(),
            capabilities: CapabilityConfig {
                rear_sensing: rear,
                long_range_sensing: long_range,
                ..CapabilityConfig::default()
            },
        };
        let mut mission = MissionController::new(config, SimRobot::new(world)).unwrap();
        let report = mission.run().unwrap();
        assert!(
            report.goal_captured && report.returned_home,
            "failed with rear={rear} long_range={long_range}"
        );
    }
}

#[test]
fn test_small_grid_mission() {
    let world = GridWorld::new(2, 2);
    let config = config_for(&world);
    let mut mission = MissionController::new(config, SimRobot::new(world)).unwrap();

    let report = mission.run().unwrap();
    assert!(report.goal_captured);
    assert!(report.returned_home);
}

/// Wraps a [`SimRobot`] and drops a roamer onto the grid the moment
/// the goal is captured, so the return trip meets an obstacle the
/// outbound leg never saw.
struct ShiftyLink {
    inner: SimRobot,
    roamer: Cell,
}

impl RangeSensor for ShiftyLink {
    fn probe(&mut self, dir: RelativeDirection, range: u8) -> bool {
        self.inner.probe(dir, range)
    }
}

impl Actuator for ShiftyLink {
    fn turn_quarter(&mut self, turn: Turn) {
        self.inner.turn_quarter(turn);
    }

    fn move_one_tile(&mut self) {
        self.inner.move_one_tile();
    }

    fn signal_goal_capture(&mut self) {
        self.inner.signal_goal_capture();
        self.inner.set_roamer(Some(self.roamer));
    }
}

#[test]
fn test_obstacle_appearing_after_capture_forces_replan() {
    env_logger::try_init().ok();
    let world = GridWorld::new(7, 6);
    let config = config_for(&world);
    let link = ShiftyLink {
        inner: SimRobot::new(world),
        roamer: Cell::new(5, 1),
    };
    let mut mission = MissionController::new(config, link).unwrap();

    let report = mission.run().unwrap();
    assert!(report.goal_captured);
    assert!(report.returned_home);
    assert!(!report.fallback_used);
    assert_eq!(mission.pose().cell, Cell::new(0, 0));
    // Scans beside the roamer tighten segments along the retrace, so
    // the return trip replans at least once instead of walking blind.
    assert!(report.plans >= 2, "expected a replan, got {}", report.plans);
    assert_ne!(
        mission.grid().segment_beside(Cell::new(6, 1), Direction::Up),
        SegmentState::Unblocked
    );
}

#[test]
fn test_scan_is_idempotent_against_a_static_world() {
    let mut world = GridWorld::new(7, 6);
    world.block_horizontal(2, 0);
    world.block_vertical(0, 2);
    let mut robot = SimRobot::new(world);
    let fusion = SensorFusion::new(SensorCaps {
        rear: false,
        long_range: true,
    });
    let mut grid = SegmentGrid::new(7, 6);
    let pose = robot.pose();

    let first = fusion.scan(&mut robot, &mut grid, &pose);
    assert!(first.changed > 0);
    let second = fusion.scan(&mut robot, &mut grid, &pose);
    assert_eq!(second.changed, 0);
    assert_eq!(second.refused, 0);
}

#[test]
fn test_planner_routes_avoid_known_walls() {
    // Knowledge built by hand: everything known open except a wall
    // splitting row 1 from row 2 with a gap at the last column.
    let mut grid = SegmentGrid::new(7, 6);
    for row in 1..7 {
        for col in 0..6 {
            grid.set(SegmentKind::Horizontal, row, col, SegmentState::Unblocked);
        }
    }
    for row in 0..7 {
        for col in 1..6 {
            grid.set(SegmentKind::Vertical, row, col, SegmentState::Unblocked);
        }
    }
    for col in 0..5 {
        grid.set(SegmentKind::Horizontal, 2, col, SegmentState::Blocked);
    }

    let outcome = plan_return(&grid, Cell::new(6, 0), Direction::Up, Cell::new(0, 0)).unwrap();
    let route = outcome.route.expect("route exists through the gap");

    let steps = route.steps();
    assert_eq!(steps.first().unwrap().cell, Cell::new(6, 0));
    assert_eq!(steps.last().unwrap().cell, Cell::new(0, 0));
    for pair in steps.windows(2) {
        assert_eq!(pair[0].cell.neighbor(pair[1].entered), pair[1].cell);
        assert_eq!(
            grid.segment_beside(pair[0].cell, pair[1].entered),
            SegmentState::Unblocked
        );
        assert!(pair[1].cost > pair[0].cost);
    }
    assert!(steps.iter().any(|s| s.cell.col == 5));
}
