//! Waypoint search round a single blocker.

use glam::Vec3;
use warband::ai::{SearchPass, WaypointSearch};
use warband::neighbourhood::{Neighbour, Neighbourhood};
use warband::EntityId;

#[test]
fn forward_pass_finds_clear_detour() {
    let blocker = [Neighbour {
        id: EntityId(1),
        position: Vec3::new(2.0, 0.0, 0.0),
        radius: 1.0,
    }];
    let obstacles = Neighbourhood::from_obstacles(&blocker);
    let origin = Vec3::ZERO;
    let target = Vec3::new(4.0, 0.0, 0.0);
    let own_radius = 0.5;

    let waypoint = WaypointSearch::default().find(origin, own_radius, target, &obstacles);

    assert_eq!(waypoint.pass, SearchPass::Forward);
    assert!(obstacles.min_clearance(waypoint.position, own_radius) >= 0.5 * own_radius);
    assert!((waypoint.position - origin).dot(target - origin) >= 0.0);
}
