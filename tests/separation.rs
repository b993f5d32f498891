//! Continuous separation pulls overlapping bodies apart even when idle.

use approx::assert_relative_eq;
use rstest::rstest;
use test_utils::{gap, mob, position, registry_with, run_frames};
use warband::{MovementConfig, Role};

#[test]
fn coincident_bodies_move_apart_after_one_update() {
    let (mut registry, ids) = registry_with(
        MovementConfig::default(),
        [
            mob(Role::Enemy, 0.0, 0.0, 1.0),
            mob(Role::Enemy, 0.0, 0.0, 1.0),
        ],
    );
    assert_eq!(gap(&registry, ids[0], ids[1]), 0.0);
    run_frames(&mut registry, 1);
    assert!(gap(&registry, ids[0], ids[1]) > 0.0);
    // Older handle goes toward -X, newer toward +X.
    assert!(position(&registry, ids[0]).x < position(&registry, ids[1]).x);
}

#[rstest]
#[case::pair(&[(0.0, 0.0), (0.3, 0.0)])]
#[case::huddle(&[(0.0, 0.0), (0.1, 0.0), (0.0, 0.1), (0.05, 0.05)])]
fn idle_crowd_spreads_out(#[case] spots: &[(f32, f32)]) {
    let (mut registry, ids) = registry_with(
        MovementConfig::default(),
        spots.iter().map(|&(x, z)| mob(Role::Enemy, x, z, 0.5)),
    );
    run_frames(&mut registry, 1200);
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            assert!(gap(&registry, a, b) >= 1.0 - 1e-3);
        }
    }
}

#[test]
fn disabled_separation_leaves_overlap_alone() {
    let config = MovementConfig {
        separation_enabled: false,
        ..MovementConfig::default()
    };
    let (mut registry, ids) = registry_with(
        config,
        [
            mob(Role::Enemy, 0.0, 0.0, 0.5),
            mob(Role::Enemy, 0.3, 0.0, 0.5),
        ],
    );
    run_frames(&mut registry, 60);
    assert_relative_eq!(gap(&registry, ids[0], ids[1]), 0.3);
}
