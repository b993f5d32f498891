//! Ring-sampling waypoint search.
//!
//! When the straight line to a destination is blocked the chase controller
//! asks for an intermediate point instead. Candidate points are sampled on
//! shrinking rings around the origin and samples too close to an obstacle are
//! discarded. The search stops at the first ring with a valid sample and
//! takes that ring's sample nearest the destination. A forward-only pass runs
//! first and a pass allowing backward samples runs if it finds nothing.
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::neighbourhood::Neighbourhood;
use crate::numeric::sample_angle;
use crate::vector_math::{direction_or, ring_point};
use crate::{
    WAYPOINT_CLEARANCE_RATIO, WAYPOINT_INITIAL_RADIUS, WAYPOINT_MAX_ROUNDS,
    WAYPOINT_RING_SAMPLES, WAYPOINT_SHRINK_FACTOR,
};

/// Tunables for [`WaypointSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    /// Radius of the first sampling ring.
    pub initial_radius: f32,
    /// Multiplier applied to the ring radius after each round.
    pub shrink_factor: f32,
    /// Samples per ring.
    pub samples: usize,
    /// Required gap to obstacles as a fraction of the searcher's radius.
    pub clearance_ratio: f32,
    /// Hard cap on rounds per pass.
    pub max_rounds: usize,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            initial_radius: WAYPOINT_INITIAL_RADIUS,
            shrink_factor: WAYPOINT_SHRINK_FACTOR,
            samples: WAYPOINT_RING_SAMPLES,
            clearance_ratio: WAYPOINT_CLEARANCE_RATIO,
            max_rounds: WAYPOINT_MAX_ROUNDS,
        }
    }
}

/// Which stage of the search produced a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPass {
    /// Found among samples that make progress toward the destination.
    Forward,
    /// Found once backward samples were allowed.
    Backward,
    /// No sample was clear; a short step straight at the destination.
    Fallback,
}

/// Result of a waypoint search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Where to move next.
    pub position: Vec3,
    /// Stage that produced `position`.
    pub pass: SearchPass,
}

/// Ring-sampling planner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaypointSearch {
    config: WaypointConfig,
}

impl WaypointSearch {
    /// Creates a planner with `config`.
    #[must_use]
    pub const fn new(config: WaypointConfig) -> Self {
        Self { config }
    }

    /// Tunables in use.
    #[must_use]
    pub const fn config(&self) -> &WaypointConfig {
        &self.config
    }

    /// Finds an intermediate point for a body of `own_radius` at `origin`
    /// heading to `target` past `obstacles`.
    ///
    /// Always returns a point. When every sample is obstructed the result is
    /// one radius-length step toward `target`.
    #[must_use]
    pub fn find(
        &self,
        origin: Vec3,
        own_radius: f32,
        target: Vec3,
        obstacles: &Neighbourhood<'_>,
    ) -> Waypoint {
        for (allow_backward, pass) in [(false, SearchPass::Forward), (true, SearchPass::Backward)] {
            if let Some(position) = self.sweep(origin, own_radius, target, obstacles, allow_backward)
            {
                debug!("waypoint {position:?} from {pass:?} pass");
                return Waypoint { position, pass };
            }
        }
        let step = direction_or(target - origin, Vec3::ZERO) * own_radius;
        debug!("waypoint search exhausted; nudging toward {target:?}");
        Waypoint {
            position: origin + step,
            pass: SearchPass::Fallback,
        }
    }

    /// Samples shrinking rings and returns the best sample of the first ring
    /// that has any valid one.
    fn sweep(
        &self,
        origin: Vec3,
        own_radius: f32,
        target: Vec3,
        obstacles: &Neighbourhood<'_>,
        allow_backward: bool,
    ) -> Option<Vec3> {
        let forward = target - origin;
        let required = self.config.clearance_ratio * own_radius;
        let mut ring = self.config.initial_radius;
        let mut rounds = 0;
        while ring >= own_radius && rounds < self.config.max_rounds {
            let mut best: Option<(Vec3, f32)> = None;
            for index in 0..self.config.samples {
                let candidate =
                    ring_point(origin, ring, sample_angle(index, self.config.samples));
                if !allow_backward && (candidate - origin).dot(forward) < 0.0 {
                    continue;
                }
                if obstacles.min_clearance(candidate, own_radius) < required {
                    continue;
                }
                let distance = candidate.distance(target);
                if best.is_none_or(|(_, closest)| distance < closest) {
                    best = Some((candidate, distance));
                }
            }
            if let Some((candidate, _)) = best {
                return Some(candidate);
            }
            ring *= self.config.shrink_factor;
            rounds += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use crate::neighbourhood::Neighbour;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn obstacle(id: u64, position: Vec3, radius: f32) -> Neighbour {
        Neighbour {
            id: EntityId(id),
            position,
            radius,
        }
    }

    #[test]
    fn open_field_heads_straight_for_target() {
        let waypoint = WaypointSearch::default().find(
            Vec3::ZERO,
            0.5,
            Vec3::new(4.0, 0.0, 0.0),
            &Neighbourhood::empty(),
        );
        assert_eq!(waypoint.pass, SearchPass::Forward);
        assert_relative_eq!(waypoint.position.x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(waypoint.position.z, 0.0, epsilon = 1e-6);
    }

    #[rstest]
    #[case::slim(0.5)]
    #[case::bulky(1.0)]
    fn detours_round_a_blocker(#[case] own_radius: f32) {
        let bodies = [obstacle(2, Vec3::new(2.0, 0.0, 0.0), 1.0)];
        let hood = Neighbourhood::from_obstacles(&bodies);
        let waypoint =
            WaypointSearch::default().find(Vec3::ZERO, own_radius, Vec3::new(4.0, 0.0, 0.0), &hood);
        assert_eq!(waypoint.pass, SearchPass::Forward);
        assert!(hood.min_clearance(waypoint.position, own_radius) >= 0.5 * own_radius);
        assert!(waypoint.position.x >= 0.0);
        assert!(waypoint.position.z.abs() > 1.0);
    }

    #[test]
    fn stops_at_first_ring_with_a_clear_sample() {
        let bodies = [obstacle(2, Vec3::new(4.0, 0.0, 0.0), 1.0)];
        let hood = Neighbourhood::from_obstacles(&bodies);
        let search = WaypointSearch::default();
        let waypoint = search.find(Vec3::ZERO, 0.5, Vec3::new(10.0, 0.0, 0.0), &hood);

        assert_eq!(waypoint.pass, SearchPass::Forward);
        // The inner ring's (2.1, 0, 0) is nearer the target but never sampled.
        assert_relative_eq!(
            waypoint.position.length(),
            search.config().initial_radius,
            epsilon = 1e-5
        );
        assert!(waypoint.position.z.abs() > 2.0);
        assert!(hood.min_clearance(waypoint.position, 0.5) >= 0.25);
    }

    #[test]
    fn keeps_origin_height() {
        let waypoint = WaypointSearch::default().find(
            Vec3::new(0.0, 2.0, 0.0),
            0.5,
            Vec3::new(4.0, 2.0, 0.0),
            &Neighbourhood::empty(),
        );
        assert_relative_eq!(waypoint.position.y, 2.0);
    }

    #[test]
    fn boxed_in_forward_falls_back_to_backward_pass() {
        // A wall of bodies covering the whole forward half-plane.
        let bodies: Vec<_> = (0_u16..9)
            .map(|i| {
                let angle = std::f32::consts::PI * (f32::from(i) / 8.0 - 0.5);
                obstacle(u64::from(i) + 2, ring_point(Vec3::ZERO, 1.6, angle), 0.9)
            })
            .collect();
        let hood = Neighbourhood::from_obstacles(&bodies);
        let waypoint =
            WaypointSearch::default().find(Vec3::ZERO, 0.5, Vec3::new(4.0, 0.0, 0.0), &hood);
        assert_eq!(waypoint.pass, SearchPass::Backward);
        assert!(waypoint.position.x < 0.0);
    }

    #[test]
    fn surrounded_searcher_nudges_toward_target() {
        let bodies: Vec<_> = (0_u16..16)
            .map(|i| {
                let angle = std::f32::consts::TAU * f32::from(i) / 16.0;
                obstacle(u64::from(i) + 2, ring_point(Vec3::ZERO, 1.2, angle), 0.6)
            })
            .collect();
        let hood = Neighbourhood::from_obstacles(&bodies);
        let search = WaypointSearch::new(WaypointConfig {
            initial_radius: 1.0,
            ..WaypointConfig::default()
        });
        let waypoint = search.find(Vec3::ZERO, 0.5, Vec3::new(4.0, 0.0, 0.0), &hood);
        assert_eq!(waypoint.pass, SearchPass::Fallback);
        assert_relative_eq!(waypoint.position.x, 0.5);
    }

    #[test]
    fn degenerate_shrink_factor_still_terminates() {
        let search = WaypointSearch::new(WaypointConfig {
            shrink_factor: 1.0,
            ..WaypointConfig::default()
        });
        let waypoint =
            search.find(Vec3::ZERO, 0.5, Vec3::new(4.0, 0.0, 0.0), &Neighbourhood::empty());
        assert_eq!(waypoint.pass, SearchPass::Forward);
    }
}
