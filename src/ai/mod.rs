//! Chase behaviour for enemies.
//!
//! A [`ChaseController`] is bound to one mobile entity. Every frame it finds
//! the nearest active party member and issues a movement intent: stop when
//! close enough, otherwise walk to an approach point just outside the
//! target's body. The controller only calls `move_to` and `stop` on its own
//! entity and never changes the registry's membership.

pub mod waypoint;

use glam::Vec3;
use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::mobile::{steering_direction, SteeringAgent};
use crate::neighbourhood::{Neighbour, Neighbourhood};
use crate::registry::Registry;
use crate::vector_math::direction_or;
use crate::{BACKOFF_RATIO, DISTANCE_EPSILON, STOP_GAP};

pub use waypoint::{SearchPass, Waypoint, WaypointConfig, WaypointSearch};

/// How the controller chooses a destination once a target is out of reach.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ChaseMode {
    /// Walk straight at the approach point.
    #[default]
    Direct,
    /// Detour through a sampled waypoint when the straight line is blocked.
    Waypoint,
    /// Follow a short carrot along the predictive steering direction.
    Steering,
}

/// Tunables for [`ChaseController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Destination strategy.
    pub mode: ChaseMode,
    /// Gap kept between the chaser's and the target's bodies.
    pub stop_gap: f32,
    /// Step back out when the target comes too close.
    pub keep_distance: bool,
    /// Fraction of the stop distance below which the chaser backs off.
    pub backoff_ratio: f32,
    /// Planner settings for [`ChaseMode::Waypoint`].
    pub waypoint: WaypointConfig,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            mode: ChaseMode::default(),
            stop_gap: STOP_GAP,
            keep_distance: false,
            backoff_ratio: BACKOFF_RATIO,
            waypoint: WaypointConfig::default(),
        }
    }
}

/// What a controller did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChaseDecision {
    /// The controlled entity is missing, not mobile or inactive.
    Inactive,
    /// No active party member to chase; motion left unchanged.
    NoTarget,
    /// Close enough to `target`; stopped.
    Holding {
        /// The chased party member.
        target: EntityId,
    },
    /// Too close to `target`; stepping back out to the stop distance.
    BackingOff {
        /// The chased party member.
        target: EntityId,
        /// Point the entity was sent to.
        destination: Vec3,
    },
    /// Moving toward `target`.
    Pursuing {
        /// The chased party member.
        target: EntityId,
        /// Point the entity was sent to.
        destination: Vec3,
    },
}

/// Position and size of the chaser or its quarry at decision time.
#[derive(Debug, Clone, Copy)]
struct Body {
    id: EntityId,
    position: Vec3,
    radius: f32,
    speed: f32,
}

/// Drives one mobile entity toward the nearest party member.
#[derive(Debug, Clone)]
pub struct ChaseController {
    entity: EntityId,
    config: ChaseConfig,
    search: WaypointSearch,
}

impl ChaseController {
    /// Binds a controller to `entity`.
    #[must_use]
    pub const fn new(entity: EntityId, config: ChaseConfig) -> Self {
        Self {
            entity,
            config,
            search: WaypointSearch::new(config.waypoint),
        }
    }

    /// The controlled entity.
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Tunables in use.
    #[must_use]
    pub const fn config(&self) -> &ChaseConfig {
        &self.config
    }

    /// Chooses a target among `party` and updates the controlled entity's
    /// movement intent.
    ///
    /// Stale handles and inactive members in `party` are skipped. On equal
    /// distances the earlier member wins.
    pub fn update(&self, registry: &mut Registry, party: &[EntityId]) -> ChaseDecision {
        let Some(own) = body_of(registry, self.entity) else {
            return ChaseDecision::Inactive;
        };
        let Some(target) = nearest(registry, own, party) else {
            return ChaseDecision::NoTarget;
        };
        let decision = self.decide(registry, own, target);
        let Some(mobile) = registry.mobile_mut(self.entity) else {
            return ChaseDecision::Inactive;
        };
        match decision {
            ChaseDecision::Holding { .. } => mobile.stop(),
            ChaseDecision::BackingOff { destination, .. }
            | ChaseDecision::Pursuing { destination, .. } => mobile.move_to(destination),
            ChaseDecision::Inactive | ChaseDecision::NoTarget => {}
        }
        decision
    }

    fn decide(&self, registry: &Registry, own: Body, target: Body) -> ChaseDecision {
        let offset = own.position - target.position;
        let distance = offset.length();
        let stop_distance = own.radius + target.radius + self.config.stop_gap;
        let away = direction_or(offset, Vec3::NEG_X);

        if distance <= stop_distance + DISTANCE_EPSILON {
            if self.config.keep_distance && distance < stop_distance * self.config.backoff_ratio {
                let destination = target.position + away * stop_distance;
                debug!("{} backing off from {}", own.id, target.id);
                return ChaseDecision::BackingOff {
                    target: target.id,
                    destination,
                };
            }
            return ChaseDecision::Holding { target: target.id };
        }

        let approach = target.position + away * stop_distance;
        let destination = match self.config.mode {
            ChaseMode::Direct => approach,
            ChaseMode::Waypoint => self.waypoint_destination(registry, own, target, approach),
            ChaseMode::Steering => {
                steering_destination(registry, own, target, approach, distance - stop_distance)
            }
        };
        ChaseDecision::Pursuing {
            target: target.id,
            destination,
        }
    }

    fn waypoint_destination(
        &self,
        registry: &Registry,
        own: Body,
        target: Body,
        approach: Vec3,
    ) -> Vec3 {
        let obstacles = obstacles_between(registry, own, target);
        let hood = Neighbourhood::from_obstacles(&obstacles);
        if !hood.segment_blocked(own.position, approach, own.radius) {
            return approach;
        }
        let waypoint = self.search.find(own.position, own.radius, approach, &hood);
        debug!(
            "{} detouring via {:?} ({:?} pass)",
            own.id, waypoint.position, waypoint.pass
        );
        waypoint.position
    }
}

fn steering_destination(
    registry: &Registry,
    own: Body,
    target: Body,
    approach: Vec3,
    remaining: f32,
) -> Vec3 {
    let obstacles = obstacles_between(registry, own, target);
    let hood = Neighbourhood::from_obstacles(&obstacles);
    let movement = registry.config();
    let seek = direction_or(approach - own.position, Vec3::ZERO);
    let agent = SteeringAgent {
        position: own.position,
        radius: own.radius,
        speed: own.speed,
    };
    let Some(direction) = steering_direction(&agent, seek, &hood, movement, true) else {
        return approach;
    };
    let reach = remaining.min(own.speed * movement.prediction_horizon);
    own.position + direction * reach
}

fn body_of(registry: &Registry, id: EntityId) -> Option<Body> {
    let mobile = registry.mobile(id).filter(|mobile| mobile.entity.active)?;
    Some(Body {
        id,
        position: mobile.position(),
        radius: mobile.radius(),
        speed: mobile.stats.movement_speed,
    })
}

fn nearest(registry: &Registry, own: Body, party: &[EntityId]) -> Option<Body> {
    party
        .iter()
        .filter(|&&id| id != own.id)
        .filter_map(|&id| body_of(registry, id))
        .min_by_key(|body| OrderedFloat(body.position.distance(own.position)))
}

/// Every active mobile except the chaser and its quarry.
fn obstacles_between(registry: &Registry, own: Body, target: Body) -> Vec<Neighbour> {
    registry
        .neighbours()
        .into_iter()
        .filter(|body| body.id != own.id && body.id != target.id)
        .collect()
}
