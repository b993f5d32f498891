//! Mobile entities: movement intent and the per-frame movement update.
//!
//! A [`MobileEntity`] is either idle or seeking a target. Each frame it steps
//! toward the target at its movement speed and resolves the step against its
//! neighbours with the configured [`CollisionPolicy`]. It then applies a weak
//! separation nudge so bodies never stay stuck inside each other.
//!
//! `dt` must be finite and non-negative. The frame driver guarantees this.
//! Other values give undefined positions.

mod collision;
mod separation;
pub mod steering;

use glam::Vec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{Entity, EntityState, Role};
use crate::neighbourhood::Neighbourhood;
use crate::{
    ARRIVAL_EPSILON, AVOIDANCE_RADIUS_FACTOR, AVOIDANCE_WEIGHT, DEFAULT_ATTACK_SPEED,
    DEFAULT_MOVEMENT_SPEED, DEFAULT_POOL, PREDICTION_HORIZON, SEPARATION_DISTANCE_FACTOR,
    SEPARATION_SPEED, SLIDE_FRICTION,
};

use collision::Resolution;
pub use separation::separation_force;
pub use steering::{steering_direction, SteeringAgent};

/// Errors raised when constructing a mobile entity.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MobileError {
    /// Collision radii must be finite and strictly positive.
    #[error("collision radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
}

/// How a seeking entity's step is resolved against its neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CollisionPolicy {
    /// Stop touching the first neighbour the step would overlap.
    #[default]
    Clamp,
    /// Slide along every overlapped neighbour, losing some speed to friction.
    Slide,
    /// Blend seeking with repulsion and never hard-stop.
    ///
    /// Steering never ends a move by itself. When repulsion exactly cancels
    /// the seek, as with a neighbour sitting on the entity's own centre, the
    /// entity holds still while still seeking. Separation or a new command
    /// has to free it.
    Steering {
        /// Also look ahead along the path and sidestep predicted obstacles.
        #[serde(default = "predictive_by_default")]
        predictive: bool,
    },
}

const fn predictive_by_default() -> bool {
    true
}

/// Tunables for the movement update, shared by every mobile in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Collision resolution applied to seeking entities.
    pub policy: CollisionPolicy,
    /// Remaining distance at which an entity snaps onto its target.
    pub arrival_epsilon: f32,
    /// Tangential movement kept by [`CollisionPolicy::Slide`].
    pub slide_friction: f32,
    /// Whether the continuous separation nudge runs.
    pub separation_enabled: bool,
    /// Separation acts below this multiple of the summed radii.
    pub separation_distance_factor: f32,
    /// Speed of the separation nudge in units per second.
    pub separation_speed: f32,
    /// Steering repulsion reaches this multiple of the summed radii.
    pub avoidance_radius_factor: f32,
    /// Strength of the predictive sidestep.
    pub avoidance_weight: f32,
    /// Look-ahead of predictive steering in seconds.
    pub prediction_horizon: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            policy: CollisionPolicy::default(),
            arrival_epsilon: ARRIVAL_EPSILON,
            slide_friction: SLIDE_FRICTION,
            separation_enabled: true,
            separation_distance_factor: SEPARATION_DISTANCE_FACTOR,
            separation_speed: SEPARATION_SPEED,
            avoidance_radius_factor: AVOIDANCE_RADIUS_FACTOR,
            avoidance_weight: AVOIDANCE_WEIGHT,
            prediction_horizon: PREDICTION_HORIZON,
        }
    }
}

impl MovementConfig {
    /// Returns a copy using `policy`.
    #[must_use]
    pub const fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Character statistics. Only `movement_speed` affects movement today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    /// Current health.
    pub health: f32,
    /// Health cap.
    pub max_health: f32,
    /// Current energy.
    pub energy: f32,
    /// Energy cap.
    pub max_energy: f32,
    /// Units per second.
    pub movement_speed: f32,
    /// Attacks per second.
    pub attack_speed: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: DEFAULT_POOL,
            max_health: DEFAULT_POOL,
            energy: DEFAULT_POOL,
            max_energy: DEFAULT_POOL,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            attack_speed: DEFAULT_ATTACK_SPEED,
        }
    }
}

/// Movement state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum Motion {
    /// Standing still.
    #[default]
    Idle,
    /// Walking toward `target`.
    Seeking {
        /// Destination of the current move.
        target: Vec3,
    },
}

/// An entity that can walk to a target under collision constraints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MobileEntity {
    /// Transform, colour and activity flag.
    pub entity: Entity,
    /// Party member or enemy.
    pub role: Role,
    /// Character statistics.
    pub stats: Stats,
    /// Lifecycle marker. Never changed by movement.
    pub state: EntityState,
    radius: f32,
    motion: Motion,
}

impl MobileEntity {
    /// Creates an idle mobile entity.
    ///
    /// # Errors
    /// Returns [`MobileError::InvalidRadius`] unless `radius` is finite and
    /// greater than zero.
    pub fn new(role: Role, position: Vec3, radius: f32) -> Result<Self, MobileError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MobileError::InvalidRadius(radius));
        }
        Ok(Self {
            entity: Entity::new(position),
            role,
            stats: Stats::default(),
            state: EntityState::Alive,
            radius,
            motion: Motion::Idle,
        })
    }

    /// Sets the movement speed in units per second.
    #[must_use]
    pub const fn with_speed(mut self, movement_speed: f32) -> Self {
        self.stats.movement_speed = movement_speed;
        self
    }

    /// Sets the display colour.
    #[must_use]
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.entity = self.entity.with_color(color);
        self
    }

    /// Collision radius. Always positive.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Current world-space position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.entity.position
    }

    /// Current movement state.
    #[must_use]
    pub const fn motion(&self) -> Motion {
        self.motion
    }

    /// Whether the entity is seeking a target.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Seeking { .. })
    }

    /// Target of the current move, if seeking.
    #[must_use]
    pub const fn target(&self) -> Option<Vec3> {
        match self.motion {
            Motion::Seeking { target } => Some(target),
            Motion::Idle => None,
        }
    }

    /// Starts seeking `target`, replacing any previous move.
    ///
    /// Non-finite targets are ignored.
    pub fn move_to(&mut self, target: Vec3) {
        if !target.is_finite() {
            warn!("ignoring non-finite move target {target:?}");
            return;
        }
        self.motion = Motion::Seeking { target };
    }

    /// Abandons the current move. Does nothing when already idle.
    pub fn stop(&mut self) {
        self.motion = Motion::Idle;
    }

    /// Advances the entity by `dt` seconds.
    ///
    /// Seeking entities step toward their target and resolve the step against
    /// `neighbours`. Every entity, seeking or not, then receives the
    /// separation nudge when it is enabled.
    pub fn update(&mut self, dt: f32, neighbours: &Neighbourhood<'_>, config: &MovementConfig) {
        let heading = self.advance(dt, neighbours, config);
        if config.separation_enabled {
            let push = separation_force(
                self.entity.position,
                self.radius,
                heading,
                neighbours,
                config.separation_distance_factor,
            );
            self.entity.position += push * config.separation_speed * dt;
        }
    }

    /// Performs the seek step and returns the heading used this frame.
    fn advance(&mut self, dt: f32, neighbours: &Neighbourhood<'_>, config: &MovementConfig) -> Vec3 {
        let Motion::Seeking { target } = self.motion else {
            return Vec3::ZERO;
        };
        let start = self.entity.position;
        let to_target = target - start;
        let remaining = to_target.length();
        if remaining <= config.arrival_epsilon {
            self.arrive(target);
            return Vec3::ZERO;
        }

        let heading = to_target / remaining;
        let step = (self.stats.movement_speed * dt).min(remaining);
        let desired = start + heading * step;
        let resolution = match config.policy {
            CollisionPolicy::Clamp => {
                collision::clamp(start, desired, self.radius, heading, neighbours)
            }
            CollisionPolicy::Slide => collision::slide(
                start,
                desired,
                self.radius,
                heading,
                neighbours,
                config.slide_friction,
            ),
            CollisionPolicy::Steering { predictive } => {
                let agent = SteeringAgent {
                    position: start,
                    radius: self.radius,
                    speed: self.stats.movement_speed,
                };
                let direction =
                    steering_direction(&agent, heading, neighbours, config, predictive);
                Resolution::free(direction.map_or(start, |d| start + d * step))
            }
        };

        self.entity.position = resolution.position;
        if resolution.blocked {
            debug!(
                "{:?} blocked at {:?} short of {target:?}",
                self.role, self.entity.position
            );
            self.motion = Motion::Idle;
        } else if self.entity.position.distance(target) <= config.arrival_epsilon {
            self.arrive(target);
        }
        heading
    }

    fn arrive(&mut self, target: Vec3) {
        self.entity.position = target;
        self.motion = Motion::Idle;
    }
}
