//! Soft steering: seek blended with repulsion and predictive sidestepping.
//!
//! Steering never hard-stops an entity. Close neighbours bend the path away
//! from them, and in predictive mode the entity also looks ahead along its
//! heading and steps to whichever side of the first obstacle is more open.
use glam::Vec3;
use ordered_float::OrderedFloat;

use super::MovementConfig;
use crate::neighbourhood::{Neighbour, Neighbourhood};
use crate::vector_math::{distance_to_segment, ground_perpendiculars, try_direction};
use crate::DISTANCE_EPSILON;

/// The moving body steering is computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringAgent {
    /// Current position.
    pub position: Vec3,
    /// Collision radius.
    pub radius: f32,
    /// Movement speed in units per second.
    pub speed: f32,
}

/// Sum of pushes away from neighbours inside the avoidance radius.
///
/// The avoidance radius is `radius_factor` times the summed radii and each
/// push is weighted linearly from one at contact to zero at that radius.
#[must_use]
pub fn repulsion(
    agent: &SteeringAgent,
    seek: Vec3,
    neighbours: &Neighbourhood<'_>,
    radius_factor: f32,
) -> Vec3 {
    neighbours
        .iter()
        .filter_map(|body| {
            let reach = (agent.radius + body.radius) * radius_factor;
            let offset = agent.position - body.position;
            let distance = offset.length();
            if distance >= reach {
                return None;
            }
            let away = try_direction(offset, DISTANCE_EPSILON)
                .or_else(|| try_direction(-seek, DISTANCE_EPSILON))?;
            Some(away * ((reach - distance) / reach))
        })
        .sum()
}

/// Nearest neighbour ahead whose body crosses the next `horizon` seconds
/// of travel along `seek`.
#[must_use]
pub fn predicted_obstacle<'a>(
    agent: &SteeringAgent,
    seek: Vec3,
    neighbours: &Neighbourhood<'a>,
    horizon: f32,
) -> Option<&'a Neighbour> {
    let future = agent.position + seek * agent.speed * horizon;
    neighbours
        .iter()
        .filter(|body| {
            (body.position - agent.position).dot(seek) > 0.0
                && distance_to_segment(body.position, agent.position, future)
                    < agent.radius + body.radius
        })
        .min_by_key(|body| OrderedFloat(body.position.distance(agent.position)))
}

/// Unit sidestep around `obstacle` toward the more open side.
///
/// Both perpendiculars of the line to the obstacle are probed one body width
/// out and the side with more clearance wins. Ties go left.
#[must_use]
pub fn avoidance_side(
    agent: &SteeringAgent,
    obstacle: &Neighbour,
    neighbours: &Neighbourhood<'_>,
) -> Vec3 {
    let [left, right] = ground_perpendiculars(obstacle.position - agent.position);
    let probe_distance = agent.radius + obstacle.radius;
    let clearance_towards = |side: Vec3| {
        neighbours.min_clearance(agent.position + side * probe_distance, agent.radius)
    };
    if clearance_towards(right) > clearance_towards(left) {
        right
    } else {
        left
    }
}

/// Direction to travel this frame, or `None` when the forces cancel out.
///
/// `seek` must be a unit vector toward the target.
#[must_use]
pub fn steering_direction(
    agent: &SteeringAgent,
    seek: Vec3,
    neighbours: &Neighbourhood<'_>,
    config: &MovementConfig,
    predictive: bool,
) -> Option<Vec3> {
    let mut combined = seek + repulsion(agent, seek, neighbours, config.avoidance_radius_factor);
    if predictive {
        if let Some(obstacle) =
            predicted_obstacle(agent, seek, neighbours, config.prediction_horizon)
        {
            combined += avoidance_side(agent, obstacle, neighbours) * config.avoidance_weight;
        }
    }
    try_direction(combined, DISTANCE_EPSILON)
}
