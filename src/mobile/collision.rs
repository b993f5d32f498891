//! Hard collision resolution for a single movement step.
use glam::Vec3;

use crate::neighbourhood::Neighbourhood;
use crate::vector_math::{direction_or, distance_to_segment, segment_entry};
use crate::DISTANCE_EPSILON;

/// Outcome of resolving one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Resolution {
    /// Where the entity ends the step.
    pub position: Vec3,
    /// The step was cut short and the move should end.
    pub blocked: bool,
}

impl Resolution {
    pub(crate) const fn free(position: Vec3) -> Self {
        Self {
            position,
            blocked: false,
        }
    }

    const fn blocked(position: Vec3) -> Self {
        Self {
            position,
            blocked: true,
        }
    }
}

/// Stops the step touching the first neighbour ahead that it would overlap.
///
/// The whole step is swept and the entity halts at the point of first
/// contact on its own path, so a long step can neither tunnel through a body
/// nor be pushed sideways off its line. Neighbours behind the mover are
/// ignored so an entity already overlapping someone can walk away from them.
/// Only the first conflicting neighbour in registry order is resolved.
pub(crate) fn clamp(
    start: Vec3,
    desired: Vec3,
    radius: f32,
    heading: Vec3,
    neighbours: &Neighbourhood<'_>,
) -> Resolution {
    for body in neighbours.iter() {
        let min_distance = radius + body.radius;
        if distance_to_segment(body.position, start, desired) >= min_distance {
            continue;
        }
        if heading.dot(body.position - start) <= 0.0 {
            continue;
        }
        // Starting inside the body leaves no entry point; back out toward start.
        let position = segment_entry(start, desired, body.position, min_distance).map_or_else(
            || body.position + direction_or(start - body.position, -heading) * min_distance,
            |t| start.lerp(desired, t),
        );
        return Resolution::blocked(position);
    }
    Resolution::free(desired)
}

/// Slides the step along every neighbour ahead that it would overlap.
///
/// The movement loses its component into each contact normal and keeps
/// `friction` of the rest. When nothing tangential survives the entity stops
/// touching that neighbour.
pub(crate) fn slide(
    start: Vec3,
    desired: Vec3,
    radius: f32,
    heading: Vec3,
    neighbours: &Neighbourhood<'_>,
    friction: f32,
) -> Resolution {
    let mut position = desired;
    let mut blocked = false;
    for body in neighbours.iter() {
        let min_distance = radius + body.radius;
        if position.distance(body.position) >= min_distance {
            continue;
        }
        let movement = position - start;
        if movement.dot(body.position - start) <= 0.0 {
            continue;
        }
        let normal = direction_or(position - body.position, -heading);
        let tangent = movement - normal * movement.dot(normal);
        let slid = tangent * friction;
        if slid.length() <= DISTANCE_EPSILON {
            position = body.position + normal * min_distance;
            blocked = true;
            continue;
        }
        position = start + slid;
        let offset = position - body.position;
        if offset.length() < min_distance {
            position = body.position + direction_or(offset, normal) * min_distance;
        }
    }
    Resolution { position, blocked }
}
