//! Read-only view of nearby mobile bodies handed to movement updates.
//!
//! Mobile entities never hold a pointer back into the registry. Instead the
//! registry builds a snapshot of every active mobile body and passes a
//! [`Neighbourhood`] into each update. The snapshot is refreshed as the pass
//! progresses, so later entities see the moves earlier ones already made.
use glam::Vec3;

use crate::entity::EntityId;
use crate::vector_math::distance_to_segment;

/// Position and collision radius of one mobile body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// Registry handle of the body.
    pub id: EntityId,
    /// Centre of the collision circle.
    pub position: Vec3,
    /// Collision radius.
    pub radius: f32,
}

impl Neighbour {
    /// Gap between this body and a circle of `radius` centred at `point`.
    ///
    /// Negative values mean the circles overlap.
    #[must_use]
    pub fn clearance(&self, point: Vec3, radius: f32) -> f32 {
        point.distance(self.position) - self.radius - radius
    }
}

/// Every neighbour except the entity being updated.
#[derive(Debug, Clone, Copy)]
pub struct Neighbourhood<'a> {
    own: Option<EntityId>,
    bodies: &'a [Neighbour],
}

impl<'a> Neighbourhood<'a> {
    /// Views `bodies` from the perspective of `own`, which is skipped.
    #[must_use]
    pub const fn new(own: EntityId, bodies: &'a [Neighbour]) -> Self {
        Self {
            own: Some(own),
            bodies,
        }
    }

    /// Views `bodies` without excluding anything.
    #[must_use]
    pub const fn from_obstacles(bodies: &'a [Neighbour]) -> Self {
        Self { own: None, bodies }
    }

    /// A neighbourhood with nobody in it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            own: None,
            bodies: &[],
        }
    }

    /// Handle of the entity this view belongs to, if any.
    #[must_use]
    pub const fn own(&self) -> Option<EntityId> {
        self.own
    }

    /// Iterates neighbours in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Neighbour> + '_ {
        let own = self.own;
        self.bodies
            .iter()
            .filter(move |body| Some(body.id) != own)
    }

    /// Smallest clearance from a circle at `point` to any neighbour.
    ///
    /// Returns `f32::INFINITY` when the neighbourhood is empty.
    #[must_use]
    pub fn min_clearance(&self, point: Vec3, radius: f32) -> f32 {
        self.iter()
            .map(|body| body.clearance(point, radius))
            .fold(f32::INFINITY, f32::min)
    }

    /// Whether a circle of `radius` swept from `start` to `end` hits anyone.
    ///
    /// Bodies already overlapping `start` are ignored so an entity pressed
    /// against a neighbour can still plan a way out.
    #[must_use]
    pub fn segment_blocked(&self, start: Vec3, end: Vec3, radius: f32) -> bool {
        self.iter().any(|body| {
            let reach = body.radius + radius;
            body.position.distance(start) >= reach
                && distance_to_segment(body.position, start, end) < reach
        })
    }
}
