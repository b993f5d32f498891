//! Continuous separation between crowded bodies.
use glam::Vec3;

use crate::neighbourhood::Neighbourhood;
use crate::vector_math::try_direction;
use crate::DISTANCE_EPSILON;

/// Averaged push away from every neighbour closer than the preferred gap.
///
/// The preferred gap is `distance_factor` times the summed radii. Each close
/// neighbour contributes a unit vector away from it weighted by how deep
/// inside that gap it sits. Coincident bodies are split along the reverse
/// heading when moving, otherwise along the X axis with the lower handle
/// going negative so the two sides always disagree.
///
/// Returns zero when no neighbour is close enough.
#[must_use]
pub fn separation_force(
    position: Vec3,
    radius: f32,
    heading: Vec3,
    neighbours: &Neighbourhood<'_>,
    distance_factor: f32,
) -> Vec3 {
    let own = neighbours.own();
    let mut total = Vec3::ZERO;
    let mut count = 0_u16;
    for body in neighbours.iter() {
        let preferred = (radius + body.radius) * distance_factor;
        let offset = position - body.position;
        let distance = offset.length();
        if distance >= preferred {
            continue;
        }
        let away = try_direction(offset, DISTANCE_EPSILON)
            .or_else(|| try_direction(-heading, DISTANCE_EPSILON))
            .unwrap_or_else(|| match own {
                Some(id) if id > body.id => Vec3::X,
                _ => Vec3::NEG_X,
            });
        total += away * ((preferred - distance) / preferred);
        count = count.saturating_add(1);
    }
    if count == 0 {
        Vec3::ZERO
    } else {
        total / f32::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use crate::neighbourhood::Neighbour;
    use approx::assert_relative_eq;

    fn at(id: u64, position: Vec3) -> Neighbour {
        Neighbour {
            id: EntityId(id),
            position,
            radius: 0.5,
        }
    }

    #[test]
    fn distant_neighbours_exert_nothing() {
        let bodies = [at(2, Vec3::new(1.2, 0.0, 0.0))];
        let hood = Neighbourhood::new(EntityId(1), &bodies);
        assert_eq!(separation_force(Vec3::ZERO, 0.5, Vec3::ZERO, &hood, 1.2), Vec3::ZERO);
    }

    #[test]
    fn pushes_away_proportionally() {
        let bodies = [at(2, Vec3::new(0.6, 0.0, 0.0))];
        let hood = Neighbourhood::new(EntityId(1), &bodies);
        let force = separation_force(Vec3::ZERO, 0.5, Vec3::ZERO, &hood, 1.2);
        assert_relative_eq!(force.x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(force.z, 0.0);
    }

    #[test]
    fn coincident_bodies_split_in_opposite_directions() {
        let bodies = [at(1, Vec3::ZERO), at(2, Vec3::ZERO)];
        let push = |own: u64| {
            let hood = Neighbourhood::new(EntityId(own), &bodies);
            separation_force(Vec3::ZERO, 0.5, Vec3::ZERO, &hood, 1.2)
        };
        let first = push(1);
        let second = push(2);
        assert!(first.x < 0.0);
        assert!(second.x > 0.0);
    }

    #[test]
    fn coincident_mover_backs_off_along_heading() {
        let bodies = [at(2, Vec3::ZERO)];
        let hood = Neighbourhood::new(EntityId(1), &bodies);
        let force = separation_force(Vec3::ZERO, 0.5, Vec3::Z, &hood, 1.2);
        assert_relative_eq!(force.z, -1.0);
    }

    #[test]
    fn contributions_are_averaged() {
        let bodies = [
            at(2, Vec3::new(0.6, 0.0, 0.0)),
            at(3, Vec3::new(-0.6, 0.0, 0.0)),
        ];
        let hood = Neighbourhood::new(EntityId(1), &bodies);
        let force = separation_force(Vec3::ZERO, 0.5, Vec3::ZERO, &hood, 1.2);
        assert_relative_eq!(force.length(), 0.0, epsilon = 1e-6);
    }
}
