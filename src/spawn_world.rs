//! Demo world used by the binary and the scenario tests.
use glam::Vec3;

use crate::entity::{Entity, Role};
use crate::game::Game;
use crate::mobile::{MobileError, MobileEntity};
use crate::DEFAULT_RADIUS;

/// Populates `game` with a minimal demo world.
///
/// # Errors
/// Propagates [`MobileError`] if a demo character cannot be built.
pub fn spawn_demo_world(game: &mut Game) -> Result<(), MobileError> {
    // Static landmark
    game.add_prop(Entity::new(Vec3::new(0.0, 0.0, -4.0)).with_color(Vec3::splat(0.5)));

    // The party: red, green and blue
    for (position, color) in [
        (Vec3::ZERO, Vec3::new(0.9, 0.2, 0.2)),
        (Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.2, 0.9, 0.2)),
        (Vec3::new(-2.0, 0.0, 0.0), Vec3::new(0.2, 0.2, 0.9)),
    ] {
        let member = MobileEntity::new(Role::PartyMember, position, DEFAULT_RADIUS)?.with_color(color);
        game.add_party_member(member);
    }

    // Enemies closing in from three sides
    for position in [
        Vec3::new(8.0, 0.0, 6.0),
        Vec3::new(-8.0, 0.0, 6.0),
        Vec3::new(0.0, 0.0, -9.0),
    ] {
        let enemy = MobileEntity::new(Role::Enemy, position, DEFAULT_RADIUS)?
            .with_speed(3.0)
            .with_color(Vec3::new(0.6, 0.1, 0.6));
        game.add_enemy(enemy);
    }
    Ok(())
}
