//! Utility helpers for tests.
//!
//! Fixture builders for registries of mobile entities and small helpers for
//! stepping and measuring scenarios.
use glam::Vec3;
use warband::{EntityId, MobileEntity, MovementConfig, Registry, Role};

/// Frame duration used by scenario tests.
pub const FRAME: f32 = 1.0 / 60.0;

/// Builds an idle mobile entity at `(x, 0, z)`.
///
/// # Panics
/// Panics if `radius` is not a valid collision radius.
#[must_use]
pub fn mob(role: Role, x: f32, z: f32, radius: f32) -> MobileEntity {
    MobileEntity::new(role, Vec3::new(x, 0.0, z), radius)
        .unwrap_or_else(|e| panic!("invalid test fixture: {e}"))
}

/// Builds a registry under `config` holding `mobs` in order.
///
/// Returns the registry and the handles in insertion order.
#[must_use]
pub fn registry_with(
    config: MovementConfig,
    mobs: impl IntoIterator<Item = MobileEntity>,
) -> (Registry, Vec<EntityId>) {
    let mut registry = Registry::new(config);
    let ids = mobs
        .into_iter()
        .map(|mobile| registry.add_entity(mobile))
        .collect();
    (registry, ids)
}

/// Current position of the mobile behind `id`.
///
/// # Panics
/// Panics if `id` does not name a mobile entity.
#[must_use]
pub fn position(registry: &Registry, id: EntityId) -> Vec3 {
    registry
        .mobile(id)
        .unwrap_or_else(|| panic!("no mobile entity {id}"))
        .position()
}

/// Centre distance between two mobiles.
#[must_use]
pub fn gap(registry: &Registry, a: EntityId, b: EntityId) -> f32 {
    position(registry, a).distance(position(registry, b))
}

/// Whether the mobile behind `id` is seeking a target.
#[must_use]
pub fn is_moving(registry: &Registry, id: EntityId) -> bool {
    registry.mobile(id).is_some_and(MobileEntity::is_moving)
}

/// Sends the mobile behind `id` toward `target`.
///
/// # Panics
/// Panics if `id` does not name a mobile entity.
pub fn command_move(registry: &mut Registry, id: EntityId, target: Vec3) {
    registry
        .mobile_mut(id)
        .unwrap_or_else(|| panic!("no mobile entity {id}"))
        .move_to(target);
}

/// Runs `frames` update passes of [`FRAME`] seconds.
pub fn run_frames(registry: &mut Registry, frames: usize) {
    for _ in 0..frames {
        registry.update_all(FRAME);
    }
}
