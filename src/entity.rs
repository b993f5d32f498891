//! Passive entity records shared by every renderable object.
//!
//! An [`Entity`] only carries a transform, a colour and an activity flag.
//! Behaviour lives in [`crate::mobile::MobileEntity`], which embeds one.
use glam::Vec3;
use serde::Serialize;

/// Opaque handle issued by the [`crate::Registry`] on insertion.
///
/// Handles increase monotonically and are never reused, so a handle kept
/// after its entity was removed simply resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle marker carried by mobile entities.
///
/// Nothing transitions an entity to [`EntityState::Dead`] yet and a dead
/// entity is never removed automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EntityState {
    /// The default state.
    #[default]
    Alive,
    /// Reserved for combat resolution.
    Dead,
}

/// Which side a mobile entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// A controllable character in the player's party.
    PartyMember,
    /// An AI-driven opponent.
    Enemy,
}

/// Transform, colour and activity flag of anything drawn in the world.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entity {
    /// World-space position.
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Non-uniform scale.
    pub scale: Vec3,
    /// Display colour, each channel in `0.0..=1.0`.
    pub color: Vec3,
    /// Inactive entities are skipped by update and render passes.
    pub active: bool,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            color: Vec3::ONE,
            active: true,
        }
    }
}

impl Entity {
    /// Creates an active, white entity at `position`.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets the display colour, clamping each channel into `0.0..=1.0`.
    #[must_use]
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color.clamp(Vec3::ZERO, Vec3::ONE);
        self
    }
}
