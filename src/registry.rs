//! Owning, ordered collection of every entity in the world.
//!
//! Iteration follows insertion order, which keeps update passes
//! deterministic. Mobile updates see a [`Neighbourhood`] built from the
//! registry's active mobiles. The snapshot is refreshed after each entity
//! moves, so later entities react to earlier ones within the same pass.
use glam::Vec3;
use hashbrown::HashMap;
use log::trace;

use crate::entity::{Entity, EntityId};
use crate::mobile::{MobileEntity, MovementConfig};
use crate::neighbourhood::{Neighbour, Neighbourhood};

/// What kind of entity a registry slot holds.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityBody {
    /// A passive, static entity such as a landmark.
    Prop(Entity),
    /// A mobile entity that moves and collides.
    Mobile(MobileEntity),
}

impl EntityBody {
    /// Shared entity record of either kind.
    #[must_use]
    pub const fn entity(&self) -> &Entity {
        match self {
            Self::Prop(entity) => entity,
            Self::Mobile(mobile) => &mobile.entity,
        }
    }

    /// Mutable entity record of either kind.
    pub fn entity_mut(&mut self) -> &mut Entity {
        match self {
            Self::Prop(entity) => entity,
            Self::Mobile(mobile) => &mut mobile.entity,
        }
    }

    /// The mobile entity, if this body is one.
    #[must_use]
    pub const fn as_mobile(&self) -> Option<&MobileEntity> {
        match self {
            Self::Mobile(mobile) => Some(mobile),
            Self::Prop(_) => None,
        }
    }

    /// The mobile entity, mutably, if this body is one.
    pub fn as_mobile_mut(&mut self) -> Option<&mut MobileEntity> {
        match self {
            Self::Mobile(mobile) => Some(mobile),
            Self::Prop(_) => None,
        }
    }

    /// Whether update and render passes include this body.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.entity().active
    }
}

impl From<Entity> for EntityBody {
    fn from(entity: Entity) -> Self {
        Self::Prop(entity)
    }
}

impl From<MobileEntity> for EntityBody {
    fn from(mobile: MobileEntity) -> Self {
        Self::Mobile(mobile)
    }
}

/// Snapshot of one active entity for a rendering backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    /// Registry handle.
    pub id: EntityId,
    /// World-space position.
    pub position: Vec3,
    /// Collision radius for mobiles, zero for props.
    pub radius: f32,
    /// Display colour.
    pub color: Vec3,
}

#[derive(Clone, Debug)]
struct Slot {
    id: EntityId,
    body: EntityBody,
}

/// Ordered owner of all entities.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    config: MovementConfig,
    slots: Vec<Slot>,
    index: HashMap<EntityId, usize>,
    next_id: u64,
}

impl Registry {
    /// Creates an empty registry whose mobiles move under `config`.
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Movement tunables applied to every mobile update.
    #[must_use]
    pub const fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Number of entities, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the registry holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Appends `body` and returns its fresh handle.
    pub fn add_entity(&mut self, body: impl Into<EntityBody>) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.index.insert(id, self.slots.len());
        self.slots.push(Slot {
            id,
            body: body.into(),
        });
        trace!("registered entity {id}");
        id
    }

    /// Removes the entity behind `id`, keeping the order of the others.
    ///
    /// Returns `None` when the handle is unknown or was already removed.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<EntityBody> {
        let position = self.index.remove(&id)?;
        let slot = self.slots.remove(position);
        for (offset, later) in self.slots.iter().enumerate().skip(position) {
            self.index.insert(later.id, offset);
        }
        trace!("removed entity {id}");
        Some(slot.body)
    }

    /// Iterates every entity in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &EntityBody)> {
        self.slots.iter().map(|slot| (slot.id, &slot.body))
    }

    /// Looks up an entity by handle.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntityBody> {
        let position = *self.index.get(&id)?;
        self.slots.get(position).map(|slot| &slot.body)
    }

    /// Looks up an entity mutably by handle.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityBody> {
        let position = *self.index.get(&id)?;
        self.slots.get_mut(position).map(|slot| &mut slot.body)
    }

    /// Looks up a mobile entity by handle.
    #[must_use]
    pub fn mobile(&self, id: EntityId) -> Option<&MobileEntity> {
        self.get(id).and_then(EntityBody::as_mobile)
    }

    /// Looks up a mobile entity mutably by handle.
    pub fn mobile_mut(&mut self, id: EntityId) -> Option<&mut MobileEntity> {
        self.get_mut(id).and_then(EntityBody::as_mobile_mut)
    }

    /// Snapshot of every active mobile body in insertion order.
    #[must_use]
    pub fn neighbours(&self) -> Vec<Neighbour> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let mobile = slot.body.as_mobile()?;
                mobile.entity.active.then(|| Neighbour {
                    id: slot.id,
                    position: mobile.position(),
                    radius: mobile.radius(),
                })
            })
            .collect()
    }

    /// Advances every active mobile by `dt` seconds in insertion order.
    ///
    /// Props and inactive entities are left untouched.
    pub fn update_all(&mut self, dt: f32) {
        let mut snapshot = self.neighbours();
        let Self { config, slots, .. } = self;
        let mut cursor = 0;
        for slot in slots.iter_mut() {
            let Some(mobile) = slot.body.as_mobile_mut() else {
                continue;
            };
            if !mobile.entity.active {
                continue;
            }
            mobile.update(dt, &Neighbourhood::new(slot.id, &snapshot), config);
            if let Some(entry) = snapshot.get_mut(cursor) {
                entry.position = mobile.position();
            }
            cursor += 1;
        }
        trace!("updated {cursor} mobiles over {dt}s");
    }

    /// Render snapshot of every active entity in insertion order.
    #[must_use]
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.slots
            .iter()
            .filter(|slot| slot.body.is_active())
            .map(|slot| {
                let entity = slot.body.entity();
                RenderItem {
                    id: slot.id,
                    position: entity.position,
                    radius: slot.body.as_mobile().map_or(0.0, MobileEntity::radius),
                    color: entity.color,
                }
            })
            .collect()
    }
}
