//! Game session: the party, the enemies and the per-frame loop body.
use glam::Vec3;
use log::{debug, info};

use crate::ai::{ChaseConfig, ChaseController, ChaseDecision};
use crate::camera::CameraRig;
use crate::config::SimulationConfig;
use crate::entity::{Entity, EntityId};
use crate::input::InputSource;
use crate::mobile::MobileEntity;
use crate::registry::{Registry, RenderItem};

/// Owns the world and drives one frame at a time.
#[derive(Debug, Clone)]
pub struct Game {
    registry: Registry,
    party: Vec<EntityId>,
    controllers: Vec<ChaseController>,
    chase: ChaseConfig,
    active: usize,
    camera: CameraRig,
}

impl Game {
    /// Creates an empty session.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            registry: Registry::new(config.movement),
            party: Vec::new(),
            controllers: Vec::new(),
            chase: config.chase,
            active: 0,
            camera: CameraRig::new(config.camera, Vec3::ZERO),
        }
    }

    /// Adds a controllable character. The first one becomes active.
    pub fn add_party_member(&mut self, member: MobileEntity) -> EntityId {
        let position = member.position();
        let id = self.registry.add_entity(member);
        self.party.push(id);
        if self.party.len() == 1 {
            self.camera.snap(position);
        }
        id
    }

    /// Adds an enemy driven by its own chase controller.
    pub fn add_enemy(&mut self, enemy: MobileEntity) -> EntityId {
        let id = self.registry.add_entity(enemy);
        self.controllers.push(ChaseController::new(id, self.chase));
        id
    }

    /// Adds a static prop.
    pub fn add_prop(&mut self, prop: Entity) -> EntityId {
        self.registry.add_entity(prop)
    }

    /// Party handles in switching order.
    #[must_use]
    pub fn party(&self) -> &[EntityId] {
        &self.party
    }

    /// The character the player controls, if there is a party.
    #[must_use]
    pub fn active_member(&self) -> Option<EntityId> {
        self.party.get(self.active).copied()
    }

    /// Makes the next party member active, wrapping round.
    pub fn switch_active(&mut self) -> Option<EntityId> {
        if self.party.is_empty() {
            return None;
        }
        self.active = (self.active + 1) % self.party.len();
        info!(
            "switched to character {} / {}",
            self.active + 1,
            self.party.len()
        );
        self.active_member()
    }

    /// Applies one frame of input to the active character.
    ///
    /// Holding the move button over the ground sends the character there.
    /// Releasing it stops the character where it stands.
    pub fn handle_input(&mut self, input: &impl InputSource) {
        if input.switch_pressed() {
            self.switch_active();
        }
        let Some(active) = self.active_member() else {
            return;
        };
        let Some(member) = self.registry.mobile_mut(active) else {
            return;
        };
        if input.move_held() {
            if let Some(point) = input.pointer_world() {
                member.move_to(point);
            }
        }
        if input.move_released() {
            member.stop();
        }
    }

    /// Runs the AI, moves every entity and follows the active character.
    pub fn update(&mut self, dt: f32) -> Vec<ChaseDecision> {
        let decisions: Vec<_> = self
            .controllers
            .iter()
            .map(|controller| controller.update(&mut self.registry, &self.party))
            .collect();
        debug!("chase decisions: {decisions:?}");
        self.registry.update_all(dt);
        if let Some(focus) = self
            .active_member()
            .and_then(|id| self.registry.mobile(id))
            .map(MobileEntity::position)
        {
            self.camera.follow(focus, dt);
        }
        decisions
    }

    /// Entities in the world.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Entities in the world, mutably.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Enemy controllers in insertion order.
    #[must_use]
    pub fn controllers(&self) -> &[ChaseController] {
        &self.controllers
    }

    /// The follow camera.
    #[must_use]
    pub const fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Render snapshot of every active entity.
    #[must_use]
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.registry.render_items()
    }
}
