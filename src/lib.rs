#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the Warband movement core.
//!
//! A party of controllable characters and AI-driven enemies share a ground
//! plane. Mobile entities seek targets, resolve collisions with their
//! neighbours and keep apart through a weak separation force. Enemies chase
//! the nearest party member, detouring round crowds through sampled
//! waypoints. Rendering, windowing and audio stay outside the crate: it
//! consumes ground-plane pointer positions and produces render snapshots.
pub mod ai;
pub mod camera;
pub mod config;
pub mod constants;
pub mod entity;
pub mod game;
pub mod input;
pub mod logging;
pub mod mobile;
pub mod neighbourhood;
pub mod numeric;
pub mod registry;
pub mod spawn_world;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use ai::{ChaseConfig, ChaseController, ChaseDecision, ChaseMode, WaypointConfig};
pub use camera::{CameraRig, CameraSettings};
pub use config::{ConfigError, SimulationConfig};
pub use entity::{Entity, EntityId, EntityState, Role};
pub use game::Game;
pub use input::{screen_to_ground, FrameInput, InputSource};
pub use logging::init as init_logging;
pub use mobile::{CollisionPolicy, MobileEntity, MobileError, MovementConfig};
pub use registry::{EntityBody, Registry, RenderItem};
pub use spawn_world::spawn_demo_world;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use warband::prelude::*;
    //! ```

    pub use crate::CollisionPolicy;
    pub use crate::EntityId;
    pub use crate::MobileEntity;
    pub use crate::MovementConfig;
    pub use crate::Registry;
    pub use crate::Role;
    pub use glam::Vec3;
}
