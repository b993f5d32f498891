//! Per-frame input consumed by the game session.
//!
//! Windowing backends implement [`InputSource`] or fill in a [`FrameInput`]
//! each frame. Pointer positions reach the core already projected onto the
//! ground plane; [`screen_to_ground`] performs that projection from window
//! coordinates and the camera matrices.
use glam::{Mat4, Vec2, Vec3};

use crate::vector_math::try_direction;
use crate::DISTANCE_EPSILON;

/// Input state sampled once per frame.
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// The party-switch key went down this frame.
    fn switch_pressed(&self) -> bool;
    /// The move button is held.
    fn move_held(&self) -> bool;
    /// The move button was released this frame.
    fn move_released(&self) -> bool;
    /// Ground point under the pointer, if it hits the ground.
    fn pointer_world(&self) -> Option<Vec3>;
}

/// Plain-data [`InputSource`] for headless drivers and scripted runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// The party-switch key went down this frame.
    pub switch_pressed: bool,
    /// The move button is held.
    pub move_held: bool,
    /// The move button was released this frame.
    pub move_released: bool,
    /// Ground point under the pointer.
    pub pointer_world: Option<Vec3>,
}

impl FrameInput {
    /// Input holding the move button over `point`.
    #[must_use]
    pub const fn hold_at(point: Vec3) -> Self {
        Self {
            switch_pressed: false,
            move_held: true,
            move_released: false,
            pointer_world: Some(point),
        }
    }

    /// Input releasing the move button.
    #[must_use]
    pub const fn release() -> Self {
        Self {
            switch_pressed: false,
            move_held: false,
            move_released: true,
            pointer_world: None,
        }
    }

    /// Input pressing the party-switch key.
    #[must_use]
    pub const fn switch() -> Self {
        Self {
            switch_pressed: true,
            move_held: false,
            move_released: false,
            pointer_world: None,
        }
    }
}

impl InputSource for FrameInput {
    fn switch_pressed(&self) -> bool {
        self.switch_pressed
    }

    fn move_held(&self) -> bool {
        self.move_held
    }

    fn move_released(&self) -> bool {
        self.move_released
    }

    fn pointer_world(&self) -> Option<Vec3> {
        self.pointer_world
    }
}

/// Projects a window-space point onto the `y = 0` ground plane.
///
/// `screen` is measured in pixels from the top-left corner of a window of
/// size `viewport`. Returns `None` for an empty viewport or when the pointer
/// ray misses the ground.
///
/// # Examples
///
/// ```
/// use glam::{Vec2, Vec3};
/// use warband::camera::{CameraRig, CameraSettings};
/// use warband::input::screen_to_ground;
///
/// let rig = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
/// let viewport = Vec2::new(800.0, 600.0);
/// let hit = screen_to_ground(
///     viewport / 2.0,
///     viewport,
///     rig.view_matrix(),
///     rig.projection_matrix(viewport.x, viewport.y),
/// )
/// .unwrap();
/// assert!(hit.length() < 1e-3);
/// ```
#[must_use]
pub fn screen_to_ground(screen: Vec2, viewport: Vec2, view: Mat4, projection: Mat4) -> Option<Vec3> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(
        2.0 * screen.x / viewport.x - 1.0,
        1.0 - 2.0 * screen.y / viewport.y,
    );
    let inverse = (projection * view).inverse();
    let near = inverse.project_point3(ndc.extend(-1.0));
    let far = inverse.project_point3(ndc.extend(1.0));
    let direction = try_direction(far - near, DISTANCE_EPSILON)?;
    if direction.y.abs() <= DISTANCE_EPSILON {
        return None;
    }
    let t = -near.y / direction.y;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    let hit = near + direction * t;
    Some(Vec3::new(hit.x, 0.0, hit.z))
}
