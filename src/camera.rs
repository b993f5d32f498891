//! Overhead camera that follows the active party member.
//!
//! The camera sits at a fixed offset from its focus and looks at it. By
//! default it snaps to the focus every frame. With [`CameraSettings::smooth`]
//! set it instead chases the goal position with a damped spring, which keeps
//! the view steady when the active character changes.
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_OFFSET};

/// Runtime configuration for the follow camera.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use warband::camera::{CameraRig, CameraSettings};
///
/// let rig = CameraRig::new(CameraSettings::default(), Vec3::new(2.0, 0.0, 0.0));
/// assert_eq!(rig.position(), Vec3::new(2.0, 15.0, 15.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Eye position relative to the focus.
    pub offset: Vec3,
    /// Spring constant pulling the eye toward its goal.
    pub stiffness: f32,
    /// Velocity damping. `2 * sqrt(stiffness)` is critically damped.
    pub damping: f32,
    /// Use the spring instead of snapping.
    pub smooth: bool,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let stiffness = 40.0_f32;
        Self {
            offset: Vec3::from_array(CAMERA_OFFSET),
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            smooth: false,
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

/// Follow camera state.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    settings: CameraSettings,
    position: Vec3,
    velocity: Vec3,
}

impl CameraRig {
    /// Places a camera looking at `focus`.
    #[must_use]
    pub fn new(settings: CameraSettings, focus: Vec3) -> Self {
        Self {
            settings,
            position: focus + settings.offset,
            velocity: Vec3::ZERO,
        }
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Eye position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Point the camera looks at.
    #[must_use]
    pub fn focus(&self) -> Vec3 {
        self.position - self.settings.offset
    }

    /// Jumps straight to `focus` and drops any spring motion.
    pub fn snap(&mut self, focus: Vec3) {
        self.position = focus + self.settings.offset;
        self.velocity = Vec3::ZERO;
    }

    /// Moves toward `focus` over `dt` seconds.
    pub fn follow(&mut self, focus: Vec3, dt: f32) {
        if !self.settings.smooth {
            self.snap(focus);
            return;
        }
        let goal = focus + self.settings.offset;
        let acceleration = (goal - self.position) * self.settings.stiffness
            - self.velocity * self.settings.damping;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Right-handed, Y-up view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.focus(), Vec3::Y)
    }

    /// OpenGL-style perspective projection for a `width` by `height` viewport.
    ///
    /// A zero-height viewport is treated as square.
    #[must_use]
    pub fn projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        let aspect = if height > 0.0 && width > 0.0 {
            width / height
        } else {
            1.0
        };
        Mat4::perspective_rh_gl(
            self.settings.fov_degrees.to_radians(),
            aspect,
            self.settings.near,
            self.settings.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;
    use rstest::rstest;

    #[test]
    fn instant_follow_sits_at_offset() {
        let mut rig = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
        rig.follow(Vec3::new(3.0, 0.0, -4.0), 1.0 / 60.0);
        assert_eq!(rig.position(), Vec3::new(3.0, 15.0, 11.0));
        assert_eq!(rig.focus(), Vec3::new(3.0, 0.0, -4.0));
    }

    #[test]
    fn smooth_follow_converges_without_overshoot() {
        let settings = CameraSettings {
            smooth: true,
            ..CameraSettings::default()
        };
        let mut rig = CameraRig::new(settings, Vec3::ZERO);
        let focus = Vec3::new(10.0, 0.0, 0.0);
        let mut previous = rig.focus().x;
        for _ in 0..300 {
            rig.follow(focus, 1.0 / 60.0);
            let x = rig.focus().x;
            assert!(x >= previous - 1e-4);
            assert!(x <= 10.0 + 1e-3);
            previous = x;
        }
        assert_relative_eq!(rig.focus().x, 10.0, epsilon = 1e-2);
    }

    #[test]
    fn rig_keeps_its_settings() {
        let settings = CameraSettings {
            offset: Vec3::new(0.0, 10.0, 5.0),
            ..CameraSettings::default()
        };
        let rig = CameraRig::new(settings, Vec3::ZERO);
        assert_eq!(rig.settings(), &settings);
        assert_eq!(rig.position(), rig.settings().offset);
    }

    #[test]
    fn snap_clears_spring_motion() {
        let settings = CameraSettings {
            smooth: true,
            ..CameraSettings::default()
        };
        let mut rig = CameraRig::new(settings, Vec3::ZERO);
        rig.follow(Vec3::new(5.0, 0.0, 0.0), 0.1);
        rig.snap(Vec3::ZERO);
        rig.follow(Vec3::ZERO, 0.1);
        assert_eq!(rig.focus(), Vec3::ZERO);
    }

    #[test]
    fn focus_projects_to_screen_centre() {
        let rig = CameraRig::new(CameraSettings::default(), Vec3::new(1.0, 0.0, 2.0));
        let clip = rig.projection_matrix(800.0, 600.0)
            * rig.view_matrix()
            * Vec4::new(1.0, 0.0, 2.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[rstest]
    #[case::zero_height(800.0, 0.0)]
    #[case::zero_width(0.0, 600.0)]
    fn empty_viewport_uses_square_aspect(#[case] width: f32, #[case] height: f32) {
        let rig = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
        let projection = rig.projection_matrix(width, height);
        assert!(projection.is_finite());
        assert_eq!(projection, rig.projection_matrix(1.0, 1.0));
    }
}
