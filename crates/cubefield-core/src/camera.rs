//! Drag-driven orbit camera with exponential smoothing.
//!
//! Input never moves the camera directly: drags set *goal* angles and every
//! frame the *current* angles close a fixed fraction of the remaining gap.
//! All angles are in degrees.

use crate::error::SceneError;
use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

/// Right-handed perspective camera looking from `eye` at `target`.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Clip-space projection (wgpu depth range `[0, 1]`).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Camera-to-world rotation; a billboard copies this to face the viewer.
    pub fn orientation(&self) -> Quat {
        let view = self.view_matrix();
        Quat::from_mat3(&Mat3::from_mat4(view).transpose()).normalize()
    }
}

/// How the smoothed angles become an eye position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// `spherical_to_cartesian(radius, -elevation, azimuth)`.
    Spherical,
    /// Azimuth-only orbit at a fixed height of `radius * height_ratio`.
    Turntable { height_ratio: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Degrees per pointer pixel.
    pub sensitivity: f32,
    pub elevation_drag: bool,
    /// Inclusive `(min, max)` for the elevation goal.
    pub elevation_clamp: Option<(f32, f32)>,
    /// Smoothing divisor `d` in `current += (goal - current) / d`; must exceed 1.
    pub decay_divisor: f32,
    pub radius: f32,
    pub placement: Placement,
    pub initial_azimuth: f32,
    pub initial_elevation: f32,
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Keep azimuth within one turn over long sessions.
    pub wrap_azimuth: bool,
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.decay_divisor > 1.0) {
            return Err(SceneError::InvalidConfig(format!(
                "decay divisor must be > 1, got {}",
                self.decay_divisor
            )));
        }
        if let Some((lo, hi)) = self.elevation_clamp {
            if lo > hi {
                return Err(SceneError::InvalidConfig(format!(
                    "elevation clamp [{lo}, {hi}] is empty"
                )));
            }
        }
        if !(self.radius > 0.0) || !(self.z_near > 0.0) || self.z_far <= self.z_near {
            return Err(SceneError::InvalidConfig(
                "camera radius and clip planes must be positive and ordered".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// One drag session. A new `begin` overwrites whatever was there.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    pub source: PointerSource,
    pub start_pointer: Vec2,
    pub pointer: Vec2,
    pub start_azimuth: f32,
    pub start_elevation: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitAngles {
    pub current_azimuth: f32,
    pub current_elevation: f32,
    pub goal_azimuth: f32,
    pub goal_elevation: f32,
}

impl OrbitAngles {
    pub fn at_rest(azimuth: f32, elevation: f32) -> Self {
        Self {
            current_azimuth: azimuth,
            current_elevation: elevation,
            goal_azimuth: azimuth,
            goal_elevation: elevation,
        }
    }
}

#[inline]
pub fn smoothing_step(current: f32, goal: f32, decay_divisor: f32) -> f32 {
    current + (goal - current) / decay_divisor
}

/// three.js convention: `phi` from +Y, `theta` around +Y from +Z.
#[inline]
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_r = phi.sin() * radius;
    Vec3::new(sin_phi_r * theta.sin(), phi.cos() * radius, sin_phi_r * theta.cos())
}

/// Goal angles for a drag, before clamping.
#[inline]
pub fn drag_goal(drag: &DragState, sensitivity: f32) -> (f32, f32) {
    let delta = drag.pointer - drag.start_pointer;
    (
        drag.start_azimuth - delta.x * sensitivity,
        drag.start_elevation - delta.y * sensitivity,
    )
}

pub struct CameraRig {
    config: CameraConfig,
    angles: OrbitAngles,
    drag: DragState,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let elevation = clamp_elevation(&config, config.initial_elevation);
        let angles = OrbitAngles::at_rest(config.initial_azimuth, elevation);
        Self {
            config,
            angles,
            drag: DragState::default(),
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn angles(&self) -> OrbitAngles {
        self.angles
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.dragging
    }

    /// Start (or restart) a drag from the current goal angles.
    pub fn begin_drag(&mut self, source: PointerSource, pointer: Vec2) {
        self.drag = DragState {
            dragging: true,
            source,
            start_pointer: pointer,
            pointer,
            start_azimuth: self.angles.goal_azimuth,
            start_elevation: self.angles.goal_elevation,
        };
    }

    /// Updates the pointer and recomputes the goal angles right away, so a
    /// release later in the same frame keeps this move. Moves from a source
    /// other than the one that started the drag are ignored, as are moves
    /// while idle.
    pub fn drag_to(&mut self, source: PointerSource, pointer: Vec2) -> bool {
        if self.drag.dragging && self.drag.source == source {
            self.drag.pointer = pointer;
            self.apply_drag();
            return true;
        }
        false
    }

    pub fn end_drag(&mut self, source: PointerSource) {
        if self.drag.dragging && self.drag.source == source {
            self.drag.dragging = false;
        }
    }

    /// Recompute goals from the active drag; no-op while idle.
    pub fn apply_drag(&mut self) {
        if !self.drag.dragging {
            return;
        }
        let (azimuth, elevation) = drag_goal(&self.drag, self.config.sensitivity);
        self.angles.goal_azimuth = azimuth;
        if self.config.elevation_drag {
            self.angles.goal_elevation = clamp_elevation(&self.config, elevation);
        }
    }

    pub fn set_goal(&mut self, azimuth: f32, elevation: f32) {
        self.angles.goal_azimuth = azimuth;
        self.angles.goal_elevation = clamp_elevation(&self.config, elevation);
    }

    /// One frame of exponential decay toward the goal.
    pub fn update_smoothing(&mut self) {
        let d = self.config.decay_divisor;
        let a = &mut self.angles;
        a.current_azimuth = smoothing_step(a.current_azimuth, a.goal_azimuth, d);
        a.current_elevation = smoothing_step(a.current_elevation, a.goal_elevation, d);
        if self.config.wrap_azimuth {
            self.wrap_azimuth();
        }
    }

    // Shift every azimuth by the same whole number of turns so the
    // goal-current gap, and the placement, stay the same.
    fn wrap_azimuth(&mut self) {
        let current = self.angles.current_azimuth;
        if current.abs() <= 360.0 {
            return;
        }
        let shift = (current / 360.0).trunc() * 360.0;
        self.angles.current_azimuth -= shift;
        self.angles.goal_azimuth -= shift;
        self.drag.start_azimuth -= shift;
    }

    pub fn eye(&self) -> Vec3 {
        let az = self.angles.current_azimuth.to_radians();
        let r = self.config.radius;
        match self.config.placement {
            Placement::Spherical => {
                spherical_to_cartesian(r, -self.angles.current_elevation.to_radians(), az)
            }
            Placement::Turntable { height_ratio } => {
                Vec3::new(az.sin() * r, r * height_ratio, az.cos() * r)
            }
        }
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-4),
            fovy_radians: self.config.fov_y_deg.to_radians(),
            znear: self.config.z_near,
            zfar: self.config.z_far,
        }
    }
}

fn clamp_elevation(config: &CameraConfig, elevation: f32) -> f32 {
    match config.elevation_clamp {
        Some((lo, hi)) => elevation.clamp(lo, hi),
        None => elevation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CameraConfig {
        CameraConfig {
            sensitivity: 0.2,
            elevation_drag: true,
            elevation_clamp: Some((45.0, 135.0)),
            decay_divisor: 10.0,
            radius: 4.0,
            placement: Placement::Spherical,
            initial_azimuth: 45.0,
            initial_elevation: 45.0,
            fov_y_deg: 75.0,
            z_near: 0.1,
            z_far: 1000.0,
            wrap_azimuth: true,
        }
    }

    #[test]
    fn spherical_matches_three_js_convention() {
        let p = spherical_to_cartesian(2.0, std::f32::consts::FRAC_PI_2, 0.0);
        assert!((p - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        let top = spherical_to_cartesian(2.0, 0.0, 1.3);
        assert!((top - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn eye_sits_on_the_orbit_radius() {
        let rig = CameraRig::new(cfg());
        assert!((rig.eye().length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn orientation_faces_the_origin() {
        let rig = CameraRig::new(cfg());
        let cam = rig.camera(1.5);
        // camera looks down its local -Z
        let forward = cam.orientation() * Vec3::NEG_Z;
        let to_origin = (-cam.eye).normalize();
        assert!(forward.dot(to_origin) > 0.9999);
    }

    #[test]
    fn move_from_other_source_is_ignored() {
        let mut rig = CameraRig::new(cfg());
        rig.begin_drag(PointerSource::Touch, Vec2::new(10.0, 10.0));
        assert!(!rig.drag_to(PointerSource::Mouse, Vec2::new(500.0, 10.0)));
        rig.end_drag(PointerSource::Mouse);
        assert!(rig.is_dragging());
        rig.apply_drag();
        assert_eq!(rig.angles().goal_azimuth, 45.0);
    }

    #[test]
    fn invalid_divisor_rejected() {
        let mut c = cfg();
        c.decay_divisor = 1.0;
        assert!(c.validate().is_err());
        c.decay_divisor = 10.0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn wrapping_preserves_gap_and_eye() {
        let mut c = cfg();
        c.elevation_clamp = None;
        let mut rig = CameraRig::new(c);
        rig.set_goal(1000.0, 45.0);
        for _ in 0..200 {
            rig.update_smoothing();
        }
        let a = rig.angles();
        assert!(a.current_azimuth.abs() <= 360.0);
        assert!((a.goal_azimuth - 280.0).abs() < 1e-3);
        assert!((a.goal_azimuth - a.current_azimuth).abs() < 1e-2);
        let unwrapped = spherical_to_cartesian(
            4.0,
            -45f32.to_radians(),
            (a.current_azimuth + 720.0).to_radians(),
        );
        assert!((rig.eye() - unwrapped).length() < 1e-3);
    }
}
