//! Camera state shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The frontend consumes them to
//! build view/projection matrices and picking rays, while the camera
//! controller mutates the [`Pose`] in place each frame.

use crate::constants::{
    home_position, home_target, CAMERA_FOVY_RADIANS, CAMERA_ZFAR, CAMERA_ZNEAR,
};
use glam::{Mat4, Vec3, Vec4};

/// Spatial state of the camera: where it sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// The configured resting pose the camera returns to.
    pub fn home() -> Self {
        Self::new(home_position(), home_target())
    }

    /// Unit view direction, or `None` when position and target coincide.
    pub fn forward(&self) -> Option<Vec3> {
        (self.target - self.position).try_normalize()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::home()
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub pose: Pose,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pose: Pose::home(),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.pose.position, self.pose.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Set the aspect ratio from a backing-store size; ignores empty sizes.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// World-space picking ray through a point in normalized device coordinates.
    ///
    /// Returns `(ray_origin, ray_direction)`; the origin is the camera eye.
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.pose.position;
        let rd = (far - ro).try_normalize().unwrap_or(Vec3::NEG_Z);
        (ro, rd)
    }

    /// Camera basis vectors (right, up) used to billboard particles.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = self.pose.forward().unwrap_or(Vec3::Z);
        let right = forward.cross(self.up).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        (right, up)
    }
}
