//! Perspective camera shared by every layer of the scene.
//!
//! The camera always looks down -Z; parallax only translates the eye. The
//! projection matrix is cached and recomputed when the aspect changes.

use crate::constants::{FOV_Y_DEGREES, Z_FAR, Z_NEAR};
use crate::viewport::Viewport;
use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub up: Vec3,
    aspect: f32,
    fovy_radians: f32,
    znear: f32,
    zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn perspective(viewport: Viewport, camera_z: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::new(0.0, 0.0, camera_z),
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: FOV_Y_DEGREES.to_radians(),
            znear: Z_NEAR,
            zfar: Z_FAR,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy_radians
    }

    #[inline]
    pub fn near_far(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    pub fn set_aspect(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
        self.update_projection();
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, Vec3::NEG_Z, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Exponentially approach `target`. Returns the distance moved.
    pub fn damp_toward(&mut self, target: Vec3, damping: f32) -> f32 {
        let step = (target - self.eye) * damping.clamp(0.0, 1.0);
        self.eye += step;
        step.length()
    }
}
