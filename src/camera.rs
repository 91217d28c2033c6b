//! Camera: a transform plus perspective projection parameters

use serde::{Deserialize, Serialize};

use crate::math::{clamp, Mat4, Vec3};
use crate::transform::Transform;

/// Field of view bounds in degrees. Values outside (0, 180) produce
/// degenerate projections, so adjustments clamp into this range.
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 179.0;

/// Perspective camera. Produces view and projection matrices on demand and
/// caches nothing; the framebuffer caches derived matrices per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    transform: Transform,
    fov_deg: f32,
    near: f32,
    far: f32,
    /// Overrides width/height when building the projection matrix
    aspect_override: Option<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fov_deg: 60.0,
            near: 0.1,
            far: 1000.0,
            aspect_override: None,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Set the camera position directly (absolute, not additive). Callers
    /// compute the new position from the current transform themselves.
    pub fn move_to(&mut self, target_position: Vec3) {
        self.transform.translation = target_position;
    }

    pub fn fov(&self) -> f32 {
        self.fov_deg
    }

    pub fn set_fov(&mut self, fov_deg: f32) {
        self.fov_deg = clamp(fov_deg, MIN_FOV, MAX_FOV);
    }

    pub fn add_fov(&mut self, delta_deg: f32) {
        self.set_fov(self.fov_deg + delta_deg);
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    pub fn set_aspect_override(&mut self, aspect: Option<f32>) {
        self.aspect_override = aspect;
    }

    /// View matrix looking along the transform's forward vector
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.translation;
        Mat4::look_at(eye, eye + self.transform.forward(), Vec3::UP)
    }

    /// Projection matrix for a viewport of the given size. A zero dimension
    /// is a configuration error: logged, and the identity is returned.
    pub fn projection_matrix(&self, width: i32, height: i32) -> Mat4 {
        if width <= 0 || height <= 0 {
            log::error!("projection requested for degenerate viewport {width}x{height}");
            return Mat4::IDENTITY;
        }
        let aspect = self
            .aspect_override
            .unwrap_or(width as f32 / height as f32);
        Mat4::perspective(self.fov_deg, aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_height_projection_is_identity() {
        let cam = Camera::new();
        assert_eq!(cam.projection_matrix(640, 0), Mat4::IDENTITY);
        assert_eq!(cam.projection_matrix(0, 480), Mat4::IDENTITY);
    }

    #[test]
    fn test_fov_clamped() {
        let mut cam = Camera::new();
        cam.set_fov(500.0);
        assert_eq!(cam.fov(), MAX_FOV);
        cam.set_fov(-20.0);
        assert_eq!(cam.fov(), MIN_FOV);
        cam.add_fov(-100.0);
        assert_eq!(cam.fov(), MIN_FOV);
    }

    #[test]
    fn test_move_to_is_absolute() {
        let mut cam = Camera::new();
        cam.move_to(Vec3::new(1.0, 2.0, 3.0));
        cam.move_to(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(cam.transform().translation, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_aspect_override_used() {
        let mut cam = Camera::new();
        cam.set_aspect_override(Some(1.0));
        let square = cam.projection_matrix(200, 100);
        // With aspect forced to 1, x and y scale identically
        assert!((square.m[0][0] - square.m[1][1]).abs() < 1e-6);
    }
}
