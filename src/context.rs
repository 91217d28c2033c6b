//! Per-frame render/input context
//!
//! One explicit object owned by the driving loop and passed by reference to
//! every frame step, instead of process-wide key-state booleans and a global
//! camera speed.

use crate::framebuffer::Framebuffer;
use crate::math::Vec3;
use crate::types::RenderOptions;

/// Camera-control deltas collected by the input layer for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Movement direction in camera-local axes (x = right, y = up,
    /// z = forward), unscaled
    pub move_dir: Vec3,
    /// Field-of-view delta in degrees (e.g. from a scroll wheel)
    pub fov_delta: f32,
}

impl FrameInput {
    pub fn reset(&mut self) {
        *self = FrameInput::default();
    }
}

/// Frame context: input deltas, camera speed and display options
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Camera translation speed in world units per second
    pub camera_speed: f32,
    pub options: RenderOptions,
    pub input: FrameInput,
}

impl FrameContext {
    pub fn new() -> Self {
        Self {
            camera_speed: 10.0,
            options: RenderOptions::default(),
            input: FrameInput::default(),
        }
    }

    /// Apply this frame's input to the framebuffer's camera and reset the
    /// input. The local move direction is mapped through the camera basis
    /// vectors into a new absolute position for `Camera::move_to`.
    pub fn apply(&mut self, fb: &mut Framebuffer, dt: f32) {
        let camera = fb.camera_mut();
        let xform = camera.transform();

        if self.input.move_dir != Vec3::ZERO {
            let dir = self.input.move_dir;
            let offset = xform.right() * dir.x + xform.up() * dir.y + xform.forward() * dir.z;
            let target = xform.translation + offset * (self.camera_speed * dt);
            camera.move_to(target);
        }

        if self.input.fov_delta != 0.0 {
            camera.add_fov(self.input.fov_delta);
        }

        self.input.reset();
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        FrameContext::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_moves_along_basis() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        let start = fb.camera().transform().translation;

        let mut ctx = FrameContext::new();
        ctx.camera_speed = 2.0;
        ctx.input.move_dir = Vec3::new(0.0, 0.0, 1.0); // forward
        ctx.apply(&mut fb, 0.5);

        let pos = fb.camera().transform().translation;
        // Identity rotation: forward is +z, speed * dt = 1 unit
        assert!((pos - (start + Vec3::Z)).length() < 1e-5);
        // Input is consumed
        assert_eq!(ctx.input, FrameInput::default());
    }

    #[test]
    fn test_apply_fov_delta_clamped() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        let mut ctx = FrameContext::new();
        ctx.input.fov_delta = 500.0;
        ctx.apply(&mut fb, 0.016);
        assert_eq!(fb.camera().fov(), crate::camera::MAX_FOV);
    }
}
