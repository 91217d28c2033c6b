//! Framebuffer: camera + channel set + per-frame matrix cache
//!
//! Owns the color/depth/normal channels and the camera, orchestrates the
//! per-frame lifecycle (clear -> matrix update -> triangle submission, see
//! `raster`), and exposes the composited color channel as a flat pixel
//! buffer for presentation.

use crate::camera::Camera;
use crate::channel::{Channel, ChannelError, ChannelKind};
use crate::math::{Mat4, Vec3, Vec4, EPSILON};
use crate::transform::Transform;
use crate::types::{Color, PixelFormat, RowOrder};

#[derive(Debug)]
pub enum FramebufferError {
    /// Rejected resize: a minimized window can report a zero client area
    InvalidSize { width: i32, height: i32 },
    /// Backing memory for a channel could not be obtained
    Alloc(ChannelError),
}

impl From<ChannelError> for FramebufferError {
    fn from(e: ChannelError) -> Self {
        FramebufferError::Alloc(e)
    }
}

impl std::fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FramebufferError::InvalidSize { width, height } => {
                write!(f, "invalid framebuffer size {width}x{height}")
            }
            FramebufferError::Alloc(e) => write!(f, "allocation failed: {e}"),
        }
    }
}

impl std::error::Error for FramebufferError {}

pub struct Framebuffer {
    pub(crate) width: usize,
    pub(crate) height: usize,

    camera: Camera,
    model: Transform,
    background: Color,

    pub(crate) color: Channel<Color>,
    pub(crate) depth: Channel<f32>,
    pub(crate) normal: Channel<Vec3>,

    // Matrices cached per frame by update_matrices()
    view: Mat4,
    proj: Mat4,
    mvp: Mat4,
    mvp_inverse: Mat4,
}

impl Framebuffer {
    /// Allocate a framebuffer. The camera starts at (0, 0, -25) looking
    /// toward +z. A zero dimension is rejected, same as `set_size`.
    pub fn new(width: usize, height: usize) -> Result<Self, FramebufferError> {
        if width == 0 || height == 0 {
            return Err(FramebufferError::InvalidSize {
                width: width as i32,
                height: height as i32,
            });
        }

        let mut camera = Camera::new();
        camera.set_transform(Transform::from_translation(Vec3::new(0.0, 0.0, -25.0)));

        let background = Color::BLACK;
        let mut fb = Self {
            width,
            height,
            color: Channel::with_size(ChannelKind::Color, width, height, background)?,
            depth: Channel::with_size(ChannelKind::Depth, width, height, camera.far())?,
            normal: Channel::with_size(ChannelKind::Normal, width, height, Vec3::ZERO)?,
            camera,
            model: Transform::IDENTITY,
            background,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            mvp: Mat4::IDENTITY,
            mvp_inverse: Mat4::IDENTITY,
        };
        fb.update_matrices();
        Ok(fb)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn model(&self) -> Transform {
        self.model
    }

    pub fn set_model(&mut self, model: Transform) {
        self.model = model;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Resize all channels. Width or height <= 0 is rejected and the
    /// previous valid buffers stay intact; likewise if any allocation fails.
    /// Every channel is allocated before any is committed, so channel
    /// dimensions always match the framebuffer dimensions exactly.
    ///
    /// Resizing during a render call cannot happen: `render` holds the
    /// exclusive `&mut self` borrow for its full duration.
    pub fn set_size(&mut self, width: i32, height: i32) -> Result<(), FramebufferError> {
        if width <= 0 || height <= 0 {
            log::warn!("rejecting framebuffer resize to {width}x{height}");
            return Err(FramebufferError::InvalidSize { width, height });
        }
        let (w, h) = (width as usize, height as usize);

        let color = Channel::with_size(ChannelKind::Color, w, h, self.background)?;
        let depth = Channel::with_size(ChannelKind::Depth, w, h, self.camera.far())?;
        let normal = Channel::with_size(ChannelKind::Normal, w, h, Vec3::ZERO)?;

        self.color = color;
        self.depth = depth;
        self.normal = normal;
        self.width = w;
        self.height = h;
        Ok(())
    }

    /// Reset every channel to its background value. The depth channel clears
    /// to the camera's far clip distance so any visible fragment compares as
    /// nearer.
    pub fn clear(&mut self) {
        self.color.set_clear_value(self.background);
        self.depth.set_clear_value(self.camera.far());
        self.color.clear();
        self.depth.clear();
        self.normal.clear();
    }

    /// Recompute the cached View/Projection/Model/MVP matrices from the
    /// current camera and model transform. `render` calls this; call it
    /// directly before projecting points outside a render call.
    pub fn update_matrices(&mut self) {
        self.view = self.camera.view_matrix();
        self.proj = self
            .camera
            .projection_matrix(self.width as i32, self.height as i32);
        self.mvp = self.proj * self.view * self.model.matrix();
        self.mvp_inverse = self.mvp.inverse();
    }

    /// Project a world-space point to screen space: MVP multiply,
    /// perspective divide, then NDC [-1,1] mapped to pixels with +y down
    /// (rows are stored top to bottom, so NDC y is inverted here).
    ///
    /// Returns None when the projected w is non-positive (point behind the
    /// camera or at the eye). Points outside the viewport still project;
    /// bounds checking is the rasterizer's job.
    pub fn world_to_screen(&self, p: Vec3) -> Option<Vec3> {
        let clip = self.mvp * Vec4::from_point(p);
        if clip.w <= EPSILON {
            return None;
        }
        let ndc = Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
        Some(Vec3::new(
            (ndc.x + 1.0) * self.width as f32 / 2.0,
            (1.0 - ndc.y) * self.height as f32 / 2.0,
            ndc.z,
        ))
    }

    /// Unproject a screen pixel plus depth back to a world-space point.
    /// Exact left-inverse of `world_to_screen` for points with w > 0.
    pub fn screen_to_world(&self, x: f32, y: f32, depth: f32) -> Vec3 {
        let ndc = Vec4::new(
            2.0 * x / self.width as f32 - 1.0,
            1.0 - 2.0 * y / self.height as f32,
            depth,
            1.0,
        );
        let world = self.mvp_inverse * ndc;
        if world.w.abs() < EPSILON {
            return Vec3::ZERO;
        }
        world.truncate().scale(1.0 / world.w)
    }

    /// Flat RGBA8 pixel buffer of the composited color channel, row-major,
    /// top row first. Layout metadata comes from `format()`.
    pub fn pixels(&self) -> &[u8] {
        self.color.bytes()
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat {
            bytes_per_pixel: 4,
            row_order: RowOrder::TopDown,
        }
    }

    // Diagnostic accessors for on-screen overlays
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.proj
    }

    pub fn mvp_matrix(&self) -> Mat4 {
        self.mvp
    }

    pub fn color_channel(&self) -> &Channel<Color> {
        &self.color
    }

    pub fn depth_channel(&self) -> &Channel<f32> {
        &self.depth
    }

    pub fn normal_channel(&self) -> &Channel<Vec3> {
        &self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(matches!(
            Framebuffer::new(0, 48),
            Err(FramebufferError::InvalidSize { .. })
        ));
        assert!(matches!(
            Framebuffer::new(64, 0),
            Err(FramebufferError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_set_size_rejects_degenerate() {
        let mut fb = Framebuffer::new(64, 48).unwrap();
        assert!(fb.set_size(0, 48).is_err());
        assert!(fb.set_size(64, -5).is_err());
        // Previous valid buffers stay intact
        assert_eq!(fb.width(), 64);
        assert_eq!(fb.height(), 48);
        assert_eq!(fb.color_channel().width(), 64);
        assert_eq!(fb.depth_channel().height(), 48);
    }

    #[test]
    fn test_resize_idempotent() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_size(20, 15).unwrap();
        fb.set_size(20, 15).unwrap();
        assert_eq!(fb.width(), 20);
        assert_eq!(fb.height(), 15);
        for ch_dims in [
            (fb.color_channel().width(), fb.color_channel().height()),
            (fb.depth_channel().width(), fb.depth_channel().height()),
            (fb.normal_channel().width(), fb.normal_channel().height()),
        ] {
            assert_eq!(ch_dims, (20, 15));
        }
        // Resize clears: depth is back at the far clip everywhere
        let far = fb.camera().far();
        assert!(fb.depth_channel().samples().iter().all(|&d| d == far));
    }

    #[test]
    fn test_clear_resets_channels() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.set_background(Color::BLUE);
        fb.clear();
        assert_eq!(fb.color_channel().get(3, 3), Some(Color::BLUE));
        assert_eq!(fb.depth_channel().get(3, 3), Some(fb.camera().far()));
        assert_eq!(fb.normal_channel().get(3, 3), Some(Vec3::ZERO));
    }

    #[test]
    fn test_pixel_buffer_format() {
        let fb = Framebuffer::new(4, 2).unwrap();
        let format = fb.format();
        assert_eq!(format.bytes_per_pixel, 4);
        assert_eq!(format.row_order, RowOrder::TopDown);
        assert_eq!(fb.pixels().len(), 4 * 2 * 4);
    }

    #[test]
    fn test_world_screen_round_trip() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.update_matrices();

        for p in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-1.5, 2.0, 3.0),
            Vec3::new(4.0, -3.0, 10.0),
        ] {
            let s = fb.world_to_screen(p).expect("point in front of camera");
            let back = fb.screen_to_world(s.x, s.y, s.z);
            assert!(
                (back - p).length() < 1e-2,
                "round trip {p:?} -> {s:?} -> {back:?}"
            );
        }
    }

    #[test]
    fn test_behind_camera_rejected() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.update_matrices();
        // Camera sits at z = -25 looking toward +z
        assert!(fb.world_to_screen(Vec3::new(0.0, 0.0, -50.0)).is_none());
    }

    #[test]
    fn test_offscreen_point_still_projects() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.update_matrices();
        let s = fb
            .world_to_screen(Vec3::new(1000.0, 0.0, 0.0))
            .expect("in front of camera");
        assert!(s.x > 100.0);
    }
}
