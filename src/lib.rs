//! softraster: a CPU-only 3D rasterization pipeline
//!
//! World-space triangles in, depth-resolved RGBA pixels out, no GPU API:
//! - Hand-rolled vector/matrix/quaternion math
//! - Transform + perspective camera producing view/projection matrices
//! - Multi-channel framebuffer (color, depth, normal) with a resize-safe
//!   allocation lifecycle
//! - Barycentric triangle fill with z-buffer test, DDA lines, circles
//!
//! Windowing, input and presentation are external: the driver feeds camera
//! deltas and a triangle list per frame and blits the flat pixel buffer.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod camera;
pub mod channel;
pub mod context;
pub mod framebuffer;
pub mod math;
pub mod raster;
pub mod scene;
pub mod transform;
pub mod types;

pub use camera::Camera;
pub use channel::{Channel, ChannelError, ChannelKind};
pub use context::{FrameContext, FrameInput};
pub use framebuffer::{Framebuffer, FramebufferError};
pub use math::{Mat4, Quat, Rotation, Vec2, Vec3, Vec4};
pub use scene::{load_scene, load_scene_from_str, save_scene, Scene, SceneError};
pub use transform::Transform;
pub use types::{Color, PixelFormat, RenderOptions, RowOrder, Triangle, Vertex};

/// Default framebuffer dimensions
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;
