//! Core value types shared across the pipeline

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::{Vec2, Vec3};

/// RGBA color, one byte per channel. `#[repr(C)]` so a color channel's
/// backing storage is byte-compatible with an RGBA8 pixel buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Weighted blend of three colors; used for barycentric interpolation.
    /// Weights are assumed non-negative and summing to ~1.
    pub fn blend3(c0: Color, c1: Color, c2: Color, w0: f32, w1: f32, w2: f32) -> Color {
        let channel = |a: u8, b: u8, c: u8| {
            (w0 * a as f32 + w1 * b as f32 + w2 * c as f32).clamp(0.0, 255.0) as u8
        };
        Color {
            r: channel(c0.r, c1.r, c2.r),
            g: channel(c0.g, c1.g, c2.g),
            b: channel(c0.b, c1.b, c2.b),
            a: channel(c0.a, c1.a, c2.a),
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A vertex: position plus reserved color and UV attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Vec3,
    pub color: Color,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(pos: Vec3, color: Color) -> Self {
        Self { pos, color, uv: Vec2::ZERO }
    }

    pub fn from_pos(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
            color: Color::WHITE,
            uv: Vec2::ZERO,
        }
    }
}

/// A triangle holding its three vertices by value. Triangle lists are owned
/// by the caller and borrowed by the framebuffer for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Vertex,
    pub v1: Vertex,
    pub v2: Vertex,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self { v0, v1, v2 }
    }

    pub fn positions(&self) -> [Vec3; 3] {
        [self.v0.pos, self.v1.pos, self.v2.pos]
    }

    /// World-space face normal; zero for a degenerate triangle
    pub fn normal(&self) -> Vec3 {
        let e1 = self.v1.pos - self.v0.pos;
        let e2 = self.v2.pos - self.v0.pos;
        e1.cross(e2).normalize()
    }
}

/// Vertical orientation of the flat pixel buffer. Row order is an explicit
/// property of the format so consumers never need to guess (the original
/// convention of flagging it with a negative bitmap height stays internal to
/// whoever blits the buffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOrder {
    /// Row 0 is the top scanline
    TopDown,
    /// Row 0 is the bottom scanline
    BottomUp,
}

/// Describes the layout of the framebuffer's composited pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    pub bytes_per_pixel: usize,
    pub row_order: RowOrder,
}

/// Per-frame display toggles for `Framebuffer::render`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Fill triangles (barycentric-interpolated vertex colors, depth tested)
    pub draw_faces: bool,
    /// Overlay wireframe edges
    pub draw_edges: bool,
    /// Overlay vertex markers
    pub draw_vertices: bool,
    pub edge_color: Color,
    pub vertex_color: Color,
    pub vertex_radius: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            draw_faces: true,
            draw_edges: false,
            draw_vertices: false,
            edge_color: Color::new(90, 90, 90),
            vertex_color: Color::GREEN,
            vertex_radius: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend3_vertex_weight() {
        let c = Color::blend3(Color::RED, Color::GREEN, Color::BLUE, 1.0, 0.0, 0.0);
        assert_eq!(c, Color::RED);
    }

    #[test]
    fn test_blend3_even_mix() {
        let c = Color::blend3(Color::WHITE, Color::WHITE, Color::BLACK, 0.5, 0.25, 0.25);
        assert_eq!(c.r, 191);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn test_triangle_normal() {
        let t = Triangle::new(
            Vertex::from_pos(0.0, 0.0, 0.0),
            Vertex::from_pos(1.0, 0.0, 0.0),
            Vertex::from_pos(0.0, 1.0, 0.0),
        );
        assert!((t.normal() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_triangle_normal_is_zero() {
        let t = Triangle::new(
            Vertex::from_pos(1.0, 1.0, 1.0),
            Vertex::from_pos(1.0, 1.0, 1.0),
            Vertex::from_pos(1.0, 1.0, 1.0),
        );
        assert_eq!(t.normal(), Vec3::ZERO);
    }
}
