//! Triangle, line and circle rasterization
//!
//! Drawing primitives live on `Framebuffer` (they write into its channels).
//! All primitives clamp partially-out-of-range shapes to the valid region
//! and no-op when entirely outside.

use crate::framebuffer::Framebuffer;
use crate::math::{Vec2, Vec3};
use crate::types::{Color, RenderOptions, Triangle};

/// Barycentric coordinates of point `p` relative to screen-space triangle
/// (a, b, c). The weights sum to 1 for any non-degenerate triangle; a
/// degenerate (zero-area) triangle returns (-1, -1, -1) so every pixel fails
/// the inside test.
pub fn barycentric(p: Vec2, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let d = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if d.abs() < 1e-4 {
        return Vec3::new(-1.0, -1.0, -1.0);
    }

    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / d;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / d;
    Vec3::new(u, v, 1.0 - u - v)
}

impl Framebuffer {
    /// Write a color sample without depth testing (overlays, markers)
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.color.set(x, y, color);
    }

    /// Depth-tested sample write: the color, depth and normal samples are
    /// stored only when `z` is nearer than the current depth at that pixel.
    /// Returns whether the fragment was kept.
    pub fn set_pixel_with_depth(
        &mut self,
        x: i32,
        y: i32,
        z: f32,
        color: Color,
        normal: Vec3,
    ) -> bool {
        match self.depth.get(x, y) {
            Some(current) if z < current => {
                self.depth.set(x, y, z);
                self.color.set(x, y, color);
                self.normal.set(x, y, normal);
                true
            }
            _ => false,
        }
    }

    /// Solid rectangle fill, clamped to the channel dimensions
    pub fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i32);
        let y1 = y1.min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Line segment via DDA parametrized by the greater-span axis: exactly
    /// max(|dx|, |dy|) + 1 samples are plotted. A zero-length segment plots
    /// exactly one pixel.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        // Fully-offscreen segments are rejected before the DDA loop
        if x0.max(x1) < 0
            || y0.max(y1) < 0
            || x0.min(x1) >= self.width as i32
            || y0.min(y1) >= self.height as i32
        {
            return;
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.set_pixel(x0, y0, color);
            return;
        }

        let step_x = dx as f32 / steps as f32;
        let step_y = dy as f32 / steps as f32;
        let mut x = x0 as f32;
        let mut y = y0 as f32;
        for _ in 0..=steps {
            self.set_pixel(x.round() as i32, y.round() as i32, color);
            x += step_x;
            y += step_y;
        }
    }

    /// Filled circle: every pixel of the bounding square whose squared
    /// distance from the center is <= r^2. A non-positive radius plots
    /// nothing.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius <= 0 {
            return;
        }
        // Squared distances in i64: a radius past ~46k overflows i32
        let r_sq = radius as i64 * radius as i64;
        let y0 = cy.saturating_sub(radius).max(0);
        let y1 = cy.saturating_add(radius).min(self.height as i32 - 1);
        let x0 = cx.saturating_sub(radius).max(0);
        let x1 = cx.saturating_add(radius).min(self.width as i32 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as i64 - cx as i64;
                let dy = y as i64 - cy as i64;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Project and fill one world-space triangle into the color, depth and
    /// normal channels. Skipped entirely when any vertex projects with a
    /// non-positive w (behind the camera) or when the clamped bounding box
    /// is empty. Uses the matrices cached by `update_matrices`.
    pub fn draw_triangle(&mut self, tri: &Triangle) {
        let (s0, s1, s2) = match (
            self.world_to_screen(tri.v0.pos),
            self.world_to_screen(tri.v1.pos),
            self.world_to_screen(tri.v2.pos),
        ) {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => return,
        };

        // Bounding box clamped to the viewport
        let min_x = (s0.x.min(s1.x).min(s2.x).floor() as i32).max(0);
        let max_x = (s0.x.max(s1.x).max(s2.x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (s0.y.min(s1.y).min(s2.y).floor() as i32).max(0);
        let max_y = (s0.y.max(s1.y).max(s2.y).ceil() as i32).min(self.height as i32 - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let normal = tri.normal();

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let bc = barycentric(p, s0, s1, s2);

                // Inside iff all three weights are non-negative. The weights
                // summing to 1 is an invariant of the formula, not a test.
                if bc.x < 0.0 || bc.y < 0.0 || bc.z < 0.0 {
                    continue;
                }

                let z = bc.x * s0.z + bc.y * s1.z + bc.z * s2.z;
                let color = Color::blend3(
                    tri.v0.color,
                    tri.v1.color,
                    tri.v2.color,
                    bc.x,
                    bc.y,
                    bc.z,
                );
                self.set_pixel_with_depth(x, y, z, color, normal);
            }
        }
    }

    /// Render a borrowed triangle list: recompute the frame matrices, then
    /// rasterize each triangle (filled faces, plus optional wireframe edges
    /// and vertex markers).
    pub fn render(&mut self, triangles: &[Triangle], options: &RenderOptions) {
        self.update_matrices();

        for tri in triangles {
            if options.draw_faces {
                self.draw_triangle(tri);
            }

            if options.draw_edges || options.draw_vertices {
                let projected = [
                    self.world_to_screen(tri.v0.pos),
                    self.world_to_screen(tri.v1.pos),
                    self.world_to_screen(tri.v2.pos),
                ];
                let (Some(a), Some(b), Some(c)) = (projected[0], projected[1], projected[2])
                else {
                    continue;
                };
                let pts = [
                    (a.x.round() as i32, a.y.round() as i32),
                    (b.x.round() as i32, b.y.round() as i32),
                    (c.x.round() as i32, c.y.round() as i32),
                ];

                if options.draw_edges {
                    for i in 0..3 {
                        let (x0, y0) = pts[i];
                        let (x1, y1) = pts[(i + 1) % 3];
                        self.draw_line(x0, y0, x1, y1, options.edge_color);
                    }
                }
                if options.draw_vertices {
                    for (x, y) in pts {
                        self.draw_circle(x, y, options.vertex_radius, options.vertex_color);
                    }
                }
            }
        }
    }
}
