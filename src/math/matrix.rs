//! 4x4 matrix
//!
//! Row-major storage with column-vector convention: `M * v` transforms `v`,
//! and composition reads right to left (`proj * view * model`).

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::{EPSILON, Rotation, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn new(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn from_translation(t: Vec3) -> Self {
        let mut out = Mat4::IDENTITY;
        out.m[0][3] = t.x;
        out.m[1][3] = t.y;
        out.m[2][3] = t.z;
        out
    }

    pub fn from_scale(s: Vec3) -> Self {
        let mut out = Mat4::IDENTITY;
        out.m[0][0] = s.x;
        out.m[1][1] = s.y;
        out.m[2][2] = s.z;
        out
    }

    pub fn from_rotation(r: Rotation) -> Self {
        r.to_quat().to_mat4()
    }

    /// Left-handed look-at view matrix: the camera looks down +z in view
    /// space. Degenerate inputs (eye == target, or up parallel to the view
    /// direction) fall back to the identity.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        if forward == Vec3::ZERO {
            return Mat4::IDENTITY;
        }
        let right = up.cross(forward).normalize();
        if right == Vec3::ZERO {
            return Mat4::IDENTITY;
        }
        let up = forward.cross(right);

        Mat4::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [forward.x, forward.y, forward.z, -forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Left-handed perspective projection mapping view depth [near, far] to
    /// NDC depth [0, 1]. `fov_deg` is the vertical field of view in degrees.
    /// Degenerate parameters (fov outside (0, 180), non-positive aspect,
    /// far <= near) produce the identity.
    pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        if fov_deg <= 0.0 || fov_deg >= 180.0 || aspect <= EPSILON || far - near <= EPSILON {
            log::warn!(
                "degenerate projection parameters (fov {fov_deg}, aspect {aspect}, near {near}, far {far}), using identity"
            );
            return Mat4::IDENTITY;
        }

        let t = 1.0 / (fov_deg.to_radians() / 2.0).tan();
        let range = far / (far - near);

        Mat4::new([
            [t / aspect, 0.0, 0.0, 0.0],
            [0.0, t, 0.0, 0.0],
            [0.0, 0.0, range, -range * near],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    pub fn transpose(self) -> Mat4 {
        let mut out = Mat4::IDENTITY;
        for r in 0..4 {
            for c in 0..4 {
                out.m[r][c] = self.m[c][r];
            }
        }
        out
    }

    /// General inverse by cofactor expansion. A singular matrix (determinant
    /// near zero) inverts to the identity instead of producing Inf/NaN.
    pub fn inverse(self) -> Mat4 {
        // Flatten row-major; cofactors computed on the flat layout
        let mut a = [0.0f32; 16];
        for r in 0..4 {
            for c in 0..4 {
                a[r * 4 + c] = self.m[r][c];
            }
        }

        let mut inv = [0.0f32; 16];

        inv[0] = a[5] * a[10] * a[15] - a[5] * a[11] * a[14] - a[9] * a[6] * a[15]
            + a[9] * a[7] * a[14] + a[13] * a[6] * a[11] - a[13] * a[7] * a[10];
        inv[4] = -a[4] * a[10] * a[15] + a[4] * a[11] * a[14] + a[8] * a[6] * a[15]
            - a[8] * a[7] * a[14] - a[12] * a[6] * a[11] + a[12] * a[7] * a[10];
        inv[8] = a[4] * a[9] * a[15] - a[4] * a[11] * a[13] - a[8] * a[5] * a[15]
            + a[8] * a[7] * a[13] + a[12] * a[5] * a[11] - a[12] * a[7] * a[9];
        inv[12] = -a[4] * a[9] * a[14] + a[4] * a[10] * a[13] + a[8] * a[5] * a[14]
            - a[8] * a[6] * a[13] - a[12] * a[5] * a[10] + a[12] * a[6] * a[9];
        inv[1] = -a[1] * a[10] * a[15] + a[1] * a[11] * a[14] + a[9] * a[2] * a[15]
            - a[9] * a[3] * a[14] - a[13] * a[2] * a[11] + a[13] * a[3] * a[10];
        inv[5] = a[0] * a[10] * a[15] - a[0] * a[11] * a[14] - a[8] * a[2] * a[15]
            + a[8] * a[3] * a[14] + a[12] * a[2] * a[11] - a[12] * a[3] * a[10];
        inv[9] = -a[0] * a[9] * a[15] + a[0] * a[11] * a[13] + a[8] * a[1] * a[15]
            - a[8] * a[3] * a[13] - a[12] * a[1] * a[11] + a[12] * a[3] * a[9];
        inv[13] = a[0] * a[9] * a[14] - a[0] * a[10] * a[13] - a[8] * a[1] * a[14]
            + a[8] * a[2] * a[13] + a[12] * a[1] * a[10] - a[12] * a[2] * a[9];
        inv[2] = a[1] * a[6] * a[15] - a[1] * a[7] * a[14] - a[5] * a[2] * a[15]
            + a[5] * a[3] * a[14] + a[13] * a[2] * a[7] - a[13] * a[3] * a[6];
        inv[6] = -a[0] * a[6] * a[15] + a[0] * a[7] * a[14] + a[4] * a[2] * a[15]
            - a[4] * a[3] * a[14] - a[12] * a[2] * a[7] + a[12] * a[3] * a[6];
        inv[10] = a[0] * a[5] * a[15] - a[0] * a[7] * a[13] - a[4] * a[1] * a[15]
            + a[4] * a[3] * a[13] + a[12] * a[1] * a[7] - a[12] * a[3] * a[5];
        inv[14] = -a[0] * a[5] * a[14] + a[0] * a[6] * a[13] + a[4] * a[1] * a[14]
            - a[4] * a[2] * a[13] - a[12] * a[1] * a[6] + a[12] * a[2] * a[5];
        inv[3] = -a[1] * a[6] * a[11] + a[1] * a[7] * a[10] + a[5] * a[2] * a[11]
            - a[5] * a[3] * a[10] - a[9] * a[2] * a[7] + a[9] * a[3] * a[6];
        inv[7] = a[0] * a[6] * a[11] - a[0] * a[7] * a[10] - a[4] * a[2] * a[11]
            + a[4] * a[3] * a[10] + a[8] * a[2] * a[7] - a[8] * a[3] * a[6];
        inv[11] = -a[0] * a[5] * a[11] + a[0] * a[7] * a[9] + a[4] * a[1] * a[11]
            - a[4] * a[3] * a[9] - a[8] * a[1] * a[7] + a[8] * a[3] * a[5];
        inv[15] = a[0] * a[5] * a[10] - a[0] * a[6] * a[9] - a[4] * a[1] * a[10]
            + a[4] * a[2] * a[9] + a[8] * a[1] * a[6] - a[8] * a[2] * a[5];

        let det = a[0] * inv[0] + a[1] * inv[4] + a[2] * inv[8] + a[3] * inv[12];
        if det.abs() < EPSILON {
            return Mat4::IDENTITY;
        }

        let mut out = Mat4::IDENTITY;
        for r in 0..4 {
            for c in 0..4 {
                out.m[r][c] = inv[r * 4 + c] / det;
            }
        }
        out
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = Mat4::new([[0.0; 4]; 4]);
        for r in 0..4 {
            for c in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.m[r][k] * rhs.m[k][c];
                }
                out.m[r][c] = sum;
            }
        }
        out
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let row = |r: usize| Vec4::new(self.m[r][0], self.m[r][1], self.m[r][2], self.m[r][3]);
        Vec4::new(row(0).dot(v), row(1).dot(v), row(2).dot(v), row(3).dot(v))
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            writeln!(
                f,
                "[{:8.3} {:8.3} {:8.3} {:8.3}]",
                self.m[r][0], self.m[r][1], self.m[r][2], self.m[r][3]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_mat(a: Mat4, b: Mat4, eps: f32) -> bool {
        (0..4).all(|r| (0..4).all(|c| (a.m[r][c] - b.m[r][c]).abs() < eps))
    }

    #[test]
    fn test_identity_mul() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(approx_mat(t * Mat4::IDENTITY, t, 1e-6));
        assert!(approx_mat(Mat4::IDENTITY * t, t, 1e-6));
    }

    #[test]
    fn test_translation_transforms_point() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = t * Vec4::from_point(Vec3::new(10.0, 0.0, -5.0));
        assert_eq!(p.truncate(), Vec3::new(11.0, 2.0, -2.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = Mat4::from_translation(Vec3::new(3.0, -1.0, 7.0))
            * Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        let prod = m * m.inverse();
        assert!(approx_mat(prod, Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn test_singular_inverse_is_identity() {
        let singular = Mat4::from_scale(Vec3::ZERO);
        assert!(approx_mat(singular.inverse(), Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = Mat4::perspective(60.0, 1.0, 0.1, 100.0);
        // A point on the near plane projects to NDC depth 0
        let near = proj * Vec4::new(0.0, 0.0, 0.1, 1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        // A point on the far plane projects to NDC depth 1
        let far = proj * Vec4::new(0.0, 0.0, 100.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_degenerate_is_identity() {
        assert!(approx_mat(Mat4::perspective(0.0, 1.0, 0.1, 100.0), Mat4::IDENTITY, 1e-6));
        assert!(approx_mat(Mat4::perspective(60.0, 0.0, 0.1, 100.0), Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_look_at_centers_target() {
        let eye = Vec3::new(0.0, 0.0, -25.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let p = view * Vec4::from_point(Vec3::ZERO);
        // The target lands on the view axis, 25 units ahead
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
        assert!((p.z - 25.0).abs() < 1e-4);
    }
}
