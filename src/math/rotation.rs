//! Quaternion and axis-angle rotation representations
//!
//! Angles are degrees everywhere in the public contract.

use serde::{Deserialize, Serialize};

use super::{clamp, EPSILON, Mat4, Vec3};

/// Unit quaternion (w is the real part)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Build from a rotation axis and an angle in radians. The axis is
    /// normalized; a zero axis yields the identity quaternion.
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        let half = radians / 2.0;
        let s = half.sin();
        Quat::new(half.cos(), axis.x * s, axis.y * s, axis.z * s).normalize()
    }

    pub fn length(self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(self) -> Quat {
        let l = self.length();
        if l < EPSILON {
            return Quat::IDENTITY;
        }
        Quat::new(self.w / l, self.x / l, self.y / l, self.z / l)
    }

    /// Imaginary (vector) part
    pub fn imaginary(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotate a vector: v' = v + 2w(q x v) + 2(q x (q x v))
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = self.imaginary();
        let t = qv.cross(v).scale(2.0);
        v + t.scale(self.w) + qv.cross(t)
    }

    /// Rotation matrix for this quaternion (assumed unit length)
    pub fn to_mat4(self) -> Mat4 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        Mat4::new([
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - w * z),
                2.0 * (x * z + w * y),
                0.0,
            ],
            [
                2.0 * (x * y + w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - w * x),
                0.0,
            ],
            [
                2.0 * (x * z - w * y),
                2.0 * (y * z + w * x),
                1.0 - 2.0 * (x * x + y * y),
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

/// Axis + angle rotation. The axis is unit length after construction and the
/// angle is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    axis: Vec3,
    angle_deg: f32,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation { axis: Vec3::X, angle_deg: 0.0 };

    /// Build from an axis and an angle in degrees. A degenerate (zero-length)
    /// axis resolves to the identity rotation rather than propagating NaN.
    pub fn new(axis: Vec3, angle_deg: f32) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Rotation::IDENTITY;
        }
        Rotation { axis, angle_deg }
    }

    /// Recover axis and angle from a quaternion. The real part is clamped to
    /// [-1, 1] before acos; a near-zero imaginary part means no rotation and
    /// resolves to the identity.
    pub fn from_quat(q: Quat) -> Self {
        let q = q.normalize();
        let len = q.imaginary().length();
        if len < EPSILON {
            return Rotation::IDENTITY;
        }
        let half = clamp(q.w, -1.0, 1.0).acos();
        Rotation::new(q.imaginary().scale(1.0 / len), (2.0 * half).to_degrees())
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn angle(&self) -> f32 {
        self.angle_deg
    }

    pub fn inverse(&self) -> Rotation {
        Rotation { axis: self.axis, angle_deg: -self.angle_deg }
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle_deg.to_radians())
    }

    /// Rotate a vector by this rotation
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.to_quat().rotate(v)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::IDENTITY
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3}) @ {:.2}",
            self.axis.x, self.axis.y, self.axis.z, self.angle_deg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_axis_is_identity() {
        let r = Rotation::new(Vec3::ZERO, 45.0);
        assert_eq!(r.angle(), 0.0);
        assert!((r.axis().length() - 1.0).abs() < 1e-6);
        assert!(!r.axis().x.is_nan());
    }

    #[test]
    fn test_axis_normalized_on_construction() {
        let r = Rotation::new(Vec3::new(0.0, 10.0, 0.0), 90.0);
        assert!((r.axis().length() - 1.0).abs() < 1e-6);
        assert_eq!(r.angle(), 90.0);
    }

    #[test]
    fn test_quat_round_trip() {
        let r = Rotation::new(Vec3::new(0.0, 1.0, 0.0), 72.0);
        let back = Rotation::from_quat(r.to_quat());
        assert!((back.angle() - 72.0).abs() < 0.001);
        assert!((back.axis() - r.axis()).length() < 0.001);
    }

    #[test]
    fn test_identity_quat_round_trip() {
        let back = Rotation::from_quat(Quat::IDENTITY);
        assert_eq!(back.angle(), 0.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // 90 degrees around Y takes +Z to +X
        let r = Rotation::new(Vec3::Y, 90.0);
        let v = r.rotate(Vec3::Z);
        assert!((v.x - 1.0).abs() < 1e-4);
        assert!(v.y.abs() < 1e-4 && v.z.abs() < 1e-4);
    }

    #[test]
    fn test_rotation_matrix_matches_quat_rotate() {
        let r = Rotation::new(Vec3::new(1.0, 1.0, 0.0), 33.0);
        let v = Vec3::new(0.3, -0.7, 2.0);
        let by_quat = r.rotate(v);
        let by_mat = (Mat4::from_rotation(r) * crate::math::Vec4::from_point(v)).truncate();
        assert!((by_quat - by_mat).length() < 1e-4);
    }
}
