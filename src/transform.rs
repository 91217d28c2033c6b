//! Position/rotation/scale triple with derived basis vectors

use serde::{Deserialize, Serialize};

use crate::math::{Mat4, Rotation, Vec3};

/// A rigid transform plus non-uniform scale. Basis vectors (forward/right/up)
/// derive from the rotation; forward is +z when the rotation is identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Rotation,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Rotation::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Rotation, scale: Vec3) -> Self {
        Self { translation, rotation, scale }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Transform::IDENTITY }
    }

    /// Model matrix: translate * rotate * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation(self.rotation)
            * Mat4::from_scale(self.scale)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Z)
    }

    pub fn right(&self) -> Vec3 {
        self.rotation.rotate(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;

    #[test]
    fn test_identity_basis() {
        let t = Transform::IDENTITY;
        assert!((t.forward() - Vec3::Z).length() < 1e-6);
        assert!((t.right() - Vec3::X).length() < 1e-6);
        assert!((t.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_basis_follows_rotation() {
        // Yaw 90 degrees: forward swings from +z to +x
        let t = Transform {
            rotation: Rotation::new(Vec3::Y, 90.0),
            ..Transform::IDENTITY
        };
        assert!((t.forward() - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_matrix_applies_trs_order() {
        let t = Transform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Rotation::IDENTITY,
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let p = (t.matrix() * Vec4::from_point(Vec3::new(1.0, 0.0, 0.0))).truncate();
        // Scale first, then translate
        assert!((p - Vec3::new(12.0, 0.0, 0.0)).length() < 1e-5);
    }
}
