//! Vector, matrix and rotation math for the software rasterizer
//!
//! Pure value types with no side effects. Every division by a length or
//! determinant is guarded: near-zero denominators produce a zero vector or
//! identity matrix instead of NaN/Inf.

mod vector;
mod matrix;
mod rotation;

pub use vector::{Vec2, Vec3, Vec4};
pub use matrix::Mat4;
pub use rotation::{Quat, Rotation};

/// Guard threshold for near-zero lengths, determinants and homogeneous w.
pub const EPSILON: f32 = 1e-6;

/// Clamp `value` into `[lo, hi]`.
///
/// Total for every input: when `lo > hi` the range is treated as collapsed
/// onto `lo`, and `lo` is returned.
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        return lo;
    }
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_basic() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inverted_range_returns_lo() {
        // Edge policy: lo wins when the range is inverted
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp(-100.0, 3.0, -3.0), 3.0);
    }
}
