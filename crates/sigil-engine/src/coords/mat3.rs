use core::ops::Mul;

use super::Vec2;

/// Determinant threshold below which a transform is treated as singular.
const DET_EPSILON: f32 = 1.0e-6;

/// Row-major 3x3 matrix for 2D affine transforms in homogeneous coordinates.
///
/// Points transform as column vectors: `p' = M * (x, y, 1)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]],
        }
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            m: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Counter-clockwise rotation, in radians.
    #[inline]
    pub fn rotate(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            m: [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Transforms a point (translation applies).
    #[inline]
    pub fn transform_point(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2],
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2],
        )
    }

    /// Transforms a direction (translation is discarded).
    #[inline]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y,
            self.m[1][0] * v.x + self.m[1][1] * v.y,
        )
    }

    /// Inverts the affine transform. Returns `None` when the linear part
    /// is singular (the bottom row is assumed to be `0 0 1`).
    pub fn inverse(&self) -> Option<Self> {
        let a = self.m[0][0];
        let b = self.m[0][1];
        let c = self.m[1][0];
        let d = self.m[1][1];
        let tx = self.m[0][2];
        let ty = self.m[1][2];

        let det = a * d - b * c;
        if det.abs() < DET_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let m00 = d * inv_det;
        let m01 = -b * inv_det;
        let m10 = -c * inv_det;
        let m11 = a * inv_det;
        let m02 = -(m00 * tx + m01 * ty);
        let m12 = -(m10 * tx + m11 * ty);

        Some(Self {
            m: [[m00, m01, m02], [m10, m11, m12], [0.0, 0.0, 1.0]],
        })
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut out = Mat3 { m: [[0.0; 3]; 3] };
        for r in 0..3 {
            for c in 0..3 {
                out.m[r][c] = self.m[r][0] * rhs.m[0][c]
                    + self.m[r][1] * rhs.m[1][c]
                    + self.m[r][2] * rhs.m[2][c];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_eq(a: Vec2, b: Vec2) {
        assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5, "{a:?} != {b:?}");
    }

    // ── constructors ────────────────────────────────────────────────────────

    #[test]
    fn identity_leaves_points_untouched() {
        let p = Vec2::new(3.5, -2.0);
        assert_vec2_eq(Mat3::identity().transform_point(p), p);
    }

    #[test]
    fn translate_moves_points_not_vectors() {
        let m = Mat3::translate(2.0, -1.0);
        assert_vec2_eq(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(3.0, 0.0));
        assert_vec2_eq(m.transform_vector(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn rotate_quarter_turn() {
        let m = Mat3::rotate(core::f32::consts::FRAC_PI_2);
        assert_vec2_eq(m.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
    }

    // ── composition ─────────────────────────────────────────────────────────

    #[test]
    fn composition_applies_right_to_left() {
        // Scale first, then translate.
        let m = Mat3::translate(10.0, 0.0) * Mat3::scale(2.0, 2.0);
        assert_vec2_eq(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
    }

    // ── inverse ─────────────────────────────────────────────────────────────

    #[test]
    fn inverse_round_trips() {
        let m = Mat3::translate(3.0, -4.0) * Mat3::rotate(0.7) * Mat3::scale(2.0, 0.5);
        let inv = m.inverse().unwrap();

        let p = Vec2::new(-1.5, 2.25);
        assert_vec2_eq(inv.transform_point(m.transform_point(p)), p);
        assert_vec2_eq(m.transform_point(inv.transform_point(p)), p);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Mat3::scale(0.0, 1.0).inverse().is_none());
    }
}
