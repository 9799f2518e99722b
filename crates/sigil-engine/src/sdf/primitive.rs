use crate::coords::Vec2;

/// Signed distance from `p` to a circle of `radius` centered at the origin.
///
/// Negative inside, positive outside, zero on the boundary.
#[inline]
pub fn circle(p: Vec2, radius: f32) -> f32 {
    p.length() - radius
}

/// Signed distance from `p` to an axis-aligned box of `half_extent` centered
/// at the origin.
///
/// Exact outside; inside it is the (negative) distance along the nearer axis.
#[inline]
pub fn rect(p: Vec2, half_extent: Vec2) -> f32 {
    let d = p.abs() - half_extent;
    d.max(Vec2::zero()).length() + d.x.max(d.y).min(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    // ── circle ─────────────────────────────────────────────────────────────

    #[test]
    fn circle_sign_matches_containment() {
        assert!(circle(Vec2::zero(), 1.0) < 0.0);
        assert!(circle(Vec2::new(0.5, 0.5), 1.0) < 0.0);
        assert!(circle(Vec2::new(1.0, 0.0), 1.0).abs() < EPS);
        assert!(circle(Vec2::new(2.0, 0.0), 1.0) > 0.0);
    }

    #[test]
    fn circle_distance_is_euclidean() {
        assert!((circle(Vec2::new(3.0, 4.0), 1.0) - 4.0).abs() < EPS);
        assert!((circle(Vec2::zero(), 2.0) + 2.0).abs() < EPS);
    }

    // ── rect ───────────────────────────────────────────────────────────────

    #[test]
    fn rect_sign_matches_containment() {
        let h = Vec2::new(2.0, 1.0);
        assert!(rect(Vec2::zero(), h) < 0.0);
        assert!(rect(Vec2::new(1.9, 0.9), h) < 0.0);
        assert!(rect(Vec2::new(2.0, 0.0), h).abs() < EPS);
        assert!(rect(Vec2::new(0.0, 1.0), h).abs() < EPS);
        assert!(rect(Vec2::new(3.0, 0.0), h) > 0.0);
    }

    #[test]
    fn rect_outside_corner_is_euclidean() {
        // 3-4-5 triangle off the (2, 1) corner.
        let d = rect(Vec2::new(5.0, 5.0), Vec2::new(2.0, 1.0));
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn rect_inside_uses_nearer_axis() {
        // 0.25 from the top edge, 2.0 from the sides.
        let d = rect(Vec2::new(0.0, 0.75), Vec2::new(2.0, 1.0));
        assert!((d + 0.25).abs() < EPS);
    }
}
