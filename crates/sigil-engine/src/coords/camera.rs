use super::{Mat3, Vec2};

/// Visible scene extent of a camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fov {
    /// Fixed height in scene units; width follows the target aspect ratio.
    Y(f32),
    /// Fixed width and height in scene units (target aspect is ignored).
    XY(f32, f32),
}

impl Fov {
    /// Full visible extent as `(width, height)` for the given aspect ratio.
    #[inline]
    pub fn extent(self, aspect: f32) -> (f32, f32) {
        match self {
            Fov::Y(y) => (y * aspect, y),
            Fov::XY(x, y) => (x, y),
        }
    }
}

/// 2D camera: a placement in scene space plus a visible extent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera2 {
    /// Camera placement (scene-space position/orientation of the view center).
    pub pose: Mat3,
    pub fov: Fov,
}

impl Camera2 {
    pub const fn new() -> Self {
        Self {
            pose: Mat3::identity(),
            fov: Fov::Y(1.0),
        }
    }

    pub const fn with_fov_y(mut self, fov_y: f32) -> Self {
        self.fov = Fov::Y(fov_y);
        self
    }

    pub const fn with_fov_xy(mut self, fov_x: f32, fov_y: f32) -> Self {
        self.fov = Fov::XY(fov_x, fov_y);
        self
    }

    pub const fn with_pose(mut self, pose: Mat3) -> Self {
        self.pose = pose;
        self
    }

    #[inline]
    pub fn with_position(self, position: Vec2) -> Self {
        self.with_pose(Mat3::translate(position.x, position.y))
    }

    /// Matrix mapping clip-space positions to scene-space sample points.
    ///
    /// Clip space spans `[-1, 1]` on both axes, so the fov is halved to make
    /// it the full visible extent.
    pub fn scene_from_clip(&self, aspect: f32) -> Mat3 {
        let (fov_x, fov_y) = self.fov.extent(aspect);
        self.pose * Mat3::scale(fov_x * 0.5, fov_y * 0.5)
    }
}

impl Default for Camera2 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_eq(a: Vec2, b: Vec2) {
        assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn fov_y_follows_aspect() {
        let m = Camera2::new().with_fov_y(10.0).scene_from_clip(2.0);

        // Clip corner (1, 1) lands on the visible half extent: 20x10 scene
        // units across the whole target.
        assert_vec2_eq(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn fov_xy_ignores_aspect() {
        let m = Camera2::new().with_fov_xy(8.0, 6.0).scene_from_clip(3.0);
        assert_vec2_eq(m.transform_point(Vec2::new(1.0, -1.0)), Vec2::new(4.0, -3.0));
    }

    #[test]
    fn pose_recenters_the_view() {
        let cam = Camera2::new().with_fov_y(2.0).with_position(Vec2::new(3.0, -7.0));
        let m = cam.scene_from_clip(1.0);
        assert_vec2_eq(m.transform_point(Vec2::zero()), Vec2::new(3.0, -7.0));
    }
}
