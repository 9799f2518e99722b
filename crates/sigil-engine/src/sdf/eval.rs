use crate::coords::Vec2;
use crate::frame::{mat3_from_gpu, FramePacket, ShapeData, KIND_CIRCLE, KIND_RECT};
use crate::paint::Color;

use super::primitive;

/// Distances at or below this count as solidly inside in the AA variant
/// (local units).
const SOLID_THRESHOLD: f32 = -0.001;

/// Distances within this of zero count as on the boundary even when both
/// derivatives are degenerate (local units).
const BOUNDARY_THRESHOLD: f32 = 0.001;

/// An axis whose pixel step to the boundary would exceed this is treated as
/// degenerate (derivative ~0, field locally flat along that axis).
const STEP_LIMIT: f32 = 16_777_216.0; // 2^24

/// Edge coverage offsets shorter than this in scene units resolve to pure
/// black (sub-pixel edge marker).
const EDGE_BLACK_THRESHOLD: f32 = 0.1;

/// Scene-space extent of one pixel step along each screen axis.
///
/// Stands in for the hardware's adjacent-invocation differencing: the AA
/// evaluator re-samples the field at `point + dx` and `point + dy`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelFootprint {
    pub dx: Vec2,
    pub dy: Vec2,
}

impl PixelFootprint {
    /// Footprint of a `width` x `height` target under the packet's camera
    /// mapping (clip space spans 2 units per axis).
    pub fn from_packet(packet: &FramePacket, width: u32, height: u32) -> Self {
        let camera = mat3_from_gpu(&packet.constants.camera);
        Self {
            dx: camera.transform_vector(Vec2::new(2.0 / width.max(1) as f32, 0.0)),
            dy: camera.transform_vector(Vec2::new(0.0, 2.0 / height.max(1) as f32)),
        }
    }
}

/// Signed distance from a scene-space point to one packed shape.
///
/// Unknown kinds and out-of-range payloads return the boundary sentinel 0.
fn shape_distance(packet: &FramePacket, shape: &ShapeData, scene_point: Vec2) -> f32 {
    let local = mat3_from_gpu(&shape.inv_transform).transform_point(scene_point);

    match shape.kind {
        KIND_CIRCLE => match packet.circles.get(shape.payload as usize) {
            Some(c) => primitive::circle(local, c.radius),
            None => 0.0,
        },
        KIND_RECT => match packet.rects.get(shape.payload as usize) {
            Some(r) => primitive::rect(local, Vec2::new(r.half_extent[0], r.half_extent[1])),
            None => 0.0,
        },
        _ => 0.0,
    }
}

/// Evaluates one pixel, hard inside/outside test.
///
/// First shape in stored order with distance <= 0 wins; no hit resolves to
/// the background. Mirrors the shader's `fs_main`.
pub fn composite(packet: &FramePacket, point: Vec2) -> Color {
    let count = packet.constants.shape_count as usize;
    for shape in packet.shapes.iter().take(count) {
        if shape_distance(packet, shape, point) <= 0.0 {
            return Color::from_array(shape.color);
        }
    }
    Color::from_array(packet.constants.background)
}

/// Evaluates one pixel with derivative-based edge handling.
///
/// Mirrors the shader's `fs_main_aa`: solidly-inside pixels take the shape
/// color immediately; pixels within a pixel step of the boundary resolve to
/// either the shape color or pure black depending on the scene-space size of
/// the estimated coverage offset. Degenerate derivatives contribute zero
/// instead of dividing, so no NaN or Inf escapes for any input.
pub fn composite_aa(packet: &FramePacket, point: Vec2, footprint: PixelFootprint) -> Color {
    let count = packet.constants.shape_count as usize;
    for shape in packet.shapes.iter().take(count) {
        let d = shape_distance(packet, shape, point);

        if d <= SOLID_THRESHOLD {
            return Color::from_array(shape.color);
        }

        // Forward differences over one pixel step, like hardware dpdx/dpdy.
        let dpx = shape_distance(packet, shape, point + footprint.dx) - d;
        let dpy = shape_distance(packet, shape, point + footprint.dy) - d;

        // Pixel steps to the boundary per axis. The comparison form keeps
        // zero and non-finite derivatives out of the division.
        let x_ok = d.abs() < dpx.abs() * STEP_LIMIT;
        let y_ok = d.abs() < dpy.abs() * STEP_LIMIT;
        let sx = if x_ok { (d / dpx).abs() } else { 0.0 };
        let sy = if y_ok { (d / dpy).abs() } else { 0.0 };

        let in_band = (x_ok && sx <= 1.0) || (y_ok && sy <= 1.0) || d.abs() <= BOUNDARY_THRESHOLD;
        if !in_band {
            continue;
        }

        // Coverage offset: degenerate axes are already zeroed; with both
        // axes live, blend them by relative magnitude.
        let s = Vec2::new(sx, sy);
        let offset = if x_ok && y_ok {
            let len2 = s.length_squared();
            if len2 > 0.0 { s * (sx * sy / len2) } else { Vec2::zero() }
        } else {
            s
        };

        // Scene-space size of the offset, direction only (translation
        // discarded by the vector transform).
        let scene_offset = mat3_from_gpu(&shape.transform).transform_vector(offset);
        return if scene_offset.length() < EDGE_BLACK_THRESHOLD {
            Color::BLACK
        } else {
            Color::from_array(shape.color)
        };
    }
    Color::from_array(packet.constants.background)
}

/// Rasterizes the packet to a small RGBA grid through the camera mapping,
/// hard-test variant. Row 0 is the top of the image.
///
/// Reference path for tests and offline inspection, not a performance path.
pub fn render_to(packet: &FramePacket, width: u32, height: u32) -> Vec<Color> {
    render_grid(packet, width, height, |packet, point, _| composite(packet, point))
}

/// Like [`render_to`] with the anti-aliased evaluator.
pub fn render_to_aa(packet: &FramePacket, width: u32, height: u32) -> Vec<Color> {
    render_grid(packet, width, height, composite_aa)
}

fn render_grid(
    packet: &FramePacket,
    width: u32,
    height: u32,
    eval: impl Fn(&FramePacket, Vec2, PixelFootprint) -> Color,
) -> Vec<Color> {
    let camera = mat3_from_gpu(&packet.constants.camera);
    let footprint = PixelFootprint::from_packet(packet, width, height);

    let mut out = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            // Pixel centers; clip +Y is up, image rows go down.
            let clip = Vec2::new(
                (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
                1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
            );
            out.push(eval(packet, camera.transform_point(clip), footprint));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Camera2, Mat3};
    use crate::scene::{Shape, SceneList};

    const RED: Color = Color::opaque(1.0, 0.0, 0.0);
    const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
    const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);

    fn packet_of(shapes: &[Shape]) -> FramePacket {
        let mut scene = SceneList::new();
        for &s in shapes {
            scene.push(s);
        }
        FramePacket::pack(&mut scene, &Camera2::new().with_fov_y(20.0), 1.0, BLUE)
    }

    fn unit_footprint() -> PixelFootprint {
        // 100x100 pixels over a 20-unit fov: 0.2 scene units per pixel.
        PixelFootprint {
            dx: Vec2::new(0.2, 0.0),
            dy: Vec2::new(0.0, -0.2),
        }
    }

    // ── basic variant ──────────────────────────────────────────────────────

    #[test]
    fn identity_red_circle_on_blue_background() {
        let packet = packet_of(&[Shape::circle(1.0).with_color(RED)]);

        assert_eq!(composite(&packet, Vec2::new(0.0, 0.0)), RED);
        assert_eq!(composite(&packet, Vec2::new(5.0, 5.0)), BLUE);
        // Boundary counts as inside for the hard test.
        assert_eq!(composite(&packet, Vec2::new(1.0, 0.0)), RED);
    }

    #[test]
    fn first_packed_shape_occludes_later_ones() {
        // Equal layer: the later push paints in front and packs first.
        let packet = packet_of(&[
            Shape::circle(2.0).with_color(GREEN),
            Shape::circle(1.0).with_color(RED),
        ]);

        assert_eq!(packet.shapes[0].color, RED.to_array());
        assert_eq!(composite(&packet, Vec2::zero()), RED);
        // Only the larger circle covers (0, 1.5).
        assert_eq!(composite(&packet, Vec2::new(0.0, 1.5)), GREEN);
    }

    #[test]
    fn background_is_exact() {
        let packet = packet_of(&[Shape::circle(0.5).with_color(RED)]);
        assert_eq!(composite(&packet, Vec2::new(9.0, 9.0)), BLUE);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let packet = packet_of(&[
            Shape::circle(1.0).with_color(RED),
            Shape::rect(3.0, 1.0).with_color(GREEN),
        ]);

        for p in [Vec2::zero(), Vec2::new(1.2, 0.1), Vec2::new(-4.0, 2.0)] {
            assert_eq!(composite(&packet, p), composite(&packet, p));
            assert_eq!(
                composite_aa(&packet, p, unit_footprint()),
                composite_aa(&packet, p, unit_footprint())
            );
        }
    }

    #[test]
    fn transformed_rect_contains_its_moved_center() {
        let shape = Shape::rect(2.0, 1.0)
            .with_transform(Mat3::translate(4.0, 4.0) * Mat3::rotate(0.5))
            .with_color(GREEN);
        let packet = packet_of(&[shape]);

        assert_eq!(composite(&packet, Vec2::new(4.0, 4.0)), GREEN);
        assert_eq!(composite(&packet, Vec2::zero()), BLUE);
    }

    #[test]
    fn unknown_kinds_stay_on_the_boundary() {
        let mut packet = packet_of(&[Shape::circle(1.0).with_color(RED)]);
        packet.shapes[0].kind = 7;

        // Sentinel distance 0 means the hard test hits everywhere.
        assert_eq!(composite(&packet, Vec2::new(50.0, 50.0)), RED);
        // The AA variant sees a flat field: boundary band, zero offset, black.
        assert_eq!(
            composite_aa(&packet, Vec2::new(50.0, 50.0), unit_footprint()),
            Color::BLACK
        );
    }

    #[test]
    fn shape_count_limits_the_scan() {
        let mut packet = packet_of(&[Shape::circle(1.0).with_color(RED)]);
        packet.constants.shape_count = 0;

        assert_eq!(composite(&packet, Vec2::zero()), BLUE);
    }

    // ── anti-aliased variant ───────────────────────────────────────────────

    #[test]
    fn aa_interior_and_exterior_match_the_basic_variant() {
        let packet = packet_of(&[Shape::circle(1.0).with_color(RED)]);

        assert_eq!(composite_aa(&packet, Vec2::zero(), unit_footprint()), RED);
        assert_eq!(
            composite_aa(&packet, Vec2::new(5.0, 5.0), unit_footprint()),
            BLUE
        );
    }

    #[test]
    fn aa_boundary_resolves_to_shape_color_or_black() {
        let packet = packet_of(&[Shape::circle(1.0).with_color(RED)]);

        let got = composite_aa(&packet, Vec2::new(1.0, 0.0), unit_footprint());
        assert!(got == RED || got == Color::BLACK, "got {got:?}");

        // Half a pixel outside: in band, coverage offset is a readable
        // fraction of a scene unit, so the shape color wins.
        assert_eq!(
            composite_aa(&packet, Vec2::new(1.1, 0.0), unit_footprint()),
            RED
        );
    }

    #[test]
    fn aa_degenerate_axis_emits_no_nan() {
        // Midpoint of the rect's right edge: the field is flat along y
        // (dpdy == 0) and d == 0, the worst case for the guard.
        let packet = packet_of(&[Shape::rect(2.0, 2.0).with_color(GREEN)]);
        let got = composite_aa(&packet, Vec2::new(1.0, 0.0), unit_footprint());

        assert!(got.is_finite());
        assert!(got == GREEN || got == BLUE || got == Color::BLACK, "got {got:?}");
    }

    #[test]
    fn aa_zero_footprint_emits_no_nan() {
        // Both derivatives vanish; every axis must be treated as degenerate.
        let packet = packet_of(&[Shape::circle(1.0).with_color(RED)]);
        let zero = PixelFootprint {
            dx: Vec2::zero(),
            dy: Vec2::zero(),
        };

        for p in [Vec2::new(1.0, 0.0), Vec2::new(0.9995, 0.0), Vec2::zero()] {
            let got = composite_aa(&packet, p, zero);
            assert!(got.is_finite());
            assert!(got == RED || got == BLUE || got == Color::BLACK, "got {got:?}");
        }
    }

    #[test]
    fn aa_sub_pixel_edges_mark_black() {
        // A circle a fiftieth of a pixel wide: the band still catches it, but
        // the coverage offset maps to a microscopic scene length.
        let shape = Shape::circle(1.0)
            .with_transform(Mat3::scale(1e-2, 1e-2))
            .with_color(RED);
        let packet = packet_of(&[shape]);
        assert_eq!(packet.constants.shape_count, 1);

        let got = composite_aa(&packet, Vec2::new(0.011, 0.0), unit_footprint());
        assert_eq!(got, Color::BLACK);
    }

    // ── grid rendering ─────────────────────────────────────────────────────

    #[test]
    fn render_to_reproduces_the_scenario_through_the_camera() {
        // 20-unit fov across 10 pixels: pixel centers land on odd scene
        // coordinates; (0, 0) is not sampled, so probe near-center pixels.
        let packet = packet_of(&[Shape::circle(3.0).with_color(RED)]);
        let grid = render_to(&packet, 10, 10);

        let at = |x: usize, y: usize| grid[y * 10 + x];
        // Pixel (5, 5) center maps to scene (1, -1): inside radius 3.
        assert_eq!(at(5, 5), RED);
        // Corner pixel (0, 0) maps to scene (-9, 9): background.
        assert_eq!(at(0, 0), BLUE);
    }

    #[test]
    fn render_to_aa_keeps_every_pixel_finite() {
        let packet = packet_of(&[
            Shape::circle(3.0).with_color(RED),
            Shape::rect(4.0, 2.0).with_color(GREEN),
        ]);

        for c in render_to_aa(&packet, 16, 16) {
            assert!(c.is_finite());
        }
    }
}
