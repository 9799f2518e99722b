//! Animated demo scene for the shape compositor.
//!
//! Orbiting circles over a slowly rotating bar, boxed in by a static frame of
//! wall rects. Set `SIGIL_AA=off` to watch the hard inside/outside variant
//! instead of the derivative-based edges.

use anyhow::Result;
use winit::dpi::LogicalSize;

use sigil_engine::coords::{Camera2, Mat3, Vec2};
use sigil_engine::core::{App, AppControl, FrameCtx};
use sigil_engine::device::GpuInit;
use sigil_engine::logging::{init_logging, LoggingConfig};
use sigil_engine::paint::Color;
use sigil_engine::render::{AaMode, SceneCompositor};
use sigil_engine::scene::{Layer, SceneList, Shape};
use sigil_engine::window::{Runtime, RuntimeConfig};

const BACKGROUND: Color = Color::new(0.10, 0.10, 0.13, 1.0);
const WALL: Color = Color::opaque(0.32, 0.34, 0.40);
const BAR: Color = Color::opaque(0.20, 0.55, 0.33);

const ORBIT_RADIUS: f32 = 3.4;
const ORBITER_COUNT: usize = 6;

struct Viewer {
    compositor: SceneCompositor,
    scene: SceneList,
    camera: Camera2,
    elapsed: f32,
}

impl Viewer {
    fn new(aa_mode: AaMode) -> Self {
        Self {
            compositor: SceneCompositor::new().with_aa_mode(aa_mode),
            scene: SceneList::new(),
            camera: Camera2::new().with_fov_y(12.0),
            elapsed: 0.0,
        }
    }

    /// Rebuilds the whole scene for the current time; the list is cheap to
    /// refill and keeps no GPU state.
    fn rebuild_scene(&mut self) {
        let t = self.elapsed;
        self.scene.clear();

        // Static frame of walls at the back.
        let walls = Layer::new(-1);
        for (w, h, x, y) in [
            (11.0, 0.4, 0.0, 5.0),
            (11.0, 0.4, 0.0, -5.0),
            (0.4, 10.4, -5.3, 0.0),
            (0.4, 10.4, 5.3, 0.0),
        ] {
            self.scene.push(
                Shape::rect(w, h)
                    .with_position(Vec2::new(x, y))
                    .with_color(WALL)
                    .with_layer(walls),
            );
        }

        // Rotating bar in the middle.
        self.scene.push(
            Shape::rect(5.0, 1.4)
                .with_transform(Mat3::rotate(t * 0.4))
                .with_color(BAR),
        );

        // Orbiting circles in front, tinted around the ring.
        let front = Layer::new(1);
        for i in 0..ORBITER_COUNT {
            let phase = t * 0.9 + i as f32 / ORBITER_COUNT as f32 * core::f32::consts::TAU;
            let tint = i as f32 / ORBITER_COUNT as f32;
            self.scene.push(
                Shape::circle(0.55)
                    .with_position(Vec2::new(phase.cos(), phase.sin()) * ORBIT_RADIUS)
                    .with_color(Color::opaque(0.9 - 0.5 * tint, 0.25, 0.35 + 0.55 * tint))
                    .with_layer(front),
            );
        }
    }
}

impl App for Viewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.elapsed += ctx.time.dt;
        self.rebuild_scene();

        let (compositor, scene, camera) = (&mut self.compositor, &mut self.scene, &self.camera);
        ctx.render(|rctx, target| {
            compositor.render(rctx, target, scene, camera, BACKGROUND);
        })
    }
}

fn aa_mode_from_env() -> AaMode {
    match std::env::var("SIGIL_AA") {
        Ok(v) if v.eq_ignore_ascii_case("off") => AaMode::Off,
        _ => AaMode::Derivative,
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let aa_mode = aa_mode_from_env();
    log::info!("starting viewer ({aa_mode:?} edges)");

    Runtime::run(
        RuntimeConfig {
            title: "sigil viewer".to_string(),
            initial_size: LogicalSize::new(900.0, 700.0),
        },
        GpuInit::default(),
        Viewer::new(aa_mode),
    )
}
