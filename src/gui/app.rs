use super::{Config, FpsLimiter};
use crate::{Simulation, SimulationConfig};
use eframe::egui::{
    CentralPanel, Color32, ColorImage, Context, Frame, Key, Margin, Rect, TextureHandle,
    TextureOptions,
};
use std::time::Instant;
use tracing::warn;

pub struct App {
    pub(super) sim: Simulation, // owns field, raster, config and pacer
    pub(super) fill_ratio: f64, // panel-side values, pushed into `sim` once coerced
    pub(super) steps_per_tick: u32,
    pub(super) target_fps: u32,
    pub(super) texture: TextureHandle, // texture handle of the magnified field
    pub(super) life_rect: Option<Rect>, // part of the window displaying the field
    pub(super) fps_limiter: FpsLimiter, // caps the repaint rate
}

impl App {
    pub fn new(ctx: &Context) -> Self {
        let config = SimulationConfig::new(
            Config::FILL_RATIO,
            Config::STEPS_PER_TICK as usize,
            Config::TARGET_FPS as f64,
        )
        .expect("startup config is valid");
        let sim = Simulation::new(
            Config::GRID_WIDTH,
            Config::GRID_HEIGHT,
            Config::ZOOM,
            config,
        )
        .expect("startup resolution is valid");
        Self {
            sim,
            fill_ratio: Config::FILL_RATIO,
            steps_per_tick: Config::STEPS_PER_TICK,
            target_fps: Config::TARGET_FPS,
            texture: ctx.load_texture(
                "life field",
                ColorImage::default(),
                TextureOptions::default(),
            ),
            life_rect: None,
            fps_limiter: FpsLimiter::default(),
        }
    }

    /// Painting: while the left button is held over the field, the cell under
    /// the cursor goes alive, also while paused. Space toggles pause.
    fn handle_input(&mut self, ctx: &Context, life_rect: Rect) {
        ctx.input(|input| {
            if let Some(pos) = input.pointer.latest_pos() {
                if life_rect.contains(pos) && input.pointer.primary_down() {
                    let x_norm = ((pos.x - life_rect.left()) / life_rect.width()) as f64;
                    let y_norm = ((pos.y - life_rect.top()) / life_rect.height()) as f64;
                    let (x, y) = self.sim.cell_at_cursor(x_norm, y_norm);
                    if let Err(err) = self.sim.set_cell(x, y, true) {
                        warn!(%err, "painting cell failed");
                    }
                }
            }
            if input.key_pressed(Key::Space) {
                if self.sim.config().paused() {
                    self.sim.resume();
                } else {
                    self.sim.pause();
                }
            }
        });
    }

    fn update_sim(&mut self) {
        // A failed tick aborts this update only; the previous generation
        // stays on screen.
        if let Err(err) = self.sim.tick(Instant::now()) {
            warn!(%err, "tick failed");
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // full-window panel
        CentralPanel::default()
            .frame(
                Frame::default()
                    .inner_margin(Margin::same(Config::FRAME_MARGIN))
                    .fill(Color32::LIGHT_GRAY),
            )
            .show(ctx, |ui| {
                ctx.request_repaint();

                if let Some(life_rect) = self.life_rect {
                    self.handle_input(ctx, life_rect);
                }

                self.draw(ui);

                self.update_sim();
            });

        self.fps_limiter.sleep(Config::MAX_FPS);
    }
}
