use super::{App, Config};
use eframe::egui::{
    load::SizedTexture, vec2, Button, ColorImage, Image, RichText, Slider, Stroke, TextureFilter,
    TextureOptions, TextureWrapMode, Ui,
};
use tracing::warn;

impl App {
    fn new_text(text: &str) -> RichText {
        RichText::new(text)
            .color(Config::TEXT_COLOR)
            .size(Config::TEXT_SIZE)
    }

    fn new_button(text: &str) -> Button {
        Button::new(Self::new_text(text))
            .fill(Config::BUTTON_FILL_COLOR)
            .stroke(Stroke::new(
                Config::BUTTON_STROKE_WIDTH,
                Config::BUTTON_STROKE_COLOR,
            ))
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        if ui.add(Self::new_button("Reset!")).clicked() {
            if let Err(err) = self.sim.reseed(None) {
                warn!(%err, "reseed failed");
            }
        }

        ui.horizontal(|ui| {
            ui.label(Self::new_text("Fill ratio: "));
            ui.add(Slider::new(&mut self.fill_ratio, 0.0..=1.0));
        });

        ui.horizontal(|ui| {
            let paused = self.sim.config().paused();
            if ui.add_enabled(!paused, Self::new_button("Pause!")).clicked() {
                self.sim.pause();
            }
            if ui.add_enabled(paused, Self::new_button("Play!")).clicked() {
                self.sim.resume();
            }
        });

        // Integer sliders coerce the continuous drag value before it ever
        // reaches a simulation setter.
        ui.horizontal(|ui| {
            ui.label(Self::new_text("Step: "));
            ui.add(Slider::new(&mut self.steps_per_tick, Config::STEPS_RANGE));
        });

        ui.horizontal(|ui| {
            ui.label(Self::new_text("FPS: "));
            ui.add(Slider::new(&mut self.target_fps, Config::FPS_RANGE));
        });

        self.push_panel_values();

        ui.label(Self::new_text(&format!(
            "\nGeneration: {}",
            self.sim.generation()
        )));

        ui.label(Self::new_text(&format!(
            "Display FPS: {:3}",
            self.fps_limiter.fps().round() as u32
        )));
    }

    fn push_panel_values(&mut self) {
        if self.fill_ratio != self.sim.config().fill_ratio() {
            if let Err(err) = self.sim.set_fill_ratio(self.fill_ratio) {
                warn!(%err, "rejected fill ratio");
            }
        }
        if self.steps_per_tick as usize != self.sim.config().steps_per_tick() {
            if let Err(err) = self.sim.set_steps_per_tick(self.steps_per_tick as usize) {
                warn!(%err, "rejected steps per tick");
            }
        }
        if self.target_fps as f64 != self.sim.config().target_fps() {
            if let Err(err) = self.sim.set_target_fps(self.target_fps as f64) {
                warn!(%err, "rejected target fps");
            }
        }
    }

    fn draw_life_field(&mut self, ui: &mut Ui, size: eframe::egui::Vec2) {
        let (w, h) = self.sim.pixels().size();
        let gray = self
            .sim
            .pixels()
            .data()
            .iter()
            .map(|&v| (v * u8::MAX as f32) as u8)
            .collect::<Vec<_>>();

        let ci = ColorImage::from_gray([w, h], &gray);
        let texture_options = TextureOptions {
            magnification: TextureFilter::Nearest,
            minification: TextureFilter::Linear,
            wrap_mode: TextureWrapMode::ClampToEdge,
        };
        self.texture.set(ci, texture_options);

        let source = SizedTexture::new(self.texture.id(), size);
        let response = ui.add(Image::from_texture(source));
        self.life_rect.replace(response.rect);
    }

    pub fn draw(&mut self, ui: &mut Ui) {
        let area = ui.available_size();

        // fit the field into the space left of the control panel,
        // preserving its aspect ratio
        let (w, h) = self.sim.pixels().size();
        let aspect = w as f32 / h as f32;
        let max_w = area.x - Config::CONTROL_PANEL_WIDTH - Config::FRAME_MARGIN;
        let field_w = max_w.min(area.y * aspect);
        let field_size = vec2(field_w, field_w / aspect);

        ui.horizontal(|ui| {
            ui.group(|ui| {
                ui.vertical(|ui| {
                    self.draw_controls(ui);

                    // to adjust the bounds
                    ui.add_space(
                        (Config::CONTROL_PANEL_WIDTH - area.x + ui.available_width()).max(0.),
                    );
                });
            });

            ui.add_space(ui.available_width() - field_size.x);

            ui.vertical_centered(|ui| {
                self.draw_life_field(ui, field_size);
            });
        });
    }
}
