use eframe::egui::Color32;

pub struct Config;

impl Config {
    // startup simulation parameters
    pub const GRID_WIDTH: usize = 320;
    pub const GRID_HEIGHT: usize = 240;
    pub const ZOOM: usize = 6;
    pub const FILL_RATIO: f64 = 0.5;
    pub const STEPS_PER_TICK: u32 = 1;
    pub const TARGET_FPS: u32 = 60;

    // slider bounds exposed on the control panel
    pub const STEPS_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;
    pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=144;

    /// Display repaint cap; independent of the simulation tick rate.
    pub const MAX_FPS: f64 = 144.;

    pub const FRAME_MARGIN: f32 = 20.;
    pub const CONTROL_PANEL_WIDTH: f32 = 320.;
    pub const TEXT_SIZE: f32 = 16.;
    pub const TEXT_COLOR: Color32 = Color32::BLACK;
    pub const BUTTON_STROKE_WIDTH: f32 = 3.;
    pub const BUTTON_STROKE_COLOR: Color32 = Color32::DARK_GRAY;
    pub const BUTTON_FILL_COLOR: Color32 = Color32::LIGHT_GRAY;
}
