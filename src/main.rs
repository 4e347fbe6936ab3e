#![warn(clippy::all)]

fn main() {
    use eframe::egui::{vec2, ViewportBuilder};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size(vec2(1280., 800.))
            .with_min_inner_size(vec2(640.0, 360.0)),
        follow_system_theme: false,
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };
    eframe::run_native(
        "Game of Life on a torus",
        options,
        Box::new(move |cc| Ok(Box::new(life_torus::App::new(&cc.egui_ctx)))),
    )
    .unwrap();
}
