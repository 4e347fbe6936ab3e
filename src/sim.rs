use std::time::Instant;

use tracing::{debug, info};

use crate::{expand, Error, Field, PixelBuffer, Result};

/// Grids at least this large step through the rayon kernel.
const PARALLEL_CUTOFF: usize = 1 << 14;

/// Tunable simulation parameters, mutated only through [`Simulation`]
/// setters. Out-of-contract values are rejected, never clamped; coercing a
/// continuous slider value to a valid integer is the control panel's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    fill_ratio: f64,
    steps_per_tick: usize,
    target_fps: f64,
    paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fill_ratio: 0.5,
            steps_per_tick: 1,
            target_fps: 60.0,
            paused: false,
        }
    }
}

impl SimulationConfig {
    pub fn new(fill_ratio: f64, steps_per_tick: usize, target_fps: f64) -> Result<Self> {
        let config = Self {
            fill_ratio,
            steps_per_tick,
            target_fps,
            paused: false,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fill_ratio) {
            return Err(Error::InvalidConfig {
                reason: format!("fill_ratio {} outside [0, 1]", self.fill_ratio),
            });
        }
        if self.steps_per_tick == 0 {
            return Err(Error::InvalidConfig {
                reason: "steps_per_tick must be positive".to_string(),
            });
        }
        if !self.target_fps.is_finite() || self.target_fps <= 0.0 {
            return Err(Error::InvalidConfig {
                reason: format!("target_fps {} must be positive and finite", self.target_fps),
            });
        }
        Ok(())
    }

    /// Dead-bias threshold used when reseeding: cells go alive when a random
    /// draw exceeds it, so higher values mean a sparser grid.
    pub fn fill_ratio(&self) -> f64 {
        self.fill_ratio
    }

    pub fn steps_per_tick(&self) -> usize {
        self.steps_per_tick
    }

    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    pub fn paused(&self) -> bool {
        self.paused
    }
}

/// Non-blocking rate gate decoupling simulation cadence from display
/// refresh. Poll it every frame; it answers `true` at most once per
/// `1 / target_rate` seconds and never sleeps.
#[derive(Debug, Default)]
pub struct TickPacer {
    last_tick: Option<Instant>,
}

impl TickPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first call after construction fires immediately.
    pub fn request_tick(&mut self, now: Instant, target_rate: f64) -> bool {
        if let Some(last) = self.last_tick {
            if now.duration_since(last).as_secs_f64() < 1.0 / target_rate {
                return false;
            }
        }
        self.last_tick = Some(now);
        true
    }
}

/// Owns the whole pipeline state: the double-buffered field, the magnified
/// raster, the config and the pacer. One instance per simulation; there is
/// no ambient global state.
pub struct Simulation {
    field: Field,
    pixels: PixelBuffer,
    config: SimulationConfig,
    pacer: TickPacer,
    zoom: usize,
    generation: u64,
}

impl Simulation {
    /// Allocates the field and pixel buffer for a fixed resolution, reseeds
    /// with `config.fill_ratio` and renders the first frame. Resolution and
    /// zoom stay fixed for the simulation's lifetime.
    pub fn new(width: usize, height: usize, zoom: usize, config: SimulationConfig) -> Result<Self> {
        Self::with_seed(width, height, zoom, config, None)
    }

    /// Like [`Simulation::new`] with an explicit RNG seed, for reproducible
    /// runs.
    pub fn with_seed(
        width: usize,
        height: usize,
        zoom: usize,
        config: SimulationConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        config.validate()?;
        if zoom == 0 {
            return Err(Error::InvalidConfig {
                reason: "zoom must be positive".to_string(),
            });
        }
        let mut field = Field::blank(width, height);
        field.randomize(seed, config.fill_ratio)?;
        let pixels = PixelBuffer::for_field(&field, zoom);
        let mut sim = Self {
            field,
            pixels,
            config,
            pacer: TickPacer::new(),
            zoom,
            generation: 0,
        };
        sim.render()?;
        info!(width, height, zoom, "simulation created");
        Ok(sim)
    }

    pub fn size(&self) -> (usize, usize) {
        self.field.size()
    }

    pub fn zoom(&self) -> usize {
        self.zoom
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Magnified raster of the last rendered generation.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Writes one cell of the current generation and re-renders. Must not be
    /// called while a tick is in flight; the single-owner model makes that
    /// structural. Fails with [`Error::OutOfRange`] off-grid, leaving field
    /// and raster untouched.
    pub fn set_cell(&mut self, x: usize, y: usize, state: bool) -> Result<()> {
        self.field.set(x, y, state)?;
        self.render()
    }

    /// Maps a normalized cursor position in `[0, 1]^2` to its grid cell.
    pub fn cell_at_cursor(&self, x_norm: f64, y_norm: f64) -> (usize, usize) {
        let (w, h) = self.field.size();
        let x = ((x_norm * w as f64).floor() as usize).min(w - 1);
        let y = ((y_norm * h as f64).floor() as usize).min(h - 1);
        (x, y)
    }

    /// Throws the whole field away and refills it at the configured fill
    /// ratio; the generation counter restarts at zero.
    pub fn reseed(&mut self, seed: Option<u64>) -> Result<()> {
        self.field.randomize(seed, self.config.fill_ratio)?;
        self.generation = 0;
        info!(fill_ratio = self.config.fill_ratio, "field reseeded");
        self.render()
    }

    pub fn pause(&mut self) {
        self.config.paused = true;
        debug!("simulation paused");
    }

    pub fn resume(&mut self) {
        self.config.paused = false;
        debug!("simulation resumed");
    }

    pub fn set_fill_ratio(&mut self, fill_ratio: f64) -> Result<()> {
        let mut config = self.config;
        config.fill_ratio = fill_ratio;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_steps_per_tick(&mut self, steps_per_tick: usize) -> Result<()> {
        let mut config = self.config;
        config.steps_per_tick = steps_per_tick;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_target_fps(&mut self, target_fps: f64) -> Result<()> {
        let mut config = self.config;
        config.target_fps = target_fps;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// One pacer-gated opportunity to advance. When the gate opens and the
    /// simulation is running, steps `steps_per_tick` generations and
    /// re-renders; otherwise does nothing. Returns whether it advanced.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if self.config.paused {
            return Ok(false);
        }
        if !self.pacer.request_tick(now, self.config.target_fps) {
            return Ok(false);
        }
        let steps = self.config.steps_per_tick;
        let (w, h) = self.field.size();
        if w * h >= PARALLEL_CUTOFF {
            self.field.update_par(steps);
        } else {
            self.field.update(steps);
        }
        self.generation += steps as u64;
        self.render()?;
        Ok(true)
    }

    /// Rebuilds the magnified raster from the current generation.
    pub fn render(&mut self) -> Result<()> {
        expand(&self.field, self.zoom, &mut self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pacer_fires_at_most_once_per_period() {
        let mut pacer = TickPacer::new();
        let t0 = Instant::now();
        assert!(pacer.request_tick(t0, 10.0));
        assert!(!pacer.request_tick(t0 + Duration::from_millis(50), 10.0));
        assert!(pacer.request_tick(t0 + Duration::from_millis(150), 10.0));
        assert!(!pacer.request_tick(t0 + Duration::from_millis(160), 10.0));
    }

    #[test]
    fn config_rejects_out_of_contract_values() {
        assert!(matches!(
            SimulationConfig::new(1.5, 1, 60.0),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            SimulationConfig::new(0.5, 0, 60.0),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            SimulationConfig::new(0.5, 1, 0.0),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(SimulationConfig::new(0.0, 1000, 144.0).is_ok());
    }

    #[test]
    fn setters_keep_previous_config_on_error() {
        let config = SimulationConfig::default();
        let mut sim = Simulation::with_seed(16, 16, 2, config, Some(1)).unwrap();
        assert!(sim.set_fill_ratio(-0.1).is_err());
        assert_eq!(sim.config().fill_ratio(), 0.5);
        assert!(sim.set_steps_per_tick(0).is_err());
        assert_eq!(sim.config().steps_per_tick(), 1);
        assert!(sim.set_target_fps(f64::NAN).is_err());
        assert_eq!(sim.config().target_fps(), 60.0);
    }

    #[test]
    fn paused_tick_does_not_advance() {
        let config = SimulationConfig::default();
        let mut sim = Simulation::with_seed(16, 16, 2, config, Some(7)).unwrap();
        sim.pause();
        let before = sim.field().cells().to_vec();
        assert!(!sim.tick(Instant::now()).unwrap());
        assert_eq!(sim.field().cells(), &before[..]);
        assert_eq!(sim.generation(), 0);

        sim.resume();
        assert!(sim.tick(Instant::now()).unwrap());
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn cursor_maps_to_grid_coordinates() {
        let config = SimulationConfig::default();
        let sim = Simulation::with_seed(320, 240, 2, config, Some(0)).unwrap();
        assert_eq!(sim.cell_at_cursor(0.0, 0.0), (0, 0));
        assert_eq!(sim.cell_at_cursor(0.5, 0.5), (160, 120));
        // 1.0 lands exactly on the far edge and is coerced onto the grid
        assert_eq!(sim.cell_at_cursor(1.0, 1.0), (319, 239));
    }

    #[test]
    fn failed_edit_leaves_state_unchanged() {
        let config = SimulationConfig::default();
        let mut sim = Simulation::with_seed(16, 16, 2, config, Some(3)).unwrap();
        let cells = sim.field().cells().to_vec();
        let pixels = sim.pixels().data().to_vec();
        assert!(matches!(
            sim.set_cell(16, 0, true),
            Err(Error::OutOfRange { .. })
        ));
        assert_eq!(sim.field().cells(), &cells[..]);
        assert_eq!(sim.pixels().data(), &pixels[..]);
    }
}
