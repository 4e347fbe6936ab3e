mod error;
mod field;
mod gui;
mod magnify;
mod seed;
mod sim;

pub use error::{Error, Result};
pub use field::Field;
pub use gui::{App, Config};
pub use magnify::{expand, expand_blocks, PixelBuffer};
pub use seed::BEACON_CELLS;
pub use sim::{Simulation, SimulationConfig, TickPacer};
