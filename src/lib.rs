//! Tilt Bauer - a tilt-controlled farming game for an LED matrix
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tractor, field, phases)
//! - `renderer`: Composites the color matrix for the LED panel
//! - `platform`: Board abstraction (tilt sensor, button, display, delay)
//! - `game`: Driver loop tying a board to the simulation
//! - `settings`: Data-driven configuration

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default tick interval in seconds
    pub const TICK_INTERVAL: f32 = 1.0;
    /// Default tilt threshold in degrees
    pub const TILT_THRESHOLD: f32 = 3.0;

    /// Field dimensions (one cell per LED)
    pub const FIELD_WIDTH: usize = 8;
    pub const FIELD_HEIGHT: usize = 8;

    /// Highest crop level that still counts as mown
    pub const MAX_MOWN: u8 = 4;
    /// Crop level at which a dot is fully grown
    pub const GROWN: u8 = 20;
    /// Exclusive upper bound of the random growth added per tick
    pub const GROWTH_STEP: u8 = 3;
    /// Mown neighbours needed before a hay ball forms
    pub const HAYBALL_NEIGHBOURS: usize = 3;

    /// Consecutive ticks a phase predicate must hold before advancing
    pub const SETTLE_TICKS: u32 = 3;
}
