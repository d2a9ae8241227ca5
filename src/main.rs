//! Tilt Bauer entry point
//!
//! Runs the game in a terminal. Pass a settings JSON file as the first
//! argument; without one the default settings are used with the autopilot on,
//! since a terminal has no tilt sensor.

use std::path::PathBuf;

use tilt_bauer::platform::TerminalBoard;
use tilt_bauer::{Game, Settings};

fn main() {
    env_logger::init();
    log::info!("Tilt Bauer starting...");

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => Settings {
            autopilot: true,
            ..Settings::default()
        },
    };
    log::info!("Settings: {:?}", settings);

    let mut game = Game::new(TerminalBoard::new(), &settings);
    game.run();
}
