//! Driver loop
//!
//! Owns the simulation and the board and runs one tick at a time:
//! sense, update, render, phase check, wait.

use crate::platform::Board;
use crate::renderer::compose;
use crate::settings::Settings;
use crate::sim::{Bauer, GameEvent, TickInput, advance_phase, tick};

/// Game instance holding all state
pub struct Game<B: Board> {
    pub state: Bauer,
    pub board: B,
    interval_secs: f32,
    autopilot: bool,
}

impl<B: Board> Game<B> {
    pub fn new(board: B, settings: &Settings) -> Self {
        Self {
            state: Bauer::new(settings),
            board,
            interval_secs: settings.interval_secs,
            autopilot: settings.autopilot,
        }
    }

    /// Run one tick. Returns false once the game has said goodbye.
    pub fn step(&mut self) -> bool {
        self.flush_events();

        let input = TickInput {
            tilt: self.board.tilt(),
            abort: self.board.action_pressed(),
            autopilot: self.autopilot,
        };

        tick(&mut self.state, &input);
        self.board.render(&compose(&self.state));
        advance_phase(&mut self.state);
        self.flush_events();

        if self.state.is_over() {
            return false;
        }
        self.board.wait(self.interval_secs);
        true
    }

    /// Tick until the player quits
    pub fn run(&mut self) {
        log::info!("Game running (autopilot: {})", self.autopilot);
        while self.step() {}
    }

    /// Tick until the player quits or `max_ticks` have run.
    /// Returns the number of ticks executed.
    pub fn run_for(&mut self, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while ticks < max_ticks {
            ticks += 1;
            if !self.step() {
                break;
            }
        }
        ticks
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Banner(text) => self.board.show_banner(text),
                GameEvent::PhaseChanged { from, to } => {
                    log::debug!("Phase {:?} -> {:?} at tick {}", from, to, self.state.time_ticks);
                }
            }
        }
    }
}
