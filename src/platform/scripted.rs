//! Board that replays canned input and records output
//!
//! Used for tests and headless runs: never sleeps, and once the script runs
//! out it reports a level board with the button released.

use std::collections::VecDeque;

use super::Board;
use crate::renderer::Frame;

/// One tick worth of scripted input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScriptedInput {
    pub tilt: (f32, f32),
    pub pressed: bool,
}

impl ScriptedInput {
    pub fn tilt(roll: f32, pitch: f32) -> Self {
        Self {
            tilt: (roll, pitch),
            pressed: false,
        }
    }

    pub fn press() -> Self {
        Self {
            tilt: (0.0, 0.0),
            pressed: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScriptedBoard {
    script: VecDeque<ScriptedInput>,
    current: ScriptedInput,
    /// Every frame rendered, oldest first
    pub frames: Vec<Frame>,
    /// Every banner shown, oldest first
    pub banners: Vec<String>,
    /// Total requested wait time
    pub waited: f32,
}

impl ScriptedBoard {
    pub fn new(script: impl IntoIterator<Item = ScriptedInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, input: ScriptedInput) {
        self.script.push_back(input);
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Board for ScriptedBoard {
    // Tilt is read first each tick, so it advances the script
    fn tilt(&mut self) -> (f32, f32) {
        self.current = self.script.pop_front().unwrap_or_default();
        self.current.tilt
    }

    fn action_pressed(&mut self) -> bool {
        self.current.pressed
    }

    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn show_banner(&mut self, text: &str) {
        self.banners.push(text.to_string());
    }

    fn wait(&mut self, seconds: f32) {
        self.waited += seconds;
    }
}
