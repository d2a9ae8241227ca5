//! Platform abstraction layer
//!
//! Everything the game needs from the hardware:
//! - Tilt sensor (roll/pitch in degrees)
//! - Action button
//! - LED matrix and scrolling banner
//! - Delay between ticks

pub mod scripted;
pub mod terminal;

pub use scripted::ScriptedBoard;
pub use terminal::TerminalBoard;

use crate::renderer::Frame;

/// Hardware collaborator. All calls are blocking and fire-and-forget.
pub trait Board {
    /// Current tilt as (roll, pitch) in degrees
    fn tilt(&mut self) -> (f32, f32);

    /// Whether the action (quit) button is held
    fn action_pressed(&mut self) -> bool;

    fn render(&mut self, frame: &Frame);

    fn show_banner(&mut self, text: &str);

    /// Block until the next tick
    fn wait(&mut self, seconds: f32);
}
