//! LED matrix rendering module
//!
//! Builds one color per field cell; drawing it is up to the board.

pub mod compose;
pub mod frame;

pub use compose::{compose, dot_color, tractor_colors};
pub use frame::{Frame, Rgb, colors};
