//! Terminal stand-in for the LED board
//!
//! Draws each frame with 24-bit ANSI colors. There is no tilt sensor or
//! button here, so the board always reads level; pair it with the autopilot.

use std::io::{self, Write};
use std::time::Duration;

use super::Board;
use crate::renderer::Frame;

#[derive(Debug)]
pub struct TerminalBoard<W: Write = io::Stdout> {
    out: W,
    /// Frames drawn so far (used to redraw in place)
    frames: u64,
    sleep: bool,
}

impl TerminalBoard {
    pub fn new() -> Self {
        Self::with_writer(io::stdout(), true)
    }
}

impl Default for TerminalBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBoard<W> {
    pub fn with_writer(out: W, sleep: bool) -> Self {
        Self {
            out,
            frames: 0,
            sleep,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        if self.frames > 0 {
            // Move the cursor back over the previous frame
            write!(self.out, "\x1b[{}A", frame.height)?;
        }
        for row in frame.rows() {
            for px in row {
                write!(self.out, "\x1b[38;2;{};{};{}m██", px.r, px.g, px.b)?;
            }
            writeln!(self.out, "\x1b[0m")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Board for TerminalBoard<W> {
    fn tilt(&mut self) -> (f32, f32) {
        (0.0, 0.0)
    }

    fn action_pressed(&mut self) -> bool {
        false
    }

    fn render(&mut self, frame: &Frame) {
        if let Err(e) = self.draw(frame) {
            log::warn!("Render error: {}", e);
        }
        self.frames += 1;
    }

    fn show_banner(&mut self, text: &str) {
        let result = writeln!(self.out, ">>> {} <<<", text).and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("Banner error: {}", e);
        }
        // Start the next frame on fresh lines
        self.frames = 0;
    }

    fn wait(&mut self, seconds: f32) {
        if !(self.sleep && seconds > 0.0) {
            return;
        }
        match Duration::try_from_secs_f32(seconds) {
            Ok(pause) => std::thread::sleep(pause),
            Err(e) => log::warn!("Cannot wait {} s: {}", seconds, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_draws_rows_and_banner() {
        let mut board = TerminalBoard::with_writer(Vec::new(), false);
        let mut frame = Frame::new(2, 2);
        frame.set(0, 0, colors::RED);
        board.show_banner("Mow");
        board.render(&frame);
        board.render(&frame);
        board.wait(10.0);

        let text = String::from_utf8(board.into_inner()).unwrap();
        assert!(text.starts_with(">>> Mow <<<\n"));
        assert!(text.contains("\x1b[38;2;255;0;0m██"));
        // Second frame redraws over the first
        assert_eq!(text.matches("\x1b[2A").count(), 1);
        assert_eq!(text.matches('\n').count(), 5);
    }

    #[test]
    fn test_unrepresentable_wait_returns() {
        let mut board = TerminalBoard::with_writer(Vec::new(), true);
        board.wait(f32::INFINITY);
        board.wait(f32::MAX);
        assert!(board.into_inner().is_empty());
    }
}
