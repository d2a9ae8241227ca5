//! Composite the simulation state into a frame

use super::frame::{Frame, Rgb, colors};
use crate::consts::{GROWN, MAX_MOWN};
use crate::sim::{Bauer, Dot, TractorKind};

/// Color of a single dot
pub fn dot_color(dot: Dot) -> Rgb {
    match dot {
        Dot::HayBall => colors::HAYBALL,
        Dot::Crop(level) if level <= MAX_MOWN => colors::FIELD_MOWN,
        Dot::Crop(level) if level >= GROWN => colors::FIELD_GROWN,
        Dot::Crop(level) => {
            let t = (level - MAX_MOWN) as f32 / (GROWN - MAX_MOWN) as f32;
            colors::FIELD_MOWN.lerp(colors::FIELD_GROWN, t)
        }
    }
}

/// (back, front) colors of a tractor
pub fn tractor_colors(kind: TractorKind) -> (Rgb, Rgb) {
    match kind {
        TractorKind::Mower => (colors::MOWER_BACK, colors::MOWER_FRONT),
        TractorKind::Gatherer => (colors::GATHERER_BACK, colors::GATHERER_FRONT),
    }
}

/// Field with the tractor (if any) drawn on top
pub fn compose(state: &Bauer) -> Frame {
    let mut frame = Frame::new(state.field.width, state.field.height);

    for (cell, dot) in state.field.iter() {
        frame.set(cell.x as usize, cell.y as usize, dot_color(dot));
    }

    if let Some(tractor) = &state.tractor {
        let (back, front) = tractor_colors(tractor.kind);
        let body = &tractor.body;
        for (cell, color) in [
            (body.back_left, back),
            (body.front_left, front),
            (body.back_right, back),
            (body.front_right, front),
        ] {
            if state.field.in_bounds(cell) {
                frame.set(cell.x as usize, cell.y as usize, color);
            }
        }
    }

    frame
}
