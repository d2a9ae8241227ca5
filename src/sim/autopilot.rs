//! Demo mode - the simulation steers the tractor itself
//!
//! Produces the tilt a player would apply to reach the nearest cell that
//! still needs work, using only what the motion state machine accepts.

use glam::{IVec2, Vec2};

use super::field::{Dot, Field};
use super::orientation::{Difference, Heading, difference, tilt_towards};
use super::state::{Bauer, Step};
use super::tractor::{Gear, Tractor};

/// Tilt applied by the autopilot, in multiples of the sensing threshold
const TILT_GAIN: f32 = 2.0;

/// Tilt (roll, pitch) for this tick
pub fn tilt(state: &Bauer) -> (f32, f32) {
    let level = (0.0, 0.0);
    let Some(tractor) = state.tractor.as_ref() else {
        return level;
    };
    if tractor.staging {
        return level;
    }

    let wanted: fn(Dot) -> bool = match state.step {
        Step::Mow => |d| !d.is_mown() && !d.is_hayball(),
        Step::Gather => Dot::is_hayball,
        Step::Hello | Step::Grow | Step::Bye => return level,
    };

    let center = body_center(tractor);
    let Some(target) = nearest(&state.field, center, wanted) else {
        return level;
    };
    let Some(want) = heading_towards(center, target) else {
        return level;
    };

    // At least 1.0 so a zero threshold still senses the tilt
    let magnitude = (state.tilt_threshold * TILT_GAIN).max(1.0);
    match choose(tractor, want, state.field.size()) {
        Some(heading) => tilt_towards(heading, magnitude),
        None => level,
    }
}

fn body_center(tractor: &Tractor) -> Vec2 {
    tractor.body.min().as_vec2() + Vec2::ONE
}

/// Closest matching cell by Manhattan distance (first in row order on ties)
fn nearest(field: &Field, from: Vec2, wanted: fn(Dot) -> bool) -> Option<IVec2> {
    field
        .iter()
        .filter(|&(_, dot)| wanted(dot))
        .map(|(cell, _)| {
            let d = cell.as_vec2() + Vec2::splat(0.5) - from;
            (cell, d.x.abs() + d.y.abs())
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(cell, _)| cell)
}

/// Dominant-axis heading from the body centre to `target`, if not covered
fn heading_towards(center: Vec2, target: IVec2) -> Option<Heading> {
    let d = target.as_vec2() + Vec2::splat(0.5) - center;
    let horizontal = d.x.abs() > 0.5;
    let vertical = d.y.abs() > 0.5;
    if horizontal && (!vertical || d.x.abs() >= d.y.abs()) {
        Some(if d.x > 0.0 { Heading::East } else { Heading::West })
    } else if vertical {
        Some(if d.y > 0.0 { Heading::South } else { Heading::North })
    } else {
        None
    }
}

/// Heading to tilt towards so the tractor ends up moving `want`
fn choose(tractor: &Tractor, want: Heading, size: IVec2) -> Option<Heading> {
    let diff = difference(Some(tractor.heading), Some(want));
    match (tractor.gear, diff) {
        // Turns need an engaged gear
        (Gear::Neutral, Difference::Left | Difference::Right) => {
            if tractor.can_drive(tractor.heading, size) {
                Some(tractor.heading)
            } else {
                Some(tractor.heading.opposite())
            }
        }
        // Level instead of steering in reverse, which would invert the controls
        (Gear::Reverse, Difference::Left | Difference::Right) => None,
        _ if tractor.invert => None,
        _ => Some(want),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::orientation::sense;
    use crate::sim::tractor::{Body, TractorKind};

    fn mowing(tractor: Tractor) -> Bauer {
        let mut bauer = Bauer::with_seed(5);
        bauer.enter(Step::Mow);
        bauer.tractor = Some(tractor);
        bauer
    }

    fn sensed(state: &Bauer) -> Option<Heading> {
        let (roll, pitch) = tilt(state);
        sense(roll, pitch, state.tilt_threshold)
    }

    #[test]
    fn test_level_while_staging_or_growing() {
        let mut bauer = Bauer::with_seed(5);
        bauer.enter(Step::Grow);
        assert_eq!(tilt(&bauer), (0.0, 0.0));
        bauer.enter(Step::Mow);
        assert_eq!(tilt(&bauer), (0.0, 0.0));
    }

    #[test]
    fn test_heads_for_unmown_cell() {
        let mut bauer = mowing(Tractor::new(TractorKind::Mower, Body::new(IVec2::ZERO, Heading::East)));
        bauer.field.set(IVec2::new(6, 0), Dot::Crop(30));
        assert_eq!(sensed(&bauer), Some(Heading::East));
    }

    #[test]
    fn test_engages_before_turning() {
        let mut bauer = mowing(Tractor::new(TractorKind::Mower, Body::new(IVec2::new(6, 0), Heading::East)));
        bauer.field.set(IVec2::new(6, 6), Dot::Crop(30));
        // Wants south but sits in neutral at the east edge: back up first
        assert_eq!(sensed(&bauer), Some(Heading::West));
    }

    #[test]
    fn test_gather_targets_hayballs() {
        let mut bauer = mowing(Tractor::new(TractorKind::Gatherer, Body::new(IVec2::new(4, 4), Heading::North)));
        bauer.step = Step::Gather;
        assert_eq!(sensed(&bauer), None);
        bauer.field.set(IVec2::new(4, 0), Dot::HayBall);
        assert_eq!(sensed(&bauer), Some(Heading::North));
    }

    #[test]
    fn test_levels_before_turning_in_reverse() {
        let mut tractor = Tractor::new(TractorKind::Mower, Body::new(IVec2::new(4, 4), Heading::East));
        tractor.update(Some(Heading::West), IVec2::new(8, 8));
        assert_eq!(tractor.gear, Gear::Reverse);
        let mut bauer = mowing(tractor);
        bauer.field.set(IVec2::new(4, 0), Dot::Crop(30));
        assert_eq!(sensed(&bauer), None);

        // Keeps backing up when the target is behind
        bauer.field.set(IVec2::new(4, 0), Dot::Crop(0));
        bauer.field.set(IVec2::new(0, 4), Dot::Crop(30));
        assert_eq!(sensed(&bauer), Some(Heading::West));
    }

    #[test]
    fn test_heading_towards_covered_is_none() {
        assert_eq!(heading_towards(Vec2::new(1.0, 1.0), IVec2::new(1, 0)), None);
        assert_eq!(heading_towards(Vec2::new(1.0, 1.0), IVec2::new(3, 2)), Some(Heading::East));
        assert_eq!(heading_towards(Vec2::new(1.0, 1.0), IVec2::new(1, 5)), Some(Heading::South));
    }
}
