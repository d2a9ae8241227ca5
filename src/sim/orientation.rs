//! Tilt classification and heading arithmetic
//!
//! A tilt sample is reduced to one of four cardinal headings, or `None` when
//! no axis dominates. Headings are compared and rotated in 90° steps.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Cardinal heading on the field (y grows southwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Compass degrees (North = 0, clockwise)
    pub fn degrees(self) -> i32 {
        match self {
            Heading::North => 0,
            Heading::East => 90,
            Heading::South => 180,
            Heading::West => 270,
        }
    }

    /// Heading for a multiple of 90 degrees (any sign)
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            0..=44 | 315..=359 => Heading::North,
            45..=134 => Heading::East,
            135..=224 => Heading::South,
            _ => Heading::West,
        }
    }

    /// One grid step in this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::North => IVec2::new(0, -1),
            Heading::East => IVec2::new(1, 0),
            Heading::South => IVec2::new(0, 1),
            Heading::West => IVec2::new(-1, 0),
        }
    }

    /// Heading for a unit grid step, if it is one
    pub fn from_delta(delta: IVec2) -> Option<Self> {
        Heading::ALL.into_iter().find(|h| h.delta() == delta)
    }

    pub fn opposite(self) -> Self {
        self.rotate(Difference::Opposite)
    }

    /// Apply a quantized turn
    pub fn rotate(self, diff: Difference) -> Self {
        Heading::from_degrees(self.degrees() + diff.degrees())
    }
}

/// Quantized angular delta between a reference heading and a sensed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difference {
    Same,
    Right,
    Opposite,
    Left,
}

impl Difference {
    pub fn degrees(self) -> i32 {
        match self {
            Difference::Same => 0,
            Difference::Right => 90,
            Difference::Opposite => 180,
            Difference::Left => 270,
        }
    }

    /// Left and right swapped; same and opposite unchanged
    pub fn mirrored(self) -> Self {
        match self {
            Difference::Left => Difference::Right,
            Difference::Right => Difference::Left,
            other => other,
        }
    }
}

/// Classify a tilt sample (degrees) against a threshold.
///
/// Returns `None` when neither axis exceeds the threshold or when both axes
/// have equal magnitude. Roll picks East (+) / West (-), pitch picks
/// South (+) / North (-).
pub fn sense(roll: f32, pitch: f32, threshold: f32) -> Option<Heading> {
    let (r, p) = (roll.abs(), pitch.abs());
    if r <= threshold && p <= threshold {
        return None;
    }
    if r > p {
        Some(if roll > 0.0 { Heading::East } else { Heading::West })
    } else if p > r {
        Some(if pitch > 0.0 { Heading::South } else { Heading::North })
    } else {
        None
    }
}

/// Turn needed to go from `target` to `sensed`.
///
/// `Same` whenever either side is missing.
pub fn difference(target: Option<Heading>, sensed: Option<Heading>) -> Difference {
    let (Some(target), Some(sensed)) = (target, sensed) else {
        return Difference::Same;
    };
    match (sensed.degrees() - target.degrees()).rem_euclid(360) {
        90 => Difference::Right,
        180 => Difference::Opposite,
        270 => Difference::Left,
        _ => Difference::Same,
    }
}

/// Tilt sample (roll, pitch) that `sense` classifies as `heading`
pub fn tilt_towards(heading: Heading, magnitude: f32) -> (f32, f32) {
    match heading {
        Heading::North => (0.0, -magnitude),
        Heading::East => (magnitude, 0.0),
        Heading::South => (0.0, magnitude),
        Heading::West => (-magnitude, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn heading() -> impl Strategy<Value = Heading> {
        prop::sample::select(Heading::ALL.to_vec())
    }

    #[test]
    fn test_sense_axes() {
        assert_eq!(sense(10.0, 2.0, 3.0), Some(Heading::East));
        assert_eq!(sense(-10.0, 2.0, 3.0), Some(Heading::West));
        assert_eq!(sense(1.0, 8.0, 3.0), Some(Heading::South));
        assert_eq!(sense(1.0, -8.0, 3.0), Some(Heading::North));
    }

    #[test]
    fn test_sense_ambiguous() {
        // Equal magnitudes have no dominant axis
        assert_eq!(sense(5.0, -5.0, 3.0), None);
        // Exactly on the threshold is still level
        assert_eq!(sense(3.0, 0.0, 3.0), None);
    }

    #[test]
    fn test_difference_table() {
        use Heading::*;
        assert_eq!(difference(Some(East), Some(South)), Difference::Right);
        assert_eq!(difference(Some(East), Some(North)), Difference::Left);
        assert_eq!(difference(Some(East), Some(West)), Difference::Opposite);
        // -90 wraps to Left, not a missing key
        assert_eq!(difference(Some(North), Some(West)), Difference::Left);
        assert_eq!(difference(Some(West), Some(North)), Difference::Right);
        assert_eq!(difference(None, Some(North)), Difference::Same);
        assert_eq!(difference(Some(North), None), Difference::Same);
    }

    #[test]
    fn test_rotate() {
        assert_eq!(Heading::East.rotate(Difference::Left), Heading::North);
        assert_eq!(Heading::North.rotate(Difference::Left), Heading::West);
        assert_eq!(Heading::West.rotate(Difference::Right), Heading::North);
        assert_eq!(Heading::South.opposite(), Heading::North);
        assert_eq!(Difference::Left.mirrored(), Difference::Right);
        assert_eq!(Difference::Opposite.mirrored(), Difference::Opposite);
    }

    #[test]
    fn test_tilt_towards_senses_back() {
        for h in Heading::ALL {
            let (roll, pitch) = tilt_towards(h, 6.0);
            assert_eq!(sense(roll, pitch, 3.0), Some(h));
            assert_eq!(Heading::from_delta(h.delta()), Some(h));
        }
    }

    proptest! {
        #[test]
        fn prop_level_tilt_is_none(t in 0.0f32..90.0, a in -1.0f32..=1.0, b in -1.0f32..=1.0) {
            prop_assert_eq!(sense(a * t, b * t, t), None);
        }

        #[test]
        fn prop_difference_to_self_is_same(h in heading()) {
            prop_assert_eq!(difference(Some(h), Some(h)), Difference::Same);
        }

        #[test]
        fn prop_turns_cancel(h in heading()) {
            prop_assert_eq!(h.rotate(Difference::Same), h);
            prop_assert_eq!(h.rotate(Difference::Right).rotate(Difference::Left), h);
            prop_assert_eq!(h.opposite().opposite(), h);
        }

        #[test]
        fn prop_rotate_by_difference_reaches_sensed(a in heading(), b in heading()) {
            prop_assert_eq!(a.rotate(difference(Some(a), Some(b))), b);
        }
    }
}
