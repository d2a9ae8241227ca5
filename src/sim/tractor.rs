//! Tractor motion state machine
//!
//! The tractor occupies a rigid 2x2 block of cells. Each tick a sensed
//! heading is turned into a gear change, a steering intent, and finally a
//! one-cell translation or an in-place pivot.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::orientation::{Difference, Heading, difference};

/// Min corner of a freshly staged tractor (fully left of the field)
pub const STAGING_ORIGIN: IVec2 = IVec2::new(-2, 0);

/// Drive state. Forward and Reverse are always separated by one Neutral tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gear {
    Forward,
    Neutral,
    Reverse,
}

/// Steering intent, only updated while a gear is engaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Straight,
    Left,
    Right,
}

impl Direction {
    pub fn as_difference(self) -> Difference {
        match self {
            Direction::Straight => Difference::Same,
            Direction::Left => Difference::Left,
            Direction::Right => Difference::Right,
        }
    }
}

/// What the tractor is currently used for (selects its colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TractorKind {
    Mower,
    Gatherer,
}

/// The four cells of the tractor, by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub back_left: IVec2,
    pub front_left: IVec2,
    pub back_right: IVec2,
    pub front_right: IVec2,
}

impl Body {
    /// Square with min corner `origin`, front facing `heading`
    pub fn new(origin: IVec2, heading: Heading) -> Self {
        let east = Self {
            back_left: origin,
            front_left: origin + IVec2::new(1, 0),
            back_right: origin + IVec2::new(0, 1),
            front_right: origin + IVec2::new(1, 1),
        };
        east.turned(Heading::East, heading)
    }

    fn turned(self, from: Heading, to: Heading) -> Self {
        let mut body = self;
        body.turn(difference(Some(from), Some(to)));
        body
    }

    /// Cells in role order: back left, front left, back right, front right
    pub fn cells(&self) -> [IVec2; 4] {
        [self.back_left, self.front_left, self.back_right, self.front_right]
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.cells().contains(&cell)
    }

    /// Component-wise minimum (top-left cell)
    pub fn min(&self) -> IVec2 {
        self.cells().into_iter().fold(IVec2::MAX, IVec2::min)
    }

    /// Heading the front pair faces
    pub fn front_heading(&self) -> Option<Heading> {
        Heading::from_delta(self.front_left - self.back_left)
    }

    /// True when the four roles form a rigid 2x2 square
    pub fn is_square(&self) -> bool {
        let Some(front) = self.front_heading() else {
            return false;
        };
        Heading::from_delta(self.back_right - self.back_left) == Some(front.rotate(Difference::Right))
            && self.front_right == self.front_left + (self.back_right - self.back_left)
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.back_left += delta;
        self.front_left += delta;
        self.back_right += delta;
        self.front_right += delta;
    }

    pub fn translated(&self, delta: IVec2) -> Self {
        let mut body = *self;
        body.translate(delta);
        body
    }

    /// Pivot a quarter turn counter-clockwise
    pub fn turn_left(&mut self) {
        let Body { back_left, front_left, back_right, front_right } = *self;
        *self = Body {
            back_left: back_right,
            front_left: back_left,
            back_right: front_right,
            front_right: front_left,
        };
    }

    /// Pivot a quarter turn clockwise
    pub fn turn_right(&mut self) {
        let Body { back_left, front_left, back_right, front_right } = *self;
        *self = Body {
            back_left: front_left,
            front_left: front_right,
            back_right: back_left,
            front_right: back_right,
        };
    }

    pub fn turn(&mut self, diff: Difference) {
        match diff {
            Difference::Same => {}
            Difference::Left => self.turn_left(),
            Difference::Right => self.turn_right(),
            Difference::Opposite => {
                self.turn_left();
                self.turn_left();
            }
        }
    }

    /// Every cell inside a `size.x` x `size.y` field
    pub fn fits(&self, size: IVec2) -> bool {
        self.cells()
            .iter()
            .all(|c| c.x >= 0 && c.y >= 0 && c.x < size.x && c.y < size.y)
    }
}

/// The player's tractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tractor {
    pub kind: TractorKind,
    pub body: Body,
    /// Reference heading for tilt differences. Matches the body front
    /// whenever `invert` is clear.
    pub heading: Heading,
    pub gear: Gear,
    pub direction: Direction,
    pub invert: bool,
    /// Still driving onto the field, tilt ignored
    pub staging: bool,
}

impl Tractor {
    pub fn new(kind: TractorKind, body: Body) -> Self {
        let heading = body.front_heading().unwrap_or(Heading::East);
        Self {
            kind,
            body,
            heading,
            gear: Gear::Neutral,
            direction: Direction::Straight,
            invert: false,
            staging: body.min().x < 0,
        }
    }

    /// Tractor waiting left of the field, facing east
    pub fn staged(kind: TractorKind) -> Self {
        Self::new(kind, Body::new(STAGING_ORIGIN, Heading::East))
    }

    /// Whether a one-cell move towards `heading` stays on the field
    pub fn can_drive(&self, heading: Heading, size: IVec2) -> bool {
        self.body.translated(heading.delta()).fits(size)
    }

    /// Advance one tick with the sensed tilt heading on a field of `size`
    pub fn update(&mut self, sensed: Option<Heading>, size: IVec2) {
        if self.staging {
            self.stage();
            return;
        }

        let diff = difference(Some(self.heading), sensed);
        self.update_gear(diff, sensed);
        self.update_direction(diff);
        self.update_body(diff, size);

        debug_assert!(self.body.is_square(), "tractor body lost its shape: {:?}", self.body);
        debug_assert!(self.invert || self.body.front_heading() == Some(self.heading));
    }

    fn stage(&mut self) {
        self.body.translate(Heading::East.delta());
        self.staging = self.body.min().x < 0;
        if !self.staging {
            log::debug!("Tractor {:?} on the field at {}", self.kind, self.body.min());
        }
    }

    fn update_gear(&mut self, diff: Difference, sensed: Option<Heading>) {
        let previous = self.gear;

        if sensed.is_none() {
            self.gear = Gear::Neutral;
            self.clear_invert();
        } else {
            match diff {
                Difference::Same if !self.invert => {
                    self.gear = match self.gear {
                        Gear::Reverse => Gear::Neutral,
                        Gear::Forward | Gear::Neutral => Gear::Forward,
                    };
                }
                Difference::Opposite => {
                    self.gear = match self.gear {
                        Gear::Forward => Gear::Neutral,
                        Gear::Neutral | Gear::Reverse => Gear::Reverse,
                    };
                }
                Difference::Same | Difference::Left | Difference::Right => {}
            }
        }

        if previous != self.gear {
            log::debug!("Gear {:?} -> {:?}", previous, self.gear);
        }
    }

    fn update_direction(&mut self, diff: Difference) {
        if self.gear == Gear::Neutral {
            return;
        }
        self.direction = match diff {
            Difference::Same | Difference::Opposite => Direction::Straight,
            Difference::Left => Direction::Left,
            Difference::Right => Direction::Right,
        };
    }

    fn update_body(&mut self, diff: Difference, size: IVec2) {
        match (self.gear, self.direction) {
            (Gear::Neutral, _) => {}
            (Gear::Forward, Direction::Straight) => {
                self.drive(self.heading.rotate(diff), size);
                self.clear_invert();
            }
            (Gear::Forward, turn) => {
                let turn = turn.as_difference();
                self.body.turn(turn);
                self.heading = self.heading.rotate(turn);
            }
            (Gear::Reverse, Direction::Straight) => {
                let heading = self.heading.rotate(diff);
                // Reversing while inverted cancels out
                self.drive(if self.invert { heading.opposite() } else { heading }, size);
            }
            (Gear::Reverse, turn) => {
                let turn = turn.as_difference();
                self.body.turn(turn.mirrored());
                self.heading = self.heading.rotate(turn);
                self.invert = true;
            }
        }
    }

    fn drive(&mut self, heading: Heading, size: IVec2) {
        let moved = self.body.translated(heading.delta());
        if moved.fits(size) {
            self.body = moved;
        } else {
            log::trace!("Tractor blocked moving {:?}", heading);
        }
    }

    /// Drop the inverted flag, re-anchoring the heading on the body front
    fn clear_invert(&mut self) {
        if self.invert {
            self.heading = self.body.front_heading().unwrap_or(self.heading);
            self.invert = false;
        }
    }
}
