//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod field;
pub mod orientation;
pub mod state;
pub mod tick;
pub mod tractor;

pub use field::{Dot, Field};
pub use orientation::{Difference, Heading, difference, sense};
pub use state::{Bauer, GameEvent, Step};
pub use tick::{TickInput, advance_phase, step, tick};
pub use tractor::{Body, Direction, Gear, Tractor, TractorKind};
