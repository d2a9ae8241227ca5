//! Fixed timestep simulation tick
//!
//! A tick is split in two so the driver can render in between:
//! [`tick`] polls the abort signal and runs the phase effect,
//! [`advance_phase`] checks the phase goal and moves on once it has settled.

use super::autopilot;
use super::orientation::sense;
use super::state::{Bauer, Step};
use super::tractor::TractorKind;

/// Input sampled from the board for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw tilt sample (roll, pitch) in degrees
    pub tilt: (f32, f32),
    /// Action button: quit the game
    pub abort: bool,
    /// Idle/demo mode - the simulation steers itself
    pub autopilot: bool,
}

/// Run the current phase's effect for one tick
pub fn tick(state: &mut Bauer, input: &TickInput) {
    state.time_ticks += 1;

    if input.abort && state.step != Step::Bye {
        state.enter(Step::Bye);
    }

    match state.step {
        Step::Hello | Step::Bye => {}
        Step::Grow => state.field.grow(&mut state.rng),
        Step::Mow | Step::Gather => {
            let (roll, pitch) = if input.autopilot {
                autopilot::tilt(state)
            } else {
                input.tilt
            };
            let sensed = sense(roll, pitch, state.tilt_threshold);
            let size = state.field.size();

            if let Some(tractor) = state.tractor.as_mut() {
                tractor.update(sensed, size);
                let cells = tractor.body.cells();
                match tractor.kind {
                    TractorKind::Mower => {
                        let formed = state.field.mow(&cells, &mut state.rng);
                        state.hayballs_formed += formed as u32;
                    }
                    TractorKind::Gatherer => {
                        let collected = state.field.gather(&cells, &mut state.rng);
                        state.hayballs_gathered += collected as u32;
                    }
                }
            }
        }
    }

    log::trace!(
        "tick {} {:?} progress {:.2}",
        state.time_ticks,
        state.step,
        state.progress()
    );
}

/// Check the phase goal and advance once it has held for the settle delay
pub fn advance_phase(state: &mut Bauer) {
    let done = match state.step {
        Step::Hello => {
            state.enter(Step::Grow);
            return;
        }
        Step::Bye => return,
        Step::Grow => state.field.is_grown(),
        Step::Mow => state.field.is_mown(),
        Step::Gather => state.field.is_gathered(),
    };

    if !done {
        state.settle_counter = 0;
        return;
    }

    state.settle_counter += 1;
    if state.settle_counter >= state.settle_ticks {
        let next = state.step.next();
        state.enter(next);
    }
}

/// Effect and phase check back to back (no rendering in between)
pub fn step(state: &mut Bauer, input: &TickInput) {
    tick(state, input);
    advance_phase(state);
}
