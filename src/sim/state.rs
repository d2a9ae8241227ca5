//! Simulation state and phase setup
//!
//! One `Bauer` owns everything that changes between ticks: the field, the
//! tractor, the current phase and the RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::{Dot, Field};
use super::tractor::{Tractor, TractorKind};
use crate::settings::Settings;

/// Phase of the farming cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Welcome screen
    Hello,
    /// Crops grow, no tractor
    Grow,
    /// Tractor mows the field
    Mow,
    /// Tractor gathers hay balls
    Gather,
    /// Player quit
    Bye,
}

impl Step {
    /// Phase that follows once this one is complete
    pub fn next(self) -> Self {
        match self {
            Step::Hello => Step::Grow,
            Step::Grow => Step::Mow,
            Step::Mow => Step::Gather,
            Step::Gather => Step::Grow,
            Step::Bye => Step::Bye,
        }
    }

    /// Text scrolled when the phase starts
    pub fn banner(self) -> &'static str {
        match self {
            Step::Hello => "Welcome to: THE BAUER",
            Step::Grow => "Grow",
            Step::Mow => "Mow",
            Step::Gather => "Gather",
            Step::Bye => "Au revoir!",
        }
    }

    /// Whether a dot already satisfies this phase's goal
    pub fn goal_reached(self, dot: Dot) -> bool {
        match self {
            Step::Grow => dot.is_grown(),
            Step::Mow => dot.is_mown() || dot.is_hayball(),
            Step::Gather => dot.is_mown(),
            Step::Hello | Step::Bye => true,
        }
    }
}

/// Things the driver should react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Show a banner on the display
    Banner(&'static str),
    /// A phase transition happened
    PhaseChanged { from: Step, to: Step },
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct Bauer {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Current phase
    pub step: Step,
    pub field: Field,
    /// Present during Mow and Gather only
    pub tractor: Option<Tractor>,
    pub tilt_threshold: f32,
    /// Ticks a phase goal must hold before advancing
    pub settle_ticks: u32,
    /// Consecutive ticks the current goal has held
    pub settle_counter: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Completed grow/mow/gather rounds
    pub rounds: u32,
    /// Hay balls formed while mowing
    pub hayballs_formed: u32,
    /// Hay balls picked up while gathering
    pub hayballs_gathered: u32,
    /// Pending events for the driver
    pub events: Vec<GameEvent>,
}

impl Bauer {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New game with seed {}", seed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            step: Step::Hello,
            field: Field::new(settings.field_width, settings.field_height),
            tractor: None,
            tilt_threshold: settings.tilt_threshold,
            settle_ticks: settings.settle_ticks,
            settle_counter: 0,
            time_ticks: 0,
            rounds: 0,
            hayballs_formed: 0,
            hayballs_gathered: 0,
            events: vec![GameEvent::Banner(Step::Hello.banner())],
        }
    }

    /// Default settings with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    pub fn is_over(&self) -> bool {
        self.step == Step::Bye
    }

    /// Fraction of the field that already meets the current phase goal
    pub fn progress(&self) -> f32 {
        let step = self.step;
        self.field.fraction(|d| step.goal_reached(d))
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch to `step` and run its one-time setup
    pub fn enter(&mut self, step: Step) {
        let from = self.step;
        self.step = step;
        self.settle_counter = 0;

        match step {
            Step::Hello => {}
            Step::Grow => {
                if from == Step::Gather {
                    self.rounds += 1;
                }
                self.field.reset(&mut self.rng);
                self.tractor = None;
            }
            Step::Mow => self.tractor = Some(Tractor::staged(TractorKind::Mower)),
            Step::Gather => self.tractor = Some(Tractor::staged(TractorKind::Gatherer)),
            Step::Bye => {
                log::info!(
                    "Bye after {} ticks: {} rounds, {} hay balls formed, {} gathered",
                    self.time_ticks,
                    self.rounds,
                    self.hayballs_formed,
                    self.hayballs_gathered
                );
            }
        }

        log::info!("Step {:?} -> {:?}", from, step);
        self.events.push(GameEvent::PhaseChanged { from, to: step });
        self.events.push(GameEvent::Banner(step.banner()));
    }
}
