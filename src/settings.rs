//! Game settings
//!
//! Loaded once at startup from an optional JSON file; anything missing falls
//! back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Smallest field edge the tractor can still turn on
pub const MIN_FIELD_EDGE: usize = 3;

/// Longest accepted pause between ticks
pub const MAX_INTERVAL_SECS: f32 = 60.0;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between ticks
    pub interval_secs: f32,
    /// Tilt (degrees) an axis must exceed to count
    pub tilt_threshold: f32,

    // === Field ===
    pub field_width: usize,
    pub field_height: usize,
    /// Ticks a phase goal must hold before the next phase starts
    pub settle_ticks: u32,

    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Let the simulation steer the tractor itself
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_secs: TICK_INTERVAL,
            tilt_threshold: TILT_THRESHOLD,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            settle_ticks: SETTLE_TICKS,
            seed: None,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values the simulation cannot run with
    pub fn sanitized(mut self) -> Self {
        if self.field_width < MIN_FIELD_EDGE || self.field_height < MIN_FIELD_EDGE {
            log::warn!(
                "Field {}x{} too small, using at least {}x{}",
                self.field_width,
                self.field_height,
                MIN_FIELD_EDGE,
                MIN_FIELD_EDGE
            );
            self.field_width = self.field_width.max(MIN_FIELD_EDGE);
            self.field_height = self.field_height.max(MIN_FIELD_EDGE);
        }
        if !(self.interval_secs.is_finite() && self.interval_secs >= 0.0) {
            log::warn!("Invalid tick interval {}, using {}", self.interval_secs, TICK_INTERVAL);
            self.interval_secs = TICK_INTERVAL;
        } else if self.interval_secs > MAX_INTERVAL_SECS {
            log::warn!("Tick interval {} too long, using {}", self.interval_secs, MAX_INTERVAL_SECS);
            self.interval_secs = MAX_INTERVAL_SECS;
        }
        if !(self.tilt_threshold.is_finite() && self.tilt_threshold >= 0.0) {
            log::warn!("Invalid tilt threshold {}, using {}", self.tilt_threshold, TILT_THRESHOLD);
            self.tilt_threshold = TILT_THRESHOLD;
        }
        self
    }
}
