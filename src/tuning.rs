//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes from a [`Tuning`]. Defaults match
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Balance knobs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Geometry ===
    pub player_radius: f32,
    pub cell_size: f32,
    pub wall_thickness: f32,
    /// Pixels per nominal (60 Hz) frame at full deflection
    pub player_max_speed: f32,

    // === Fog ===
    pub fog_initial_radius: f32,
    pub fog_min_radius: f32,

    // === Battery ===
    pub starting_battery: f32,
    /// Percent per second
    pub battery_drain_rate: f32,
    pub powerup_value: f32,
    pub powerup_radius: f32,
    pub battery_high_threshold: f32,
    pub battery_low_threshold: f32,

    // === Progression ===
    pub exit_threshold: f32,
    /// Seconds
    pub flash_duration: f32,
    /// Seconds
    pub countdown_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            cell_size: CELL_SIZE,
            wall_thickness: WALL_THICKNESS,
            player_max_speed: PLAYER_MAX_SPEED,

            fog_initial_radius: FOG_INITIAL_RADIUS,
            fog_min_radius: FOG_MIN_RADIUS,

            starting_battery: STARTING_BATTERY,
            battery_drain_rate: BATTERY_DRAIN_RATE,
            powerup_value: BATTERY_POWERUP_VALUE,
            powerup_radius: BATTERY_POWERUP_RADIUS,
            battery_high_threshold: BATTERY_HIGH_THRESHOLD,
            battery_low_threshold: BATTERY_LOW_THRESHOLD,

            exit_threshold: EXIT_THRESHOLD,
            flash_duration: FLASH_DURATION,
            countdown_duration: COUNTDOWN_DURATION,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("player_radius", self.player_radius)?;
        positive("cell_size", self.cell_size)?;
        non_negative("wall_thickness", self.wall_thickness)?;
        non_negative("player_max_speed", self.player_max_speed)?;
        non_negative("fog_min_radius", self.fog_min_radius)?;
        non_negative("battery_drain_rate", self.battery_drain_rate)?;
        non_negative("powerup_value", self.powerup_value)?;
        non_negative("powerup_radius", self.powerup_radius)?;
        non_negative("exit_threshold", self.exit_threshold)?;
        non_negative("flash_duration", self.flash_duration)?;
        non_negative("countdown_duration", self.countdown_duration)?;

        if self.fog_initial_radius < self.fog_min_radius {
            return Err(TuningError::Invalid {
                field: "fog_initial_radius",
                reason: format!(
                    "{} is below fog_min_radius {}",
                    self.fog_initial_radius, self.fog_min_radius
                ),
            });
        }
        if !(self.starting_battery > 0.0 && self.starting_battery <= MAX_BATTERY) {
            return Err(TuningError::Invalid {
                field: "starting_battery",
                reason: format!("{} is outside (0, {}]", self.starting_battery, MAX_BATTERY),
            });
        }
        if self.battery_low_threshold > self.battery_high_threshold {
            return Err(TuningError::Invalid {
                field: "battery_low_threshold",
                reason: format!(
                    "{} exceeds battery_high_threshold {}",
                    self.battery_low_threshold, self.battery_high_threshold
                ),
            });
        }
        // Sub-steps per frame stay bounded only while one frame moves less than a cell.
        if self.player_max_speed > self.cell_size {
            return Err(TuningError::Invalid {
                field: "player_max_speed",
                reason: format!(
                    "{} px per frame exceeds the {} px cell",
                    self.player_max_speed, self.cell_size
                ),
            });
        }
        // A bot wider than its corridor could never move.
        if 2.0 * self.effective_radius() >= self.cell_size {
            return Err(TuningError::Invalid {
                field: "player_radius",
                reason: format!(
                    "bot of radius {} does not fit a {} px corridor",
                    self.player_radius, self.cell_size
                ),
            });
        }
        Ok(())
    }

    /// Collision radius: bot radius plus half the stroked wall
    #[inline]
    pub fn effective_radius(&self) -> f32 {
        self.player_radius + self.wall_thickness / 2.0
    }

    /// Largest sub-step the swept mover takes; small enough that one step can never
    /// carry the bot's center across a wall line.
    #[inline]
    pub fn max_step(&self) -> f32 {
        self.effective_radius() * 0.5
    }

    /// Fog radius for a battery percentage
    pub fn fog_radius_for(&self, battery: f32) -> f32 {
        crate::lerp(
            self.fog_min_radius,
            self.fog_initial_radius,
            (battery / MAX_BATTERY).clamp(0.0, 1.0),
        )
    }

    /// Power-ups to place in the next maze for the current battery
    pub fn power_up_count_for(&self, battery: f32) -> usize {
        if battery > self.battery_high_threshold {
            0
        } else if battery < self.battery_low_threshold {
            2
        } else {
            1
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("{value} must be positive"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("{value} must not be negative"),
        })
    }
}
