//! Lost Vac Bot - simulation core for a battery-draining maze survival game
//!
//! Core modules:
//! - `maze`: Procedural perfect-maze generation, wall geometry, power-up placement
//! - `sim`: Collision, per-frame tick, and the game progression state machine
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best-score bookkeeping (persistence is the host's job)
//!
//! Rendering, audio playback and navigation are left to the host application. It
//! feeds a joystick vector and the canvas size in, and reads snapshots and queued
//! [`sim::GameEvent`]s out.

pub mod error;
pub mod highscores;
pub mod maze;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use highscores::HighScore;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time the speed constants are expressed against (60 Hz)
    pub const NOMINAL_FRAME_SECS: f32 = 1.0 / 60.0;
    /// Longest stretch of a single frame the bot's motion integrates (seconds)
    pub const MAX_FRAME_SECS: f32 = 0.25;

    /// Bot radius in pixels
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Corridors are twice the bot diameter
    pub const CELL_SIZE: f32 = PLAYER_RADIUS * 4.0;
    pub const WALL_THICKNESS: f32 = 2.0;
    /// Pixels per nominal frame at full joystick deflection
    pub const PLAYER_MAX_SPEED: f32 = 3.0;

    /// Smallest grid dimension, regardless of canvas size
    pub const MIN_GRID_DIM: u32 = 3;
    /// Upper bound on cells per axis for absurd canvas sizes
    pub const MAX_GRID_DIM: u32 = 256;

    /// Position correction passes per collision resolve (corners need more than one)
    pub const COLLISION_PASSES: u32 = 3;
    /// Squared distances below this are treated as "exactly on the wall"
    pub const COLLISION_EPSILON: f32 = 0.0001;

    /// Fog radius at full battery (whole map visible)
    pub const FOG_INITIAL_RADIUS: f32 = 300.0;
    /// Fog radius at empty battery (always-visible halo)
    pub const FOG_MIN_RADIUS: f32 = 40.0;

    pub const STARTING_BATTERY: f32 = 100.0;
    pub const MAX_BATTERY: f32 = 100.0;
    /// Percent per second
    pub const BATTERY_DRAIN_RATE: f32 = 1.0;
    pub const BATTERY_POWERUP_VALUE: f32 = 20.0;
    pub const BATTERY_POWERUP_RADIUS: f32 = 10.0;
    /// Above this, the next maze gets no power-ups
    pub const BATTERY_HIGH_THRESHOLD: f32 = 70.0;
    /// Below this, the next maze gets two power-ups
    pub const BATTERY_LOW_THRESHOLD: f32 = 30.0;

    /// Distance to the exit point that completes a level
    pub const EXIT_THRESHOLD: f32 = PLAYER_RADIUS;

    /// Level-up flash (seconds)
    pub const FLASH_DURATION: f32 = 0.4;
    /// Movement lock while the fog closes in (seconds)
    pub const COUNTDOWN_DURATION: f32 = 3.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-in-out on `t` in [0, 1]
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Clamp a raw joystick drag offset to the pad and scale it into the unit disc.
///
/// `max_offset` is the knob travel in pixels. A non-positive travel yields zero input.
pub fn normalize_joystick(drag: Vec2, max_offset: f32) -> Vec2 {
    if max_offset <= 0.0 {
        return Vec2::ZERO;
    }
    drag.clamp_length_max(max_offset) / max_offset
}
