//! Game state and core simulation types
//!
//! The simulation is the single writer of everything here. Hosts read through
//! [`GameState::snapshot`] and the maze accessors, and drain queued [`GameEvent`]s after
//! each tick to play sounds, navigate, or persist the high score.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScore;
use crate::maze::MazeData;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No canvas size yet, so no maze
    Loading,
    /// Full maze shown while the fog closes in; movement locked
    Countdown,
    /// Active gameplay
    Playing,
    /// Level-up flash after reaching the exit; the next maze is already loaded
    Transitioning,
    /// Battery ran out
    GameOver,
}

impl GamePhase {
    /// Whether the bot is frozen and exit/battery checks are suspended
    pub fn is_locked(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Side effects for the host, queued during a tick and drained after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Countdown cue; fog starts closing in
    CountdownStarted { level: u32 },
    /// Movement unlocked
    CountdownFinished,
    /// Background music should (re)start
    MusicStart,
    /// Background music should stop
    MusicStop,
    /// A battery pickup was collected
    PowerUpCollected { index: usize, battery: f32 },
    /// Exit reached; `level` is the level just entered
    LevelComplete { level: u32 },
    /// Battery depleted; the run is over
    GameOver {
        score: u64,
        level: u32,
        new_high_score: bool,
    },
    /// The plain integer the host should persist
    NewHighScore { score: u64 },
}

/// Five-step battery gauge for the HUD icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryLevel {
    Full,
    ThreeQuarters,
    Half,
    Quarter,
    Empty,
}

impl BatteryLevel {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            p if p > 75 => BatteryLevel::Full,
            p if p > 50 => BatteryLevel::ThreeQuarters,
            p if p > 25 => BatteryLevel::Half,
            p if p > 5 => BatteryLevel::Quarter,
            _ => BatteryLevel::Empty,
        }
    }
}

/// A one-shot animation/lock window on the simulation clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    /// Clock time the timer started (seconds)
    pub start: f64,
    /// Seconds
    pub duration: f32,
}

impl Timer {
    pub fn new(start: f64, duration: f32) -> Self {
        Self { start, duration }
    }

    /// Fraction elapsed, clamped to [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (((now - self.start) / self.duration as f64) as f32).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Countdown lock plus the fog radius it animates toward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    pub timer: Timer,
    pub fog_target: f32,
}

/// Read-only view for renderers and HUDs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: Vec2,
    pub battery: f32,
    pub fog_radius: f32,
    pub fog_opacity: f32,
    pub flash_opacity: f32,
    pub score: u64,
    pub level: u32,
    pub high_score: u64,
    pub game_over: bool,
    pub countdown_active: bool,
}

impl Snapshot {
    /// Battery rounded for display
    pub fn battery_percent(&self) -> u32 {
        self.battery.round().max(0.0) as u32
    }

    pub fn battery_level(&self) -> BatteryLevel {
        BatteryLevel::from_percent(self.battery_percent())
    }

    /// Mazes finished this run, shown on the game-over screen
    pub fn mazes_completed(&self) -> u32 {
        self.level.saturating_sub(1)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance constants for this run
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Canvas size latched from the first non-zero layout
    pub(crate) canvas: Option<Vec2>,
    pub(crate) maze: Option<MazeData>,
    /// Bot center in canvas pixels
    pub player: Vec2,
    /// Percent, 0-100
    pub battery: f32,
    /// Animated outputs: written here, only read by the renderer
    pub fog_radius: f32,
    pub fog_opacity: f32,
    pub flash_opacity: f32,
    /// Distinct cells covered over the whole run
    pub score: u64,
    /// 1-based level counter
    pub level: u32,
    pub high_score: HighScore,
    /// Cells covered in the current maze (row-major indices)
    pub(crate) visited: BTreeSet<usize>,
    pub(crate) last_cell: Option<usize>,
    /// Parallel to the current maze's power-ups
    pub(crate) power_ups_collected: Vec<bool>,
    /// Simulation clock (seconds)
    pub clock: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) flash: Option<Timer>,
    pub(crate) countdown: Option<Countdown>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Loading,
            canvas: None,
            maze: None,
            player: Vec2::ZERO,
            battery: tuning.starting_battery,
            fog_radius: tuning.fog_initial_radius,
            fog_opacity: 1.0,
            flash_opacity: 0.0,
            score: 0,
            level: 1,
            high_score: HighScore::default(),
            visited: BTreeSet::new(),
            last_cell: None,
            power_ups_collected: Vec::new(),
            clock: 0.0,
            time_ticks: 0,
            flash: None,
            countdown: None,
            events: Vec::new(),
            tuning,
        }
    }

    /// Replace the tuning (before the first layout)
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.battery = tuning.starting_battery;
        self.fog_radius = tuning.fog_initial_radius;
        self.tuning = tuning;
        self
    }

    /// Seed the best score loaded by the host
    pub fn with_high_score(mut self, best: u64) -> Self {
        self.high_score = HighScore::new(best);
        self
    }

    pub fn maze(&self) -> Option<&MazeData> {
        self.maze.as_ref()
    }

    pub fn canvas_size(&self) -> Option<Vec2> {
        self.canvas
    }

    /// Collected flags, one per power-up of the current maze
    pub fn power_ups_collected(&self) -> &[bool] {
        &self.power_ups_collected
    }

    /// Cells covered in the current maze
    pub fn visited_cells(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_countdown_active(&self) -> bool {
        self.phase == GamePhase::Countdown
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player,
            battery: self.battery,
            fog_radius: self.fog_radius,
            fog_opacity: self.fog_opacity,
            flash_opacity: self.flash_opacity,
            score: self.score,
            level: self.level,
            high_score: self.high_score.best,
            game_over: self.is_game_over(),
            countdown_active: self.is_countdown_active(),
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record a covered cell; returns true (and scores) only the first time
    pub fn mark_cell_visited(&mut self, index: usize) -> bool {
        let fresh = self.visited.insert(index);
        if fresh {
            self.score += 1;
        }
        fresh
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
