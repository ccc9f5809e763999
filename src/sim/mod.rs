//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`'s `dt`
//! - Seeded RNG only
//! - Side effects leave as queued events, never direct calls
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod wall;

pub use collision::{CollisionResult, circle_segment_collision, move_with_collision, resolve_collisions};
pub use state::{BatteryLevel, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, restart, set_canvas_size, tick};
pub use wall::{Wall, closest_point_on_segment, flatten, segment_distance};
