//! Per-frame simulation tick
//!
//! Advances timers and animations, moves the bot, scores coverage, handles pickups,
//! drains the battery, and drives level transitions and game over.

use glam::Vec2;

use super::autopilot;
use super::collision::move_with_collision;
use super::state::{Countdown, GameEvent, GamePhase, GameState, Timer};
use super::wall::segment_distance;
use crate::consts::{MAX_BATTERY, MAX_FRAME_SECS, NOMINAL_FRAME_SECS};
use crate::maze::{Location, generate_maze};
use crate::{ease_in_out_quad, lerp};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalized joystick vector; longer vectors are clamped to unit length
    pub joystick: Vec2,
    /// Idle/demo mode - autopilot drives the bot
    pub idle_mode: bool,
}

/// Advance the game state by `dt` seconds of wall-clock time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    state.time_ticks += 1;
    state.clock += dt as f64;

    // A lock that ends this frame frees movement from the next one
    let was_locked = state.phase.is_locked();
    update_timers(state);

    if was_locked || state.phase.is_locked() {
        return;
    }

    let joystick = if input.idle_mode {
        autopilot::steer(state)
    } else if input.joystick.is_finite() {
        input.joystick.clamp_length_max(1.0)
    } else {
        Vec2::ZERO
    };

    let Some(prev) = move_bot(state, joystick, dt) else {
        return;
    };

    // Coverage
    let covered = state
        .maze
        .as_ref()
        .and_then(|maze| maze.cell_at(state.player).map(|cell| maze.cell_index(cell)));
    if let Some(index) = covered {
        if state.last_cell != Some(index) {
            state.last_cell = Some(index);
            state.mark_cell_visited(index);
        }
    }

    collect_power_ups(state);

    // Battery and fog
    state.battery = (state.battery - state.tuning.battery_drain_rate * dt).max(0.0);
    state.fog_radius = state.tuning.fog_radius_for(state.battery);

    // Measured against the whole motion of this tick so a fast frame cannot skip it
    let exit_reached = state.maze.as_ref().is_some_and(|maze| {
        segment_distance(maze.exit, prev, state.player) < state.tuning.exit_threshold
    });

    if state.battery <= 0.0 {
        game_over(state);
    } else if exit_reached {
        advance_level(state);
    }
}

/// Move the bot for this frame. Returns the position it moved from, or `None` without
/// a maze.
///
/// Motion integrates at most `MAX_FRAME_SECS`; the rest of a long frame is dropped.
fn move_bot(state: &mut GameState, joystick: Vec2, dt: f32) -> Option<Vec2> {
    let maze = state.maze.as_ref()?;
    let tuning = &state.tuning;

    // Speed is per nominal frame, scaled so it does not depend on frame rate
    let move_dt = dt.min(MAX_FRAME_SECS);
    let delta = joystick * tuning.player_max_speed * (move_dt / NOMINAL_FRAME_SECS);
    let prev = state.player;
    state.player = move_with_collision(
        prev,
        delta,
        maze.walls_flat(),
        tuning.effective_radius(),
        tuning.max_step(),
    );
    Some(prev)
}

/// Collect every uncollected power-up the bot overlaps
fn collect_power_ups(state: &mut GameState) {
    let Some(maze) = state.maze.as_ref() else {
        return;
    };
    let tuning = &state.tuning;

    assert_eq!(
        state.power_ups_collected.len(),
        maze.power_ups.len(),
        "power-up flags out of sync with maze"
    );
    let pickup_range = tuning.powerup_radius + tuning.player_radius;
    for (index, power_up) in maze.power_ups.iter().enumerate() {
        if state.power_ups_collected[index] {
            continue;
        }
        if state.player.distance(power_up.pos) < pickup_range {
            state.power_ups_collected[index] = true;
            state.battery = (state.battery + tuning.powerup_value).min(MAX_BATTERY);
            log::debug!("Power-up {} collected, battery {:.1}", index, state.battery);
            state.events.push(GameEvent::PowerUpCollected {
                index,
                battery: state.battery,
            });
        }
    }
}

/// Latch the canvas size and build the first maze.
///
/// Only the first call with a non-empty size has any effect.
pub fn set_canvas_size(state: &mut GameState, width: f32, height: f32) {
    if state.canvas.is_some() {
        return;
    }
    if !(width > 0.0 && height > 0.0) {
        return;
    }

    log::info!("Canvas {}x{}, starting level 1", width, height);
    state.canvas = Some(Vec2::new(width, height));
    load_maze(state, Location::Center, 0);
    start_countdown(state);
}

/// Start a fresh run: level 1, empty score, full battery, new maze.
///
/// Works from any phase. Without a canvas the state resets and stays in `Loading`.
pub fn restart(state: &mut GameState) {
    log::info!("Restarting run (was level {}, score {})", state.level, state.score);

    state.phase = GamePhase::Loading;
    state.level = 1;
    state.score = 0;
    state.battery = state.tuning.starting_battery;
    state.fog_radius = state.tuning.fog_initial_radius;
    state.fog_opacity = 1.0;
    state.flash_opacity = 0.0;
    state.flash = None;
    state.countdown = None;
    state.visited.clear();
    state.last_cell = None;
    state.power_ups_collected.clear();
    state.maze = None;

    if state.canvas.is_some() {
        load_maze(state, Location::Center, 0);
        start_countdown(state);
    }
}

/// Apply due timers and write the animated outputs
fn update_timers(state: &mut GameState) {
    let now = state.clock;

    if let Some(flash) = state.flash {
        state.flash_opacity = 1.0 - ease_in_out_quad(flash.progress(now));
        if flash.is_done(now) {
            state.flash = None;
            state.flash_opacity = 0.0;
            if state.phase == GamePhase::Transitioning {
                start_countdown(state);
            }
        }
    }

    if let Some(countdown) = state.countdown {
        let t = ease_in_out_quad(countdown.timer.progress(now));
        state.fog_opacity = t;
        state.fog_radius = lerp(state.tuning.fog_initial_radius, countdown.fog_target, t);
        if countdown.timer.is_done(now) {
            state.countdown = None;
            if state.phase == GamePhase::Countdown {
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::CountdownFinished);
                log::debug!("Level {} countdown finished", state.level);
            }
        }
    }
}

/// Show the whole maze, then close the fog in to the battery radius while locked
fn start_countdown(state: &mut GameState) {
    state.phase = GamePhase::Countdown;
    state.fog_opacity = 0.0;
    state.fog_radius = state.tuning.fog_initial_radius;
    state.countdown = Some(Countdown {
        timer: Timer::new(state.clock, state.tuning.countdown_duration),
        fog_target: state.tuning.fog_radius_for(state.battery),
    });
    state.push_event(GameEvent::CountdownStarted { level: state.level });
    state.push_event(GameEvent::MusicStart);
}

/// Replace the maze and reset per-level tracking
fn load_maze(state: &mut GameState, start: Location, power_up_count: usize) {
    let Some(canvas) = state.canvas else {
        return;
    };

    let maze = generate_maze(
        &mut state.rng,
        canvas.x,
        canvas.y,
        start,
        power_up_count,
        state.tuning.cell_size,
    );

    state.player = maze.start;
    state.power_ups_collected = vec![false; maze.power_ups.len()];
    state.visited.clear();
    state.last_cell = None;
    state.maze = Some(maze);
}

/// Exit reached: lock, flash, and build the next maze starting where this one ended
fn advance_level(state: &mut GameState) {
    let Some(next_start) = state.maze.as_ref().map(|m| m.exit_location) else {
        return;
    };

    state.phase = GamePhase::Transitioning;
    let power_ups = state.tuning.power_up_count_for(state.battery);
    load_maze(state, next_start, power_ups);

    state.level += 1;
    state.flash_opacity = 1.0;
    state.flash = Some(Timer::new(state.clock, state.tuning.flash_duration));
    state.push_event(GameEvent::LevelComplete { level: state.level });

    log::info!(
        "Level {} from {} with {} power-ups (battery {:.1}, score {})",
        state.level,
        next_start.as_str(),
        power_ups,
        state.battery,
        state.score
    );
}

/// Battery depleted: lock the run and settle the high score
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.flash = None;
    state.countdown = None;

    let new_high_score = state.high_score.record(state.score);
    state.push_event(GameEvent::MusicStop);
    state.push_event(GameEvent::GameOver {
        score: state.score,
        level: state.level,
        new_high_score,
    });
    if new_high_score {
        state.push_event(GameEvent::NewHighScore { score: state.score });
    }

    log::info!(
        "Game over at level {} with score {} (best {})",
        state.level,
        state.score,
        state.high_score.best
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::maze::{Cell, PowerUp};

    const DT: f32 = 1.0 / 60.0;

    /// A state past its countdown, ready to move
    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        set_canvas_size(&mut state, 400.0, 400.0);
        skip_countdown(&mut state);
        state.drain_events();
        state
    }

    fn skip_countdown(state: &mut GameState) {
        tick(state, &TickInput::default(), COUNTDOWN_DURATION + 0.01);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_loading_until_canvas() {
        let mut state = GameState::new(1);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase, GamePhase::Loading);

        set_canvas_size(&mut state, 0.0, 300.0);
        assert_eq!(state.phase, GamePhase::Loading);
        assert!(state.maze().is_none());

        set_canvas_size(&mut state, 400.0, 400.0);
        assert_eq!(state.phase, GamePhase::Countdown);
        let maze = state.maze().unwrap();
        assert_eq!((maze.cols(), maze.rows()), (10, 10));
        assert!(maze.power_ups.is_empty());
        assert_eq!(state.player, maze.start);
    }

    #[test]
    fn test_canvas_size_latches_once() {
        let mut state = GameState::new(1);
        set_canvas_size(&mut state, 400.0, 400.0);
        let walls = state.maze().unwrap().walls.clone();
        set_canvas_size(&mut state, 800.0, 600.0);
        assert_eq!(state.canvas_size(), Some(Vec2::new(400.0, 400.0)));
        assert_eq!(state.maze().unwrap().walls, walls);
    }

    #[test]
    fn test_countdown_locks_movement_and_animates_fog() {
        let mut state = GameState::new(1);
        set_canvas_size(&mut state, 400.0, 400.0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::CountdownStarted { level: 1 }));
        assert!(events.contains(&GameEvent::MusicStart));
        assert_eq!(state.fog_opacity, 0.0);
        assert_eq!(state.fog_radius, FOG_INITIAL_RADIUS);

        let start = state.player;
        let push = TickInput {
            joystick: Vec2::X,
            ..Default::default()
        };
        tick(&mut state, &push, COUNTDOWN_DURATION / 2.0);
        assert_eq!(state.player, start);
        assert_eq!(state.battery, 100.0);
        assert!(state.fog_opacity > 0.0 && state.fog_opacity < 1.0);
        assert!(state.is_countdown_active());

        tick(&mut state, &push, COUNTDOWN_DURATION / 2.0 + 0.01);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.fog_opacity, 1.0);
        assert_eq!(state.fog_radius, FOG_INITIAL_RADIUS);
        assert!(state.drain_events().contains(&GameEvent::CountdownFinished));
    }

    #[test]
    fn test_battery_drain_one_second() {
        let mut state = playing(1);
        tick(&mut state, &idle(), 1.0);
        assert!((state.battery - 99.0).abs() < 1e-4);
        let expected = FOG_MIN_RADIUS + 0.99 * (FOG_INITIAL_RADIUS - FOG_MIN_RADIUS);
        assert!((state.fog_radius - expected).abs() < 1e-3);
    }

    #[test]
    fn test_movement_is_frame_rate_independent() {
        let mut a = playing(11);
        let mut b = playing(11);
        // Push toward the nearest open side so both runs travel freely
        let maze = a.maze().unwrap();
        let here = maze.cell_at(a.player).unwrap();
        let next = maze.grid.open_neighbors(here).next().unwrap();
        let dir = (maze.cell_center(next) - a.player).normalize();
        let input = TickInput {
            joystick: dir,
            ..Default::default()
        };

        for _ in 0..2 {
            tick(&mut a, &input, DT);
        }
        tick(&mut b, &input, 2.0 * DT);
        assert!(a.player.distance(b.player) < 1e-3);
        assert!((a.player.distance(a.maze().unwrap().start) - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_joystick_is_clamped() {
        let mut state = playing(11);
        let maze = state.maze().unwrap();
        let here = maze.cell_at(state.player).unwrap();
        let next = maze.grid.open_neighbors(here).next().unwrap();
        let dir = (maze.cell_center(next) - state.player).normalize();
        let start = state.player;

        let input = TickInput {
            joystick: dir * 5.0,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!((state.player.distance(start) - PLAYER_MAX_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_coverage_scores_distinct_cells_once() {
        let mut state = playing(3);
        let maze = state.maze().unwrap().clone();
        let here = maze.cell_at(state.player).unwrap();
        let next = maze.grid.open_neighbors(here).next().unwrap();

        // First playing tick covers the start cell
        tick(&mut state, &idle(), DT);
        assert_eq!(state.score, 1);

        // Hop between two cells repeatedly; only two distinct cells ever count
        for _ in 0..3 {
            state.player = maze.cell_center(next);
            tick(&mut state, &idle(), DT);
            state.player = maze.cell_center(here);
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.score, 2);
        assert_eq!(state.visited_cells().len(), 2);
        assert!(state.visited_cells().contains(&maze.cell_index(here)));
        assert!(state.visited_cells().contains(&maze.cell_index(next)));
    }

    #[test]
    fn test_coverage_counts_k_cells() {
        let mut state = playing(4);
        let maze = state.maze().unwrap().clone();
        let path = maze
            .grid
            .shortest_path(maze.start_cell(), Cell::new(0, 0))
            .unwrap();
        for cell in &path {
            state.player = maze.cell_center(*cell);
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.score, path.len() as u64);
    }

    #[test]
    fn test_power_up_pickup_once() {
        let mut state = playing(5);
        let target = {
            let maze = state.maze.as_mut().unwrap();
            let cell = Cell::new(2, 3);
            let pos = maze.cell_center(cell);
            maze.power_ups = vec![PowerUp { pos }];
            pos
        };
        state.power_ups_collected = vec![false];
        state.battery = 50.0;
        state.player = target + Vec2::new(3.0, 0.0);

        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.battery, 70.0);
        assert_eq!(state.power_ups_collected(), &[true]);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::PowerUpCollected {
                index: 0,
                battery: 70.0
            }]
        );

        for _ in 0..5 {
            tick(&mut state, &idle(), 0.0);
        }
        assert_eq!(state.battery, 70.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_power_up_caps_battery() {
        let mut state = playing(5);
        let pos = state.player;
        state.maze.as_mut().unwrap().power_ups = vec![PowerUp { pos }];
        state.power_ups_collected = vec![false];
        state.battery = 95.0;
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.battery, 100.0);
    }

    #[test]
    #[should_panic(expected = "power-up flags out of sync")]
    fn test_power_up_flag_mismatch_is_fatal() {
        let mut state = playing(5);
        state.power_ups_collected = vec![false, false];
        tick(&mut state, &idle(), DT);
    }

    #[test]
    fn test_exit_starts_transition() {
        let mut state = playing(6);
        state.battery = 50.0;
        let (old_exit, old_exit_location) = {
            let maze = state.maze().unwrap();
            (maze.exit, maze.exit_location)
        };
        state.player = old_exit;
        state.mark_cell_visited(0);
        let score = state.score;

        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase, GamePhase::Transitioning);
        assert_eq!(state.level, 2);
        assert_eq!(state.flash_opacity, 1.0);
        assert!(state.visited_cells().is_empty());
        assert!(state.score >= score);

        let maze = state.maze().unwrap();
        assert_eq!(maze.start_location, old_exit_location);
        assert_eq!(maze.start, old_exit);
        assert_eq!(state.player, maze.start);
        // Battery 50 is between the thresholds
        assert!(maze.power_ups.len() <= 1);
        assert_eq!(state.power_ups_collected().len(), maze.power_ups.len());
        assert!(state.drain_events().contains(&GameEvent::LevelComplete { level: 2 }));

        // Frozen during the flash
        let frozen = state.player;
        let push = TickInput {
            joystick: Vec2::Y,
            ..Default::default()
        };
        tick(&mut state, &push, FLASH_DURATION / 2.0);
        assert_eq!(state.player, frozen);
        assert!(state.flash_opacity > 0.0 && state.flash_opacity < 1.0);

        // Flash done: countdown for the new maze
        tick(&mut state, &push, FLASH_DURATION);
        assert_eq!(state.phase, GamePhase::Countdown);
        assert_eq!(state.flash_opacity, 0.0);
        assert!(state.drain_events().contains(&GameEvent::CountdownStarted { level: 2 }));

        skip_countdown(&mut state);
        assert_eq!(state.player, frozen);
    }

    #[test]
    fn test_fast_tick_cannot_skip_exit() {
        for seed in [6, 14, 15] {
            let mut state = playing(seed);
            let (exit, dir) = {
                let maze = state.maze().unwrap();
                let exit_cell = maze.exit_cell();
                let open = maze.grid.open_neighbors(exit_cell).next().unwrap();
                (maze.exit, (maze.cell_center(open) - maze.exit).normalize())
            };
            // Start a quarter cell into the open neighbour; one long frame runs back
            // through the exit cell
            state.player = exit + dir * 30.0;
            let input = TickInput {
                joystick: -dir,
                ..Default::default()
            };
            tick(&mut state, &input, 15.0 * DT);
            assert_eq!(state.level, 2, "seed {seed}");
            assert_eq!(state.phase, GamePhase::Transitioning);
        }
    }

    #[test]
    fn test_power_up_count_by_battery() {
        for (battery, expected) in [(90.0, 0usize), (50.0, 1), (10.0, 2)] {
            let mut state = playing(7);
            state.battery = battery;
            state.player = state.maze().unwrap().exit;
            tick(&mut state, &idle(), 0.0);
            assert_eq!(state.level, 2);
            let maze = state.maze().unwrap();
            let candidates = maze
                .grid
                .dead_ends()
                .into_iter()
                .filter(|c| *c != maze.start_cell() && *c != maze.exit_cell())
                .count();
            assert_eq!(maze.power_ups.len(), expected.min(candidates));
        }
    }

    #[test]
    fn test_game_over_on_empty_battery() {
        let mut state = playing(8).with_high_score(0);
        state.mark_cell_visited(1);
        state.mark_cell_visited(2);
        state.battery = 0.5;

        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.battery, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.snapshot().game_over);
        assert_eq!(state.fog_radius, FOG_MIN_RADIUS);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::MusicStop));
        assert!(events.contains(&GameEvent::GameOver {
            score: state.score,
            level: 1,
            new_high_score: true
        }));
        assert!(events.contains(&GameEvent::NewHighScore { score: state.score }));
        assert_eq!(state.high_score.best, state.score);

        // Terminal: further ticks change nothing
        let snap = state.snapshot();
        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.snapshot().score, snap.score);
        assert_eq!(state.snapshot().player, snap.player);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_without_new_best() {
        let mut state = playing(8).with_high_score(1_000);
        state.battery = 0.01;
        tick(&mut state, &idle(), 1.0);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                new_high_score: false,
                ..
            }
        )));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
        assert_eq!(state.high_score.best, 1_000);
    }

    #[test]
    fn test_empty_battery_beats_exit() {
        let mut state = playing(9);
        state.battery = 0.001;
        state.player = state.maze().unwrap().exit;
        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.level, 1);
    }

    fn assert_fresh_run(state: &GameState) {
        assert_eq!(state.battery, 100.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.visited_cells().is_empty());
        assert!(state.power_ups_collected().is_empty());
        assert_eq!(state.phase, GamePhase::Countdown);
        let maze = state.maze().unwrap();
        assert_eq!(maze.start_location, Location::Center);
        assert!(maze.power_ups.is_empty());
        assert_eq!(state.player, maze.start);
        assert_eq!(state.flash_opacity, 0.0);
    }

    #[test]
    fn test_restart_from_game_over_and_playing() {
        let mut state = playing(10);
        state.battery = 0.01;
        tick(&mut state, &idle(), 1.0);
        assert!(state.is_game_over());
        restart(&mut state);
        assert_fresh_run(&state);

        let mut state = playing(10);
        state.mark_cell_visited(3);
        state.battery = 40.0;
        restart(&mut state);
        assert_fresh_run(&state);
        restart(&mut state);
        assert_fresh_run(&state);
    }

    #[test]
    fn test_restart_during_flash_ignores_stale_timer() {
        let mut state = playing(12);
        state.player = state.maze().unwrap().exit;
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.phase, GamePhase::Transitioning);

        restart(&mut state);
        assert_fresh_run(&state);

        // The old flash would have ended here; the new countdown must still hold
        tick(&mut state, &idle(), FLASH_DURATION + 0.01);
        assert_eq!(state.phase, GamePhase::Countdown);
        assert_eq!(state.flash_opacity, 0.0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_restart_before_layout_stays_loading() {
        let mut state = GameState::new(1);
        restart(&mut state);
        assert_eq!(state.phase, GamePhase::Loading);
        assert!(state.maze().is_none());
        assert_eq!(state.battery, 100.0);
    }

    #[test]
    fn test_bot_never_leaves_corridors() {
        let mut state = playing(13);
        let radius = state.tuning.effective_radius();
        let dirs = [Vec2::X, Vec2::Y, -Vec2::X, -Vec2::Y, Vec2::ONE.normalize()];
        for i in 0..600 {
            let input = TickInput {
                joystick: dirs[(i / 40) % dirs.len()],
                ..Default::default()
            };
            // Occasional long frames exercise the swept path
            let dt = if i % 50 == 0 { 0.25 } else { DT };
            tick(&mut state, &input, dt);
            if state.phase != GamePhase::Playing {
                break;
            }
            let maze = state.maze().unwrap();
            for wall in &maze.walls {
                assert!(wall.distance_to(state.player) >= radius - 1e-3);
            }
        }
    }

    #[test]
    fn test_huge_frame_moves_at_most_one_capped_frame() {
        let mut state = playing(16);
        let start = state.player;
        let input = TickInput {
            joystick: Vec2::X,
            ..Default::default()
        };
        // A host resuming from the background after hours
        tick(&mut state, &input, 20_000.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.battery, 0.0);

        let reach = PLAYER_MAX_SPEED * MAX_FRAME_SECS / NOMINAL_FRAME_SECS;
        assert!(state.player.distance(start) <= reach + CELL_SIZE);
    }

    #[test]
    fn test_long_frame_drains_full_dt() {
        let mut state = playing(16);
        let input = TickInput {
            joystick: Vec2::X,
            ..Default::default()
        };
        tick(&mut state, &input, 2.0);
        assert!((state.battery - 98.0).abs() < 1e-4);
    }

    #[test]
    fn test_coverage_respects_cells_already_marked() {
        let mut state = playing(3);
        let start = {
            let maze = state.maze().unwrap();
            maze.cell_index(maze.start_cell())
        };
        assert!(state.mark_cell_visited(start));
        tick(&mut state, &idle(), DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.visited_cells().len(), 1);
    }

    #[test]
    fn test_huge_canvas_gets_capped_grid() {
        let mut state = GameState::new(1);
        set_canvas_size(&mut state, 1.0e7, 1.0e7);
        let maze = state.maze().unwrap();
        assert_eq!((maze.cols(), maze.rows()), (MAX_GRID_DIM, MAX_GRID_DIM));
        assert_eq!(state.player, maze.start);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        set_canvas_size(&mut a, 480.0, 320.0);
        set_canvas_size(&mut b, 480.0, 320.0);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.maze().unwrap().walls, b.maze().unwrap().walls);
    }
}
