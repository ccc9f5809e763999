//! Idle/demo mode steering
//!
//! Walks the passage graph toward the exit, detouring for an uncollected power-up when
//! the battery is low. Output is a joystick vector like a player would produce.

use glam::Vec2;

use super::state::GameState;
use crate::maze::{Cell, MazeData};

/// Joystick vector that heads for the current goal
pub fn steer(state: &GameState) -> Vec2 {
    let Some(maze) = state.maze() else {
        return Vec2::ZERO;
    };
    let Some(here) = maze.cell_at(state.player) else {
        // Off the grid (tiny canvas edge case): head back to the start
        return (maze.start - state.player).normalize_or_zero();
    };

    let (goal_cell, goal_point) = goal(state, maze, here);

    let waypoint = if here == goal_cell {
        goal_point
    } else {
        match maze.grid.shortest_path(here, goal_cell) {
            Some(path) if path.len() > 1 => maze.cell_center(path[1]),
            _ => goal_point,
        }
    };

    (waypoint - state.player).normalize_or_zero()
}

/// Nearest reachable uncollected power-up when low on battery, else the exit
fn goal(state: &GameState, maze: &MazeData, here: Cell) -> (Cell, Vec2) {
    let exit = (maze.exit_cell(), maze.exit);

    if state.battery >= state.tuning.battery_low_threshold {
        return exit;
    }

    maze.power_ups
        .iter()
        .zip(state.power_ups_collected())
        .filter(|(_, collected)| !**collected)
        .filter_map(|(pu, _)| {
            let cell = maze.cell_at(pu.pos)?;
            let hops = maze.grid.shortest_path(here, cell)?.len();
            Some((hops, cell, pu.pos))
        })
        .min_by_key(|(hops, _, _)| *hops)
        .map(|(_, cell, pos)| (cell, pos))
        .unwrap_or(exit)
}
