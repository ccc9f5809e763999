//! Maze generation: grid sizing, carving, wall emission and power-up placement

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Cell, Direction, Grid};
use super::{Location, MazeData, PowerUp};
use crate::consts::{MAX_GRID_DIM, MIN_GRID_DIM};
use crate::sim::wall::Wall;

/// Generate a maze that fits a `width` x `height` canvas.
///
/// The grid uses as many `cell_size` cells as fit (never fewer than 3x3, so degenerate
/// canvases still get a playable maze, and never more than 256 per axis) and is
/// centered on the canvas. Carving starts
/// at `start_location`; the exit is one of the other four locations chosen uniformly.
/// Up to `power_up_count` power-ups land in dead ends other than the start and exit.
pub fn generate_maze<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    start_location: Location,
    power_up_count: usize,
    cell_size: f32,
) -> MazeData {
    let width = if width.is_finite() { width } else { 0.0 };
    let height = if height.is_finite() { height } else { 0.0 };

    let cols = grid_dim(width, cell_size);
    let rows = grid_dim(height, cell_size);

    let offset = Vec2::new(
        (width - cols as f32 * cell_size) / 2.0,
        (height - rows as f32 * cell_size) / 2.0,
    );

    let start_cell = start_location.to_cell(cols, rows);

    let exit_candidates: Vec<Location> = Location::ALL
        .into_iter()
        .filter(|loc| *loc != start_location)
        .collect();
    let exit_location = exit_candidates[rng.random_range(0..exit_candidates.len())];
    let exit_cell = exit_location.to_cell(cols, rows);

    let mut grid = Grid::new(cols, rows);
    grid.carve(start_cell, rng);

    let walls = grid_walls(&grid, cell_size, offset);

    let mut maze = MazeData {
        walls,
        grid,
        cell_size,
        offset,
        start: Vec2::ZERO,
        start_location,
        exit: Vec2::ZERO,
        exit_location,
        power_ups: Vec::new(),
    };
    maze.start = maze.cell_center(start_cell);
    maze.exit = maze.cell_center(exit_cell);
    maze.power_ups = place_power_ups(rng, &maze, start_cell, exit_cell, power_up_count);

    log::debug!(
        "Generated {}x{} maze: {} walls, start {} -> exit {}, {} power-ups",
        cols,
        rows,
        maze.walls.len(),
        start_location.as_str(),
        exit_location.as_str(),
        maze.power_ups.len()
    );

    maze
}

/// Cells along one axis, clamped to the grid size limits
fn grid_dim(extent: f32, cell_size: f32) -> u32 {
    if cell_size <= 0.0 {
        return MIN_GRID_DIM;
    }
    let fit = (extent / cell_size).floor();
    if fit > MAX_GRID_DIM as f32 {
        MAX_GRID_DIM
    } else if fit > MIN_GRID_DIM as f32 {
        fit as u32
    } else {
        MIN_GRID_DIM
    }
}

/// Turn wall masks into segments without duplicates.
///
/// Every cell contributes its South and East walls; only the top row adds North walls
/// and only the left column adds West walls, since every other North/West wall is the
/// South/East wall of a neighbour.
pub fn grid_walls(grid: &Grid, cell_size: f32, offset: Vec2) -> Vec<Wall> {
    let mut walls = Vec::new();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell = Cell::new(col, row);
            let x = offset.x + col as f32 * cell_size;
            let y = offset.y + row as f32 * cell_size;

            if row == 0 && grid.has_wall(cell, Direction::North) {
                walls.push(Wall::new(x, y, x + cell_size, y));
            }
            if col == 0 && grid.has_wall(cell, Direction::West) {
                walls.push(Wall::new(x, y, x, y + cell_size));
            }
            if grid.has_wall(cell, Direction::South) {
                walls.push(Wall::new(x, y + cell_size, x + cell_size, y + cell_size));
            }
            if grid.has_wall(cell, Direction::East) {
                walls.push(Wall::new(x + cell_size, y, x + cell_size, y + cell_size));
            }
        }
    }

    walls
}

fn place_power_ups<R: Rng + ?Sized>(
    rng: &mut R,
    maze: &MazeData,
    start: Cell,
    exit: Cell,
    count: usize,
) -> Vec<PowerUp> {
    if count == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Cell> = maze
        .grid
        .dead_ends()
        .into_iter()
        .filter(|cell| *cell != start && *cell != exit)
        .collect();

    candidates.shuffle(rng);
    candidates.truncate(count);

    candidates
        .into_iter()
        .map(|cell| PowerUp {
            pos: maze.cell_center(cell),
        })
        .collect()
}
