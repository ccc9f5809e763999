//! Procedural maze generation
//!
//! A maze is a perfect (spanning-tree) grid carved by an iterative recursive
//! backtracker, turned into a minimal set of wall segments in canvas pixels, with
//! battery power-ups dropped into dead ends. Each level gets a brand new [`MazeData`];
//! nothing is mutated after generation.

pub mod generate;
pub mod grid;

pub use generate::generate_maze;
pub use grid::{Cell, Direction, Grid};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::wall::{Wall, flatten};

/// Semantic anchor used to pick start and exit cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::TopLeft,
        Location::TopRight,
        Location::BottomLeft,
        Location::BottomRight,
        Location::Center,
    ];

    /// Grid cell this location refers to
    pub fn to_cell(self, cols: u32, rows: u32) -> Cell {
        match self {
            Location::TopLeft => Cell::new(0, 0),
            Location::TopRight => Cell::new(cols - 1, 0),
            Location::BottomLeft => Cell::new(0, rows - 1),
            Location::BottomRight => Cell::new(cols - 1, rows - 1),
            Location::Center => Cell::new(cols / 2, rows / 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::TopLeft => "top-left",
            Location::TopRight => "top-right",
            Location::BottomLeft => "bottom-left",
            Location::BottomRight => "bottom-right",
            Location::Center => "center",
        }
    }
}

/// A battery pickup placed in a dead end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
}

/// One generated level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeData {
    /// Minimal non-duplicated wall set
    pub walls: Vec<Wall>,
    /// Carved wall masks
    pub grid: Grid,
    pub cell_size: f32,
    /// Canvas position of the grid's top-left corner (centers the grid)
    pub offset: Vec2,
    pub start: Vec2,
    pub start_location: Location,
    pub exit: Vec2,
    pub exit_location: Location,
    pub power_ups: Vec<PowerUp>,
}

impl MazeData {
    /// Walls as `[x1, y1, x2, y2, ...]`
    #[inline]
    pub fn walls_flat(&self) -> &[f32] {
        flatten(&self.walls)
    }

    #[inline]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.grid.cols()
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Pixel center of a cell
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_size / 2.0)
    }

    /// Pixel top-left corner of a cell
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        self.offset + Vec2::new(cell.col as f32, cell.row as f32) * self.cell_size
    }

    /// Cell containing a pixel position, if it lies on the grid
    pub fn cell_at(&self, pos: Vec2) -> Option<Cell> {
        if self.cell_size <= 0.0 {
            return None;
        }
        let local = (pos - self.offset) / self.cell_size;
        let (col, row) = (local.x.floor(), local.y.floor());
        if col < 0.0 || row < 0.0 || col >= self.cols() as f32 || row >= self.rows() as f32 {
            return None;
        }
        Some(Cell::new(col as u32, row as u32))
    }

    /// Row-major index (`row * cols + col`)
    #[inline]
    pub fn cell_index(&self, cell: Cell) -> usize {
        self.grid.index(cell)
    }

    /// Inverse of [`MazeData::cell_index`]
    pub fn cell_from_index(&self, index: usize) -> Cell {
        let cols = self.cols() as usize;
        Cell::new((index % cols) as u32, (index / cols) as u32)
    }

    /// Top-left corner and side length of a cell by index, for drawing covered cells
    pub fn cell_rect(&self, index: usize) -> (Vec2, f32) {
        (self.cell_origin(self.cell_from_index(index)), self.cell_size)
    }

    pub fn start_cell(&self) -> Cell {
        self.start_location.to_cell(self.cols(), self.rows())
    }

    pub fn exit_cell(&self) -> Cell {
        self.exit_location.to_cell(self.cols(), self.rows())
    }
}
