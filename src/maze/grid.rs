//! Cell grid with per-cell wall masks
//!
//! Each cell stores a 4-bit mask of the walls still standing. Carving clears the
//! matching bit on both sides of a shared wall, so the two views never disagree.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Wall bit for each side of a cell
pub const NORTH: u8 = 1;
pub const SOUTH: u8 = 2;
pub const EAST: u8 = 4;
pub const WEST: u8 = 8;
pub const ALL_WALLS: u8 = NORTH | SOUTH | EAST | WEST;

/// Grid coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: u32,
    pub row: u32,
}

impl Cell {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Orthogonal direction between neighbouring cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Wall bit on the cell we leave through
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => NORTH,
            Direction::South => SOUTH,
            Direction::East => EAST,
            Direction::West => WEST,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Rectangular maze grid, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<u8>,
}

impl Grid {
    /// A grid with every wall standing
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![ALL_WALLS; cols as usize * rows as usize],
        }
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.cols as usize + cell.col as usize
    }

    /// Wall mask of a cell
    #[inline]
    pub fn walls(&self, cell: Cell) -> u8 {
        self.cells[self.index(cell)]
    }

    #[inline]
    pub fn has_wall(&self, cell: Cell, dir: Direction) -> bool {
        self.walls(cell) & dir.bit() != 0
    }

    /// Neighbour in `dir`, if it is on the grid
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        match dir {
            Direction::North if cell.row > 0 => Some(Cell::new(cell.col, cell.row - 1)),
            Direction::South if cell.row + 1 < self.rows => Some(Cell::new(cell.col, cell.row + 1)),
            Direction::East if cell.col + 1 < self.cols => Some(Cell::new(cell.col + 1, cell.row)),
            Direction::West if cell.col > 0 => Some(Cell::new(cell.col - 1, cell.row)),
            _ => None,
        }
    }

    /// Neighbours reachable through an open side
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            if self.has_wall(cell, dir) {
                None
            } else {
                self.neighbor(cell, dir)
            }
        })
    }

    /// Remove the wall between `cell` and its neighbour in `dir`, on both sides
    pub fn open(&mut self, cell: Cell, dir: Direction) {
        if let Some(next) = self.neighbor(cell, dir) {
            let (i, j) = (self.index(cell), self.index(next));
            self.cells[i] &= !dir.bit();
            self.cells[j] &= !dir.opposite().bit();
        }
    }

    /// Carve a perfect maze with an iterative recursive backtracker rooted at `start`.
    ///
    /// The explicit stack keeps call depth constant however large the grid is.
    pub fn carve<R: Rng + ?Sized>(&mut self, start: Cell, rng: &mut R) {
        let mut visited = vec![false; self.cells.len()];
        let mut stack = Vec::with_capacity(self.cells.len());
        let mut options = [(Direction::North, Cell::default()); 4];

        visited[self.index(start)] = true;
        stack.push(start);

        while let Some(&current) = stack.last() {
            let mut count = 0;
            for dir in Direction::ALL {
                if let Some(next) = self.neighbor(current, dir) {
                    if !visited[self.index(next)] {
                        options[count] = (dir, next);
                        count += 1;
                    }
                }
            }

            if count == 0 {
                stack.pop();
                continue;
            }

            let (dir, next) = options[rng.random_range(0..count)];
            self.open(current, dir);
            visited[self.index(next)] = true;
            stack.push(next);
        }
    }

    /// Number of open passages between neighbouring cells
    pub fn passage_count(&self) -> usize {
        let mut count = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(col, row);
                if col + 1 < self.cols && !self.has_wall(cell, Direction::East) {
                    count += 1;
                }
                if row + 1 < self.rows && !self.has_wall(cell, Direction::South) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Cells with exactly one open side
    pub fn dead_ends(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(col, row);
                if self.walls(cell).count_ones() == 3 {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// Breadth-first shortest route from `from` to `to`, both inclusive
    pub fn shortest_path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        let mut prev: Vec<Option<usize>> = vec![None; self.cells.len()];
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        seen[self.index(from)] = true;
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            if cell == to {
                let mut path = vec![to];
                let mut idx = self.index(to);
                while let Some(p) = prev[idx] {
                    path.push(self.cell_at_index(p));
                    idx = p;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.open_neighbors(cell) {
                let j = self.index(next);
                if !seen[j] {
                    seen[j] = true;
                    prev[j] = Some(self.index(cell));
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Whether every cell can reach every other cell
    pub fn is_connected(&self) -> bool {
        if self.cells.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![Cell::new(0, 0)];
        seen[0] = true;
        let mut reached = 1;
        while let Some(cell) = stack.pop() {
            for next in self.open_neighbors(cell) {
                let j = self.index(next);
                if !seen[j] {
                    seen[j] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }
        reached == self.cells.len()
    }

    fn cell_at_index(&self, index: usize) -> Cell {
        Cell::new(index as u32 % self.cols, index as u32 / self.cols)
    }
}
