// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The pathfinding grid and its editing operations.
//!
//! Exactly one cell is the start and one the finish. A node's `previous`
//! is a coordinate, not a reference: it is only ever unwound from the
//! finish back towards the start.

use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::Serialize;

/// A `(row, col)` grid position.
pub type Cell = (usize, usize);

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 40;
pub const DEFAULT_START: Cell = (10, 5);
pub const DEFAULT_FINISH: Cell = (10, 35);

/// Interior wall probability used by [`Grid::generate_maze`].
pub const MAZE_WALL_PROBABILITY: f64 = 0.3;

/// Narration after a maze has been generated.
pub const MAZE_GENERATED: &str = "Maze generated! Click Visualize to start the algorithm.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridNode {
    pub row: usize,
    pub col: usize,
    pub is_start: bool,
    pub is_finish: bool,
    pub is_wall: bool,
    pub is_visited: bool,
    pub is_path: bool,
    /// `None` is unreached.
    pub distance: Option<u32>,
    pub previous: Option<Cell>,
    pub g_score: Option<u32>,
    pub h_score: Option<u32>,
    pub f_score: Option<u32>,
}

impl GridNode {
    fn new(row: usize, col: usize) -> Self {
        GridNode {
            row,
            col,
            is_start: false,
            is_finish: false,
            is_wall: false,
            is_visited: false,
            is_path: false,
            distance: None,
            previous: None,
            g_score: None,
            h_score: None,
            f_score: None,
        }
    }

    pub fn cell(&self) -> Cell {
        (self.row, self.col)
    }

    fn clear_search(&mut self) {
        self.is_visited = false;
        self.is_path = false;
        self.distance = None;
        self.previous = None;
        self.g_score = None;
        self.h_score = None;
        self.f_score = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    nodes: Vec<GridNode>,
    start: Cell,
    finish: Cell,
}

impl Default for Grid {
    fn default() -> Self {
        let mut nodes = Vec::with_capacity(DEFAULT_ROWS * DEFAULT_COLS);
        for row in 0..DEFAULT_ROWS {
            for col in 0..DEFAULT_COLS {
                nodes.push(GridNode::new(row, col));
            }
        }
        let mut grid = Grid {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            nodes,
            start: DEFAULT_START,
            finish: DEFAULT_FINISH,
        };
        grid.mark_endpoints();
        grid
    }
}

impl Grid {
    pub fn new(rows: usize, cols: usize, start: Cell, finish: Cell) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        for (row, col) in [start, finish] {
            if row >= rows || col >= cols {
                return Err(ConfigError::out_of_bounds(row, col, rows, cols));
            }
        }
        if start == finish {
            return Err(ConfigError::EndpointsCoincide {
                row: start.0,
                col: start.1,
            });
        }
        let mut nodes = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                nodes.push(GridNode::new(row, col));
            }
        }
        let mut grid = Grid {
            rows,
            cols,
            nodes,
            start,
            finish,
        };
        grid.mark_endpoints();
        Ok(grid)
    }

    /// Build from text rows: `#` wall, `S` start, `F` finish, anything else open.
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let find = |target: char| {
            rows.iter().enumerate().find_map(|(r, line)| {
                line.chars().position(|ch| ch == target).map(|c| (r, c))
            })
        };
        let start = find('S').unwrap_or((0, 0));
        let finish = find('F').unwrap_or((height.saturating_sub(1), width.saturating_sub(1)));
        let mut grid = Grid::new(height, width, start, finish)?;
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set_wall((r, c), true)?;
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn finish(&self) -> Cell {
        self.finish
    }

    pub fn contains(&self, (row, col): Cell) -> bool {
        row < self.rows && col < self.cols
    }

    fn check(&self, cell: Cell) -> Result<usize> {
        if self.contains(cell) {
            Ok(cell.0 * self.cols + cell.1)
        } else {
            Err(ConfigError::out_of_bounds(cell.0, cell.1, self.rows, self.cols))
        }
    }

    fn index(&self, (row, col): Cell) -> usize {
        row * self.cols + col
    }

    /// Panics when `cell` is outside the grid.
    pub fn node(&self, cell: Cell) -> &GridNode {
        &self.nodes[self.index(cell)]
    }

    pub(crate) fn node_mut(&mut self, cell: Cell) -> &mut GridNode {
        let index = self.index(cell);
        &mut self.nodes[index]
    }

    pub fn get(&self, cell: Cell) -> Option<&GridNode> {
        self.contains(cell).then(|| self.node(cell))
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|node| node.is_wall)
    }

    /// In-bounds neighbours in up, down, left, right order.
    pub fn neighbors(&self, (row, col): Cell) -> impl Iterator<Item = Cell> + '_ {
        let up = row.checked_sub(1).map(|r| (r, col));
        let down = (row + 1 < self.rows).then_some((row + 1, col));
        let left = col.checked_sub(1).map(|c| (row, c));
        let right = (col + 1 < self.cols).then_some((row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    fn mark_endpoints(&mut self) {
        let (start, finish) = (self.start, self.finish);
        for node in &mut self.nodes {
            node.is_start = node.cell() == start;
            node.is_finish = node.cell() == finish;
        }
        self.node_mut(start).is_wall = false;
        self.node_mut(finish).is_wall = false;
    }

    /// Flip a wall. The start and finish are never walled; returns whether
    /// anything changed.
    pub fn toggle_wall(&mut self, cell: Cell) -> Result<bool> {
        let index = self.check(cell)?;
        let node = &mut self.nodes[index];
        if node.is_start || node.is_finish {
            return Ok(false);
        }
        node.is_wall = !node.is_wall;
        Ok(true)
    }

    pub fn set_wall(&mut self, cell: Cell, wall: bool) -> Result<bool> {
        let index = self.check(cell)?;
        let node = &mut self.nodes[index];
        if node.is_start || node.is_finish || node.is_wall == wall {
            return Ok(false);
        }
        node.is_wall = wall;
        Ok(true)
    }

    /// Move the start. A wall under the new position is removed.
    pub fn move_start(&mut self, cell: Cell) -> Result<()> {
        self.check(cell)?;
        if cell == self.finish {
            return Err(ConfigError::EndpointsCoincide { row: cell.0, col: cell.1 });
        }
        self.start = cell;
        self.mark_endpoints();
        Ok(())
    }

    /// Move the finish. A wall under the new position is removed.
    pub fn move_finish(&mut self, cell: Cell) -> Result<()> {
        self.check(cell)?;
        if cell == self.start {
            return Err(ConfigError::EndpointsCoincide { row: cell.0, col: cell.1 });
        }
        self.finish = cell;
        self.mark_endpoints();
        Ok(())
    }

    /// Forget the last search but keep walls and endpoints.
    pub fn clear_path(&mut self) {
        for node in &mut self.nodes {
            node.clear_search();
        }
    }

    /// Remove every wall and forget the last search.
    pub fn clear_walls(&mut self) {
        for node in &mut self.nodes {
            node.is_wall = false;
            node.clear_search();
        }
    }

    pub fn wall_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_wall).count()
    }

    /// Replace the walls with a random maze.
    ///
    /// The border is walled except along the start's and finish's rows and
    /// columns; interior cells become walls with probability 0.3 unless they
    /// lie within two steps (Chebyshev) of the start or finish.
    pub fn generate_maze<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear_walls();
        let (rows, cols) = (self.rows, self.cols);
        let (start, finish) = (self.start, self.finish);

        for row in 0..rows {
            if row != start.0 && row != finish.0 {
                for col in [0, cols - 1] {
                    self.node_mut((row, col)).is_wall = true;
                }
            }
        }
        for col in 0..cols {
            if col != start.1 && col != finish.1 {
                for row in [0, rows - 1] {
                    self.node_mut((row, col)).is_wall = true;
                }
            }
        }

        let near = |cell: Cell, anchor: Cell| {
            cell.0.abs_diff(anchor.0) <= 2 && cell.1.abs_diff(anchor.1) <= 2
        };
        for row in 2..rows.saturating_sub(2) {
            for col in 2..cols.saturating_sub(2) {
                let cell = (row, col);
                if rng.gen_bool(MAZE_WALL_PROBABILITY) && !near(cell, start) && !near(cell, finish) {
                    self.node_mut(cell).is_wall = true;
                }
            }
        }
        self.mark_endpoints();
        tracing::debug!(walls = self.wall_count(), "maze generated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_grid_matches_the_classic_layout() {
        let grid = Grid::default();
        assert_eq!((grid.rows(), grid.cols()), (20, 40));
        assert!(grid.node((10, 5)).is_start);
        assert!(grid.node((10, 35)).is_finish);
        assert_eq!(grid.nodes().iter().filter(|n| n.is_start).count(), 1);
        assert_eq!(grid.nodes().iter().filter(|n| n.is_finish).count(), 1);
    }

    #[test]
    fn construction_is_validated() {
        assert!(matches!(Grid::new(0, 4, (0, 0), (0, 1)), Err(ConfigError::EmptyGrid { .. })));
        assert!(matches!(Grid::new(3, 3, (0, 0), (3, 0)), Err(ConfigError::OutOfBounds { .. })));
        assert!(matches!(
            Grid::new(3, 3, (1, 1), (1, 1)),
            Err(ConfigError::EndpointsCoincide { row: 1, col: 1 })
        ));
    }

    #[test]
    fn walls_never_cover_endpoints() {
        let mut grid = Grid::new(3, 3, (0, 0), (2, 2)).unwrap();
        assert!(!grid.toggle_wall((0, 0)).unwrap());
        assert!(grid.toggle_wall((1, 1)).unwrap());
        assert!(grid.is_wall((1, 1)));
        assert!(grid.toggle_wall((1, 1)).unwrap());
        assert!(!grid.is_wall((1, 1)));
        assert!(grid.toggle_wall((5, 5)).is_err());

        grid.set_wall((0, 1), true).unwrap();
        grid.move_start((0, 1)).unwrap();
        assert!(!grid.is_wall((0, 1)));
        assert!(!grid.node((0, 0)).is_start);
        assert!(grid.move_finish((0, 1)).is_err());
    }

    #[test]
    fn neighbours_are_clipped_and_ordered() {
        let grid = Grid::new(3, 3, (0, 0), (2, 2)).unwrap();
        assert_eq!(grid.neighbors((0, 0)).collect::<Vec<_>>(), vec![(1, 0), (0, 1)]);
        assert_eq!(
            grid.neighbors((1, 1)).collect::<Vec<_>>(),
            vec![(0, 1), (2, 1), (1, 0), (1, 2)]
        );
    }

    #[test]
    fn parse_reads_walls_and_endpoints() {
        let grid = Grid::parse(&["S.#", "..#", "..F"]).unwrap();
        assert_eq!(grid.start(), (0, 0));
        assert_eq!(grid.finish(), (2, 2));
        assert_eq!(grid.wall_count(), 2);
    }

    #[test]
    fn maze_keeps_the_neighbourhood_of_endpoints_open() {
        let mut grid = Grid::default();
        grid.generate_maze(&mut StdRng::seed_from_u64(17));
        assert!(grid.wall_count() > 0);
        for endpoint in [grid.start(), grid.finish()] {
            for node in grid.nodes() {
                let near = node.row.abs_diff(endpoint.0) <= 2 && node.col.abs_diff(endpoint.1) <= 2;
                let border = node.row == 0 || node.col == 0 || node.row == 19 || node.col == 39;
                if near && !border {
                    assert!(!node.is_wall, "({}, {}) walled", node.row, node.col);
                }
            }
        }
        assert!(!grid.is_wall((10, 0)), "start row stays open at the border");
        assert!(grid.is_wall((0, 0)));
    }

    #[test]
    fn clear_path_keeps_walls() {
        let mut grid = Grid::new(2, 3, (0, 0), (0, 2)).unwrap();
        grid.set_wall((1, 1), true).unwrap();
        grid.node_mut((1, 0)).is_visited = true;
        grid.node_mut((1, 0)).distance = Some(1);
        grid.clear_path();
        assert!(grid.is_wall((1, 1)));
        assert!(!grid.node((1, 0)).is_visited);
        assert_eq!(grid.node((1, 0)).distance, None);
    }
}
