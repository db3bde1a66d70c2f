// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Grid pathfinding engine.
//!
//! A run has two halves. [`visualize`] searches the grid eagerly and returns
//! the cells in visitation order together with the reconstructed path;
//! [`animate`] then paints those two lists onto the grid at a fixed cadence.
//! [`run_pathfinding`] does both.
//!
//! # Example
//!
//! ```
//! use algo_stepper::pathfinding::{visualize, Grid, PathAlgorithm};
//!
//! let mut grid = Grid::parse(&["S..", ".#.", "..F"]).unwrap();
//! let result = visualize(&mut grid, PathAlgorithm::Bfs);
//! assert_eq!(result.path.len(), 5);
//! ```

pub mod grid;
pub mod replay;
pub mod search;

pub use grid::{Cell, Grid, GridNode};
pub use replay::{animate, run_pathfinding, NullPathObserver, PathObserver, PathReport};
pub use search::{shortest_path, visualize, SearchResult};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    AsRefStr,
    EnumCount,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PathAlgorithm {
    Bfs,
    Dfs,
    #[default]
    Dijkstra,
    AStar,
}

impl PathAlgorithm {
    pub fn display_name(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "Breadth-First Search",
            PathAlgorithm::Dfs => "Depth-First Search",
            PathAlgorithm::Dijkstra => "Dijkstra's Algorithm",
            PathAlgorithm::AStar => "A* Algorithm",
        }
    }

    /// Whether the returned path is always a shortest one.
    pub fn is_optimal(self) -> bool {
        !matches!(self, PathAlgorithm::Dfs)
    }

    fn running_message(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "Running Breadth-First Search...",
            PathAlgorithm::Dfs => "Running Depth-First Search...",
            PathAlgorithm::Dijkstra => "Running Dijkstra's Algorithm...",
            PathAlgorithm::AStar => "Running A* Algorithm...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathfindingSettings {
    pub rows: usize,
    pub cols: usize,
    pub start: Cell,
    pub finish: Cell,
    pub speed_ms: u64,
    pub algorithm: PathAlgorithm,
}

impl Default for PathfindingSettings {
    fn default() -> Self {
        PathfindingSettings {
            rows: grid::DEFAULT_ROWS,
            cols: grid::DEFAULT_COLS,
            start: grid::DEFAULT_START,
            finish: grid::DEFAULT_FINISH,
            speed_ms: 50,
            algorithm: PathAlgorithm::default(),
        }
    }
}

impl PathfindingSettings {
    pub fn validate(&self) -> Result<()> {
        self.grid().map(|_| ())
    }

    /// A wall-free grid with these dimensions and endpoints.
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.rows, self.cols, self.start, self.finish)
    }
}
