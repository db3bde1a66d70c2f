// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking engine.
//!
//! Each solver runs to completion eagerly and returns a [`Trace`]: the
//! ordered narrated steps, the recursion tree they belong to, and the run
//! statistics. A [`Playback`] then advances a cursor through the steps on a
//! fixed interval.
//!
//! # Organization
//!
//! - `tree`: arena recursion tree and [`NodeId`] handles
//! - `trace`: step snapshots and the [`Recorder`] shared by the solvers
//! - `statistics`: per-run counters
//! - `nqueens`, `sudoku`, `maze`, `knights`, `subset`: one solver each
//! - `playback`: interval-driven replay of a finished trace
//!
//! Every solver follows the same beat: narrate the candidate, check it,
//! commit and recurse, and on failure undo with a "Backtracking" step.
//! A recursive call opens its tree node before emitting any of its own
//! steps.
//!
//! # Example
//!
//! ```
//! use algo_stepper::backtracking::{generate_steps, BacktrackingConfig, NQueensConfig};
//!
//! let config = BacktrackingConfig::NQueens(NQueensConfig {
//!     size: 4,
//!     starting_position: None,
//!     find_all_solutions: true,
//! });
//! let trace = generate_steps(&config).unwrap();
//! assert_eq!(trace.solution_count(), 2);
//! assert!(trace.steps.iter().all(|step| trace.tree.contains(step.node_id)));
//! ```

pub mod knights;
pub mod maze;
pub mod nqueens;
pub mod playback;
pub mod statistics;
pub mod subset;
pub mod sudoku;
pub mod trace;
pub mod tree;

pub use knights::{KnightsTourConfig, TourType};
pub use maze::MazeConfig;
pub use nqueens::NQueensConfig;
pub use playback::Playback;
pub use statistics::{Counters, Statistics};
pub use subset::SubsetSumConfig;
pub use sudoku::{Difficulty, SudokuConfig};
pub use trace::{BacktrackingStep, Board, BoardState, Cell, MazeState, StepState, SubsetState, Trace};
pub use tree::{NodeId, RecursionTree, RecursionTreeNode};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

/// Default replay interval between steps.
pub const DEFAULT_REPLAY_INTERVAL: Duration = Duration::from_millis(300);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumCount,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BacktrackingAlgorithm {
    #[strum(serialize = "nqueens")]
    #[serde(rename = "nqueens")]
    NQueens,
    Sudoku,
    Maze,
    #[strum(serialize = "knights")]
    #[serde(rename = "knights")]
    KnightsTour,
    #[strum(serialize = "subset")]
    #[serde(rename = "subset")]
    SubsetSum,
}

impl BacktrackingAlgorithm {
    pub fn display_name(self) -> &'static str {
        match self {
            BacktrackingAlgorithm::NQueens => "N-Queens",
            BacktrackingAlgorithm::Sudoku => "Sudoku Solver",
            BacktrackingAlgorithm::Maze => "Maze Solver",
            BacktrackingAlgorithm::KnightsTour => "Knight's Tour",
            BacktrackingAlgorithm::SubsetSum => "Subset Sum",
        }
    }
}

/// Input for one backtracking generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "kebab-case")]
pub enum BacktrackingConfig {
    #[serde(rename = "nqueens")]
    NQueens(NQueensConfig),
    Sudoku(SudokuConfig),
    Maze(MazeConfig),
    #[serde(rename = "knights")]
    KnightsTour(KnightsTourConfig),
    #[serde(rename = "subset")]
    SubsetSum(SubsetSumConfig),
}

impl BacktrackingConfig {
    /// The default settings for `algorithm`.
    pub fn default_for(algorithm: BacktrackingAlgorithm) -> Self {
        match algorithm {
            BacktrackingAlgorithm::NQueens => BacktrackingConfig::NQueens(NQueensConfig::default()),
            BacktrackingAlgorithm::Sudoku => BacktrackingConfig::Sudoku(SudokuConfig::default()),
            BacktrackingAlgorithm::Maze => BacktrackingConfig::Maze(MazeConfig::default()),
            BacktrackingAlgorithm::KnightsTour => {
                BacktrackingConfig::KnightsTour(KnightsTourConfig::default())
            }
            BacktrackingAlgorithm::SubsetSum => {
                BacktrackingConfig::SubsetSum(SubsetSumConfig::default())
            }
        }
    }

    pub fn algorithm(&self) -> BacktrackingAlgorithm {
        match self {
            BacktrackingConfig::NQueens(_) => BacktrackingAlgorithm::NQueens,
            BacktrackingConfig::Sudoku(_) => BacktrackingAlgorithm::Sudoku,
            BacktrackingConfig::Maze(_) => BacktrackingAlgorithm::Maze,
            BacktrackingConfig::KnightsTour(_) => BacktrackingAlgorithm::KnightsTour,
            BacktrackingConfig::SubsetSum(_) => BacktrackingAlgorithm::SubsetSum,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            BacktrackingConfig::NQueens(config) => config.validate(),
            BacktrackingConfig::Sudoku(config) => config.validate(),
            BacktrackingConfig::Maze(config) => config.validate(),
            BacktrackingConfig::KnightsTour(config) => config.validate(),
            BacktrackingConfig::SubsetSum(config) => config.validate(),
        }
    }
}

/// Run the configured solver to completion and return its trace.
///
/// Invalid configuration is rejected before any step is generated. An
/// unsatisfiable instance is not an error: the trace ends with a step
/// narrating that no solution exists.
#[tracing::instrument(skip_all, fields(algorithm = %config.algorithm()))]
pub fn generate_steps(config: &BacktrackingConfig) -> Result<Trace> {
    config.validate()?;
    let trace = match config {
        BacktrackingConfig::NQueens(config) => nqueens::generate(config)?,
        BacktrackingConfig::Sudoku(config) => sudoku::generate(config)?,
        BacktrackingConfig::Maze(config) => maze::generate(config)?,
        BacktrackingConfig::KnightsTour(config) => knights::generate(config)?,
        BacktrackingConfig::SubsetSum(config) => subset::generate(config)?,
    };
    tracing::debug!(
        steps = trace.len(),
        nodes = trace.tree.len(),
        solutions = trace.solution_count(),
        "trace generated"
    );
    Ok(trace)
}
