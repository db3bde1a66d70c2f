// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! N-Queens: one queen per row, no two sharing a column or diagonal.
//!
//! An optional fixed queen is placed before the search starts and its row
//! is skipped. Every other queen is checked against it, including when the
//! fixed queen sits in a row below the one being filled.

use super::statistics::Counters;
use super::trace::{Board, BoardState, Cell, Recorder, StepState, Trace};
use super::tree::NodeId;
use super::BacktrackingAlgorithm;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_SIZE: usize = 4;
pub const MAX_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NQueensConfig {
    pub size: usize,
    pub starting_position: Option<Cell>,
    pub find_all_solutions: bool,
}

impl Default for NQueensConfig {
    fn default() -> Self {
        NQueensConfig {
            size: 4,
            starting_position: None,
            find_all_solutions: false,
        }
    }
}

impl NQueensConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::board_size("N-Queens", self.size, MIN_SIZE, MAX_SIZE));
        }
        if let Some((row, col)) = self.starting_position {
            if row >= self.size || col >= self.size {
                return Err(ConfigError::out_of_bounds(row, col, self.size, self.size));
            }
        }
        Ok(())
    }
}

struct NQueens {
    size: usize,
    fixed: Option<Cell>,
    find_all: bool,
    board: Board,
    solutions: Vec<Board>,
    recorder: Recorder,
}

pub(super) fn generate(config: &NQueensConfig) -> Result<Trace> {
    config.validate()?;
    let size = config.size;
    let mut board = Board::square(size);
    if let Some((row, col)) = config.starting_position {
        board.set(row, col, 1);
    }
    let mut solver = NQueens {
        size,
        fixed: config.starting_position,
        find_all: config.find_all_solutions,
        board,
        solutions: Vec::new(),
        recorder: Recorder::new("N-Queens"),
    };
    solver.emit(
        NodeId::ROOT,
        format!("Starting N-Queens problem with board size {size}x{size}"),
        BoardState::new(&solver.board, None, None),
    );

    solver.solve(0, NodeId::ROOT);

    let count = solver.solutions.len();
    if let Some(last) = solver.solutions.last().cloned() {
        if solver.find_all {
            let plural = if count != 1 { "s" } else { "" };
            solver.emit(
                NodeId::ROOT,
                format!("Found {count} solution{plural} for the {size}-Queens problem"),
                BoardState::new(&last, None, None),
            );
        }
    } else {
        solver.emit(
            NodeId::ROOT,
            format!("No solutions found for the {size}-Queens problem"),
            BoardState::new(&solver.board, None, None),
        );
    }
    tracing::debug!(size, solutions = count, "n-queens search finished");
    Ok(solver.recorder.finish(BacktrackingAlgorithm::NQueens))
}

impl NQueens {
    fn emit(&mut self, node: NodeId, description: String, state: BoardState) {
        self.recorder.emit(node, description, StepState::Board(state));
    }

    /// Returns true when the search should stop.
    fn solve(&mut self, row: usize, parent: NodeId) -> bool {
        if row == self.size {
            self.solutions.push(self.board.clone());
            self.recorder.count(Counters::Solutions);
            let description = if self.find_all {
                format!("Found solution #{}!", self.solutions.len())
            } else {
                "Found a solution!".to_string()
            };
            self.emit(parent, description, BoardState::new(&self.board, None, None));
            return !self.find_all;
        }

        if matches!(self.fixed, Some((fixed_row, _)) if fixed_row == row) {
            return self.solve(row + 1, parent);
        }

        let node = self.recorder.enter(parent, format!("Row {row}"));
        self.emit(
            node,
            format!("Trying to place a queen in row {row}"),
            BoardState::new(&self.board, Some(row), None),
        );

        for col in 0..self.size {
            let is_valid = self.is_safe(row, col);
            self.recorder.count(Counters::CandidateChecks);
            self.emit(
                node,
                format!("Checking if we can place a queen at position ({row}, {col})"),
                BoardState::new(&self.board, Some(row), Some(col)).with_validity(is_valid),
            );
            if !is_valid {
                continue;
            }

            self.board.set(row, col, 1);
            self.recorder.count(Counters::Placements);
            self.emit(
                node,
                format!("Placing a queen at position ({row}, {col})"),
                BoardState::new(&self.board, Some(row), Some(col)),
            );

            if self.solve(row + 1, node) {
                return true;
            }

            self.board.set(row, col, 0);
            self.recorder.count(Counters::Backtracks);
            self.emit(
                node,
                format!("Backtracking: Removing queen from position ({row}, {col})"),
                BoardState::new(&self.board, Some(row), Some(col)),
            );
        }
        false
    }

    /// No queen anywhere on the board shares a column or diagonal.
    fn is_safe(&self, row: usize, col: usize) -> bool {
        self.board
            .occupied()
            .all(|(r, c)| c != col && r.abs_diff(row) != c.abs_diff(col))
    }
}
