// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sudoku: fill the first empty cell (row-major) with each digit in turn.
//!
//! Boards are 4x4, 9x9 or 16x16 with boxes of side `sqrt(size)`. No cell
//! ordering heuristic is applied. Also provides a random puzzle generator
//! by difficulty and a JSON board importer.

use super::statistics::Counters;
use super::trace::{Board, BoardState, Recorder, StepState, Trace};
use super::tree::NodeId;
use super::BacktrackingAlgorithm;
use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub const SUPPORTED_SIZES: [usize; 3] = [4, 9, 16];

/// Random placements tried before the generator gives up.
const GENERATOR_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuConfig {
    /// Row-major board, 0 for empty.
    pub board: Vec<Vec<u8>>,
}

impl Default for SudokuConfig {
    fn default() -> Self {
        SudokuConfig {
            board: vec![
                vec![5, 3, 0, 0, 7, 0, 0, 0, 0],
                vec![6, 0, 0, 1, 9, 5, 0, 0, 0],
                vec![0, 9, 8, 0, 0, 0, 0, 6, 0],
                vec![8, 0, 0, 0, 6, 0, 0, 0, 3],
                vec![4, 0, 0, 8, 0, 3, 0, 0, 1],
                vec![7, 0, 0, 0, 2, 0, 0, 0, 6],
                vec![0, 6, 0, 0, 0, 0, 2, 8, 0],
                vec![0, 0, 0, 4, 1, 9, 0, 0, 5],
                vec![0, 0, 0, 0, 8, 0, 0, 7, 9],
            ],
        }
    }
}

impl SudokuConfig {
    pub fn size(&self) -> usize {
        self.board.len()
    }

    pub fn validate(&self) -> Result<()> {
        self.to_board().map(|_| ())
    }

    /// Checked conversion into a [`Board`].
    pub fn to_board(&self) -> Result<Board> {
        let size = self.size();
        if !SUPPORTED_SIZES.contains(&size) {
            return Err(ConfigError::SudokuSize(size));
        }
        let board = Board::from_rows(&self.board)
            .filter(|board| board.cols() == size)
            .ok_or(ConfigError::SudokuShape { size })?;

        for row in 0..size {
            for col in 0..size {
                let value = board.get(row, col);
                if usize::from(value) > size {
                    return Err(ConfigError::SudokuValue {
                        row,
                        col,
                        value,
                        size,
                    });
                }
            }
        }
        let mut scratch = board.clone();
        for (row, col) in board.occupied() {
            let value = board.get(row, col);
            scratch.set(row, col, 0);
            let clashes = !is_safe(&scratch, row, col, value);
            scratch.set(row, col, value);
            if clashes {
                return Err(ConfigError::SudokuConflict { row, col, value });
            }
        }
        Ok(board)
    }
}

/// Share of cells pre-filled by [`generate_puzzle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    pub fn fill_ratio(self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium | Difficulty::Custom => 0.4,
            Difficulty::Hard => 0.3,
        }
    }
}

/// Random puzzle whose givens never conflict.
///
/// Places random digits at random cells, keeping only placements that pass
/// the row, column and box check, until the difficulty's share of cells is
/// filled or the attempt budget runs out. The result is not guaranteed to
/// be solvable.
pub fn generate_puzzle<R: Rng + ?Sized>(
    size: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Vec<Vec<u8>>> {
    if !SUPPORTED_SIZES.contains(&size) {
        return Err(ConfigError::SudokuSize(size));
    }
    let target = ((size * size) as f64 * difficulty.fill_ratio()).floor() as usize;
    let mut board = Board::square(size);
    let mut filled = 0;
    let mut attempts = 0;
    while filled < target && attempts < GENERATOR_ATTEMPTS {
        let row = rng.gen_range(0..size);
        let col = rng.gen_range(0..size);
        if board.get(row, col) == 0 {
            let value = rng.gen_range(1..=size) as u8;
            if is_safe(&board, row, col, value) {
                board.set(row, col, value);
                filled += 1;
            }
        }
        attempts += 1;
    }
    Ok(board.to_rows())
}

/// Parse a board from JSON (an array of rows) and check it is `size`x`size`.
pub fn import_board(json: &str, size: usize) -> Result<Vec<Vec<u8>>> {
    let rows: Vec<Vec<u8>> =
        serde_json::from_str(json).map_err(|err| ConfigError::board_format(err.to_string()))?;
    if rows.len() != size || rows.iter().any(|row| row.len() != size) {
        return Err(ConfigError::SudokuShape { size });
    }
    Ok(rows)
}

fn box_side(size: usize) -> usize {
    match size {
        4 => 2,
        9 => 3,
        16 => 4,
        _ => (size as f64).sqrt() as usize,
    }
}

/// `value` does not already appear in the row, column or box of `(row, col)`.
fn is_safe(board: &Board, row: usize, col: usize, value: u8) -> bool {
    let size = board.rows();
    if (0..size).any(|c| board.get(row, c) == value) {
        return false;
    }
    if (0..size).any(|r| board.get(r, col) == value) {
        return false;
    }
    let side = box_side(size);
    let (top, left) = (row / side * side, col / side * side);
    !(top..top + side).any(|r| (left..left + side).any(|c| board.get(r, c) == value))
}

struct Sudoku {
    board: Board,
    recorder: Recorder,
}

pub(super) fn generate(config: &SudokuConfig) -> Result<Trace> {
    let board = config.to_board()?;
    let mut solver = Sudoku {
        board,
        recorder: Recorder::new("Sudoku"),
    };
    solver.emit(NodeId::ROOT, "Starting Sudoku solver".to_string(), None);

    let solved = solver.solve(NodeId::ROOT);
    if !solved {
        solver.emit(
            NodeId::ROOT,
            "No solution exists for this Sudoku board".to_string(),
            None,
        );
    }
    tracing::debug!(size = config.size(), solved, "sudoku search finished");
    Ok(solver.recorder.finish(BacktrackingAlgorithm::Sudoku))
}

impl Sudoku {
    fn emit(&mut self, node: NodeId, description: String, focus: Option<(usize, usize)>) {
        let state = BoardState::new(&self.board, focus.map(|f| f.0), focus.map(|f| f.1));
        self.recorder.emit(node, description, StepState::Board(state));
    }

    fn first_empty(&self) -> Option<(usize, usize)> {
        let size = self.board.rows();
        (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .find(|&(row, col)| self.board.get(row, col) == 0)
    }

    fn solve(&mut self, parent: NodeId) -> bool {
        let Some((row, col)) = self.first_empty() else {
            self.recorder.count(Counters::Solutions);
            self.emit(parent, "Sudoku solved successfully!".to_string(), None);
            return true;
        };

        let node = self.recorder.enter(parent, format!("Cell ({row},{col})"));
        self.emit(
            node,
            format!("Trying to fill cell at position ({row}, {col})"),
            Some((row, col)),
        );

        let size = self.board.rows() as u8;
        for value in 1..=size {
            let is_valid = is_safe(&self.board, row, col, value);
            self.recorder.count(Counters::CandidateChecks);
            let state = BoardState::new(&self.board, Some(row), Some(col))
                .with_value(u32::from(value))
                .with_validity(is_valid);
            self.recorder.emit(
                node,
                format!("Checking if we can place {value} at position ({row}, {col})"),
                StepState::Board(state),
            );
            if !is_valid {
                continue;
            }

            self.board.set(row, col, value);
            self.recorder.count(Counters::Placements);
            self.emit(
                node,
                format!("Placing {value} at position ({row}, {col})"),
                Some((row, col)),
            );

            if self.solve(node) {
                return true;
            }

            self.board.set(row, col, 0);
            self.recorder.count(Counters::Backtracks);
            self.emit(
                node,
                format!("Backtracking: Removing {value} from position ({row}, {col})"),
                Some((row, col)),
            );
        }
        false
    }
}
