// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for engine configuration.
//!
//! Malformed input is the one case that is rejected outright. Everything
//! else an engine can run into (no path, no solution, a cycle, a stop
//! request) is a normal outcome and is reported through the trace.

/// Convenience result type used across the engines.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration rejected at the boundary, before any run starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Sort input has no elements.
    #[error("cannot sort an empty array")]
    EmptyArray,

    /// The same algorithm was entered twice in a race.
    #[error("algorithm {0} appears more than once in the race")]
    DuplicateRaceEntry(String),

    /// A race needs at least one entrant.
    #[error("a race needs at least one algorithm")]
    EmptyRace,

    /// Grid dimensions are zero.
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    /// A grid coordinate falls outside the grid.
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Start and finish were placed on the same cell.
    #[error("start and finish must be different cells, both are ({row}, {col})")]
    EndpointsCoincide { row: usize, col: usize },

    /// The graph has no nodes to start from.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// A node id is not present in the graph.
    #[error("unknown node id {0}")]
    UnknownNode(String),

    /// An edge references a node that is not in the graph.
    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: String, node: String },

    /// Board size outside the supported range for an algorithm.
    #[error("{algorithm} board size {size} is outside {min}..={max}")]
    BoardSize {
        algorithm: &'static str,
        size: usize,
        min: usize,
        max: usize,
    },

    /// Sudoku boards must be 4x4, 9x9 or 16x16.
    #[error("unsupported sudoku size {0}, expected 4, 9 or 16")]
    SudokuSize(usize),

    /// Sudoku rows do not match the declared size.
    #[error("sudoku board is not {size}x{size}")]
    SudokuShape { size: usize },

    /// A sudoku cell holds a value larger than the board size.
    #[error("sudoku cell ({row}, {col}) holds {value}, larger than {size}")]
    SudokuValue {
        row: usize,
        col: usize,
        value: u8,
        size: usize,
    },

    /// Two givens already conflict on a row, column or box.
    #[error("sudoku given {value} at ({row}, {col}) conflicts with another given")]
    SudokuConflict { row: usize, col: usize, value: u8 },

    /// Imported board could not be parsed.
    #[error("invalid board format: {0}")]
    BoardFormat(String),

    /// Maze grid is empty or ragged.
    #[error("maze must be a non-empty rectangular grid")]
    MazeShape,

    /// Maze start or end sits on a wall.
    #[error("maze {which} ({row}, {col}) is a wall")]
    MazeBlocked {
        which: &'static str,
        row: usize,
        col: usize,
    },

    /// A subset size cap of zero admits nothing.
    #[error("max subset size must be at least 1")]
    ZeroSubsetCap,

    /// Generator parameter outside its range.
    #[error("{what} {value} is outside {min}..={max}")]
    OutOfRange {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

impl ConfigError {
    pub fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self::OutOfBounds {
            row,
            col,
            rows,
            cols,
        }
    }

    pub fn board_size(algorithm: &'static str, size: usize, min: usize, max: usize) -> Self {
        Self::BoardSize {
            algorithm,
            size,
            min,
            max,
        }
    }

    pub fn board_format(msg: impl Into<String>) -> Self {
        Self::BoardFormat(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ConfigError::board_size("N-Queens", 20, 4, 12);
        assert_eq!(err.to_string(), "N-Queens board size 20 is outside 4..=12");

        let err = ConfigError::out_of_bounds(3, 9, 2, 2);
        assert!(err.to_string().contains("(3, 9)"));
    }

    #[test]
    fn format_errors_keep_their_detail() {
        let err = ConfigError::board_format("expected value at line 1");
        assert!(err.to_string().starts_with("invalid board format:"));
        assert!(err.to_string().contains("line 1"));
    }
}
