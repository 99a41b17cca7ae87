//! Error types for maze-core

use crate::Cell;
use thiserror::Error;

/// Errors raised before a search starts.
///
/// A search that runs out of frontier is not an error; it ends with an empty
/// path. Broken parent chains are bugs and panic instead.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Could not find {0} algorithm")]
    UnknownStrategy(String),

    #[error("Algorithm {0} has no step() implementation")]
    StrategyNotImplemented(String),

    #[error("Start position is not set")]
    MissingStart,

    #[error("End position is not set")]
    MissingGoal,

    #[error("More than one start position: {0} and {1}")]
    DuplicateStart(Cell, Cell),

    #[error("More than one end position: {0} and {1}")]
    DuplicateGoal(Cell, Cell),

    #[error("Maze id {id} is outside the allowed range 1..={max}")]
    MazeIdOutOfRange { id: usize, max: usize },

    #[error("Grid has no rows")]
    EmptyGrid,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: cannot read {token:?} as a cell value")]
    BadToken { line: usize, token: String },

    #[error("Line {line}: unknown cell code {code}")]
    UnknownCellCode { line: usize, code: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Errors in what was asked for, as opposed to malformed input data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SearchError::UnknownStrategy(_)
                | SearchError::StrategyNotImplemented(_)
                | SearchError::MissingStart
                | SearchError::MissingGoal
                | SearchError::DuplicateStart(..)
                | SearchError::DuplicateGoal(..)
                | SearchError::MazeIdOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
