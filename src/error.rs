//! Errors raised while building grids and searching them.

use crate::position::Position;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// Empty input, jagged rows or an unreadable cell value.
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    /// The goal cannot be reached from the start. This is an ordinary search outcome rather than
    /// a failure of the input.
    #[error("no path exists from {start} to {goal}")]
    NoPathExists { start: Position, goal: Position },

    #[error("grid file access failed: {0}")]
    Io(#[from] std::io::Error),
}

impl PathError {
    pub(crate) fn invalid_grid(reason: impl Into<String>) -> PathError {
        PathError::InvalidGrid {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PathError>;
