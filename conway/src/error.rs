//! Error type shared by the grid, the runner and the text parsers

use std::fmt;

/// Everything the core can report back to a caller
#[derive(Debug)]
pub enum LifeError {
    /// A grid was requested with a zero row or column count
    InvalidDimension {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// A cell coordinate lies outside `[0, rows) x [0, cols)`
    OutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid row count
        rows: usize,
        /// Grid column count
        cols: usize,
    },

    /// A text grid could not be parsed
    Parse {
        /// 1-based line of the offending input
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The background runtime for the runner could not be created
    Runtime(std::io::Error),
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { rows, cols } => {
                write!(f, "Invalid grid dimensions {rows}x{cols}: both must be positive")
            }
            Self::OutOfRange {
                row,
                col,
                rows,
                cols,
            } => {
                write!(f, "Cell ({row}, {col}) is outside the {rows}x{cols} grid")
            }
            Self::Parse { line, reason } => {
                write!(f, "Parse error on line {line}: {reason}")
            }
            Self::Runtime(source) => {
                write!(f, "Failed to start runner runtime: {source}")
            }
        }
    }
}

impl std::error::Error for LifeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Runtime(source) => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LifeError {
    fn from(source: std::io::Error) -> Self {
        Self::Runtime(source)
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LifeError>;
