//! Conway's Game of Life on a bounded board, with a cancellable background runner.

pub mod config;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod runner;

pub use config::LifeConfig;
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use patterns::{PATTERNS, Pattern};
pub use runner::{RunState, Runner, SharedGrid, lock_grid, shared};
