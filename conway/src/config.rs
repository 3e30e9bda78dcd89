//! Startup configuration: board size and run cadence

use std::time::Duration;

use crate::error::{LifeError, Result};

pub const DEFAULT_ROWS: usize = 25;
pub const DEFAULT_COLS: usize = 25;
/// Pause between automatic steps while running
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,
    pub interval: Duration,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl LifeConfig {
    /// 35x76 board, sized for a widescreen window
    pub fn wide() -> Self {
        Self {
            rows: 35,
            cols: 76,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}
