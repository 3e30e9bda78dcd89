//! Preset starting patterns and random fills

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::Grid;

/// A named set of live cells, relative to the pattern's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

#[rustfmt::skip]
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 24),
            (1, 22), (1, 24),
            (2, 12), (2, 13), (2, 20), (2, 21), (2, 34), (2, 35),
            (3, 11), (3, 15), (3, 20), (3, 21), (3, 34), (3, 35),
            (4, 0), (4, 1), (4, 10), (4, 16), (4, 20), (4, 21),
            (5, 0), (5, 1), (5, 10), (5, 14), (5, 16), (5, 17), (5, 22), (5, 24),
            (6, 10), (6, 16), (6, 24),
            (7, 11), (7, 15),
            (8, 12), (8, 13),
        ],
    },
];

impl Pattern {
    /// Look a preset up by name, ignoring case
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Bounding box as `(rows, cols)`
    pub fn size(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(rows, cols), &(r, c)| (rows.max(r + 1), cols.max(c + 1)))
    }
}

impl Grid {
    /// Bring `pattern` to life with its top-left corner at `origin`.
    ///
    /// Cells landing outside the grid are dropped. Returns how many were placed.
    pub fn place(&mut self, pattern: &Pattern, origin: (usize, usize)) -> usize {
        let (top, left) = origin;
        pattern
            .cells
            .iter()
            .filter_map(|&(r, c)| Some((top.checked_add(r)?, left.checked_add(c)?)))
            .filter(|&(row, col)| self.set(row, col, true).is_ok())
            .count()
    }

    /// Clear the grid and place `pattern` in its middle
    pub fn place_centered(&mut self, pattern: &Pattern) -> usize {
        let (rows, cols) = pattern.size();
        let origin = (
            self.rows().saturating_sub(rows) / 2,
            self.cols().saturating_sub(cols) / 2,
        );
        self.clear();
        self.place(pattern, origin)
    }

    /// Replace the grid with random soup; each cell lives with probability `density`.
    ///
    /// The same seed always produces the same soup.
    pub fn randomize(&mut self, seed: u64, density: f64) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let mut rng = StdRng::seed_from_u64(seed);
        self.cells_mut().map_inplace(|cell| *cell = rng.gen_bool(density));
        self.reset_generation();
    }
}
