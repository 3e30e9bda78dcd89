//! Fixed-size, bounded Game of Life board
//!
//! The board is a pair of `rows x cols` matrices: the live generation and a
//! scratch buffer the next generation is written into. Every neighbour count
//! for a step reads the live matrix only, then the buffers are swapped, so no
//! cell ever observes a partially advanced generation.

use std::fmt::{self, Write};
use std::str::FromStr;

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::error::{LifeError, Result};

/// Moore neighbourhood, row-major, centre excluded
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Character used for a live cell by `Display` and `FromStr`
pub const ALIVE_CHAR: char = 'o';
/// Character used for a dead cell by `Display` and `FromStr`
pub const DEAD_CHAR: char = '.';

/// A `rows x cols` board of alive/dead cells with no wraparound
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<bool>,
    next: Array2<bool>,
    generation: u64,
}

impl Grid {
    /// Create an all-dead grid. Both dimensions must be positive.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            cells: Array2::from_elem((rows, cols), false),
            next: Array2::from_elem((rows, cols), false),
            generation: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Number of steps taken since construction or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only view of the current generation, for rendering
    pub fn cells(&self) -> ArrayView2<'_, bool> {
        self.cells.view()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        self.cells
            .get((row, col))
            .copied()
            .ok_or_else(|| self.out_of_range(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let err = self.out_of_range(row, col);
        let cell = self.cells.get_mut((row, col)).ok_or(err)?;
        *cell = alive;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool> {
        let err = self.out_of_range(row, col);
        let cell = self.cells.get_mut((row, col)).ok_or(err)?;
        *cell = !*cell;
        Ok(*cell)
    }

    /// Live cells among the in-bounds Moore neighbours of `(row, col)`.
    ///
    /// Positions past an edge are skipped, so a corner cell has at most
    /// three neighbours and an edge cell at most five.
    pub fn neighbor_count(&self, row: usize, col: usize) -> Result<u8> {
        self.get(row, col)?;
        Ok(live_neighbors(&self.cells, row, col))
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        for ((row, col), slot) in self.next.indexed_iter_mut() {
            let count = live_neighbors(&self.cells, row, col);
            *slot = match (self.cells[[row, col]], count) {
                (true, 2) | (true, 3) => true, // Survival
                (false, 3) => true,            // Birth
                _ => false,                    // Death or stays dead
            };
        }
        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
    }

    /// Kill every cell and reset the generation counter.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    pub(crate) fn cells_mut(&mut self) -> ArrayViewMut2<'_, bool> {
        self.cells.view_mut()
    }

    pub(crate) fn reset_generation(&mut self) {
        self.generation = 0;
    }

    fn out_of_range(&self, row: usize, col: usize) -> LifeError {
        let (rows, cols) = self.dimensions();
        LifeError::OutOfRange {
            row,
            col,
            rows,
            cols,
        }
    }
}

fn live_neighbors(cells: &Array2<bool>, row: usize, col: usize) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?)))
        .filter(|&pos| cells.get(pos).copied().unwrap_or(false))
        .count() as u8
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.rows().into_iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for &alive in row {
                f.write_char(if alive { ALIVE_CHAR } else { DEAD_CHAR })?;
            }
        }
        Ok(())
    }
}

/// Parses `o`/`.` text, one row per line. A space inside a row is also a dead
/// cell. Surrounding whitespace and blank lines are ignored; short rows are
/// padded with dead cells.
impl FromStr for Grid {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();
        let cols = lines.iter().map(|(_, line)| line.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(lines.len(), cols)?;
        for (row, &(line_no, line)) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                match c {
                    ALIVE_CHAR => grid.cells[[row, col]] = true,
                    DEAD_CHAR | ' ' => (),
                    _ => {
                        return Err(LifeError::Parse {
                            line: line_no,
                            reason: format!("unexpected character {c:?}"),
                        });
                    }
                }
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(row, col) in alive {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        grid.cells()
            .indexed_iter()
            .filter(|&(_, &alive)| alive)
            .map(|(pos, _)| pos)
            .collect()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimension { rows: 0, cols: 5 })
        ));
        assert!(matches!(Grid::new(5, 0), Err(LifeError::InvalidDimension { .. })));
        assert_eq!(Grid::new(1, 1).unwrap().dimensions(), (1, 1));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(3, 4).unwrap();
        assert!(matches!(grid.get(3, 0), Err(LifeError::OutOfRange { row: 3, col: 0, .. })));
        assert!(grid.get(0, 4).is_err());
        assert!(grid.set(5, 5, true).is_err());
        assert!(grid.toggle(0, 9).is_err());
        assert!(grid.neighbor_count(3, 3).is_err());
        assert!(grid.get(2, 3).is_ok());
    }

    #[test]
    fn test_set_and_toggle() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, true).unwrap();
        grid.set(1, 1, true).unwrap();
        assert!(grid.get(1, 1).unwrap());
        assert!(!grid.toggle(1, 1).unwrap());
        assert!(grid.toggle(0, 2).unwrap());
        assert_eq!(alive_cells(&grid), vec![(0, 2)]);
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let mut grid = Grid::new(6, 9).unwrap();
        grid.step();
        assert!(grid.is_empty());
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let mut grid = grid_with(5, 5, &[(2, 2)]);
        grid.step();
        assert!(!grid.get(2, 2).unwrap());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_block_is_stable() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let mut grid = grid_with(4, 4, &block);
        for &(row, col) in &block {
            assert_eq!(grid.neighbor_count(row, col).unwrap(), 3);
        }
        grid.step();
        assert_eq!(alive_cells(&grid), block.to_vec());
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = [(1, 0), (1, 1), (1, 2)];
        let vertical = [(0, 1), (1, 1), (2, 1)];
        let mut grid = grid_with(5, 5, &horizontal);

        grid.step();
        assert_eq!(alive_cells(&grid), vertical.to_vec());

        grid.step();
        assert_eq!(alive_cells(&grid), horizontal.to_vec());
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn test_corner_counts_only_in_bounds_neighbors() {
        let mut grid = Grid::new(4, 4).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                grid.set(row, col, true).unwrap();
            }
        }
        assert_eq!(grid.neighbor_count(0, 0).unwrap(), 3);
        assert_eq!(grid.neighbor_count(3, 3).unwrap(), 3);
        assert_eq!(grid.neighbor_count(0, 2).unwrap(), 5);
        assert_eq!(grid.neighbor_count(2, 2).unwrap(), 8);
    }

    #[test]
    fn test_no_wraparound() {
        // A blinker lying along the left edge would be fed by the right edge on a torus.
        let mut grid = grid_with(5, 5, &[(1, 0), (2, 0), (3, 0)]);
        grid.step();
        assert_eq!(alive_cells(&grid), vec![(2, 0), (2, 1)]);
    }

    #[test]
    fn test_step_reads_snapshot() {
        // With in-place updates (0,1) would die before (1,1) is evaluated and
        // the birth at (1,1) would be missed.
        let mut grid = grid_with(3, 3, &[(0, 0), (0, 1), (0, 2)]);
        grid.step();
        assert_eq!(alive_cells(&grid), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn test_clear_kills_everything() {
        let mut grid = grid_with(3, 3, &[(0, 0), (1, 1), (2, 2)]);
        grid.step();
        grid.clear();
        for row in 0..3 {
            for col in 0..3 {
                assert!(!grid.get(row, col).unwrap());
            }
        }
        assert_eq!(grid.generation(), 0);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_text_round_trip() {
        let grid: Grid = "
            .o.
            ..o
            ooo
        "
        .parse()
        .unwrap();
        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.live_count(), 5);
        assert_eq!(grid.to_string(), ".o.\n..o\nooo");
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let grid: Grid = "o\n...o".parse().unwrap();
        assert_eq!(grid.dimensions(), (2, 4));
        assert_eq!(grid.to_string(), "o...\n...o");
    }

    #[test]
    fn test_parse_inner_spaces_are_dead() {
        let grid: Grid = "o o\n.o.".parse().unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.to_string(), "o.o\n.o.");
    }

    #[test]
    fn test_parse_rejects_unknown_characters() {
        let err = "..\n.x".parse::<Grid>().unwrap_err();
        assert!(matches!(err, LifeError::Parse { line: 2, .. }));
        assert!(matches!("".parse::<Grid>(), Err(LifeError::InvalidDimension { .. })));
    }
}
