// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The carried pixel buffer
//!
//! Unlike `TwoDimensionalMap`, rows here shrink: every removed seam
//! takes one entry out of each row and closes the gap, in lockstep
//! with the cost graph.

use crate::error::{CarveError, Result};

/// A grid of colors addressed as `(row, col)`, one vector per row.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid<P: Copy> {
    rows: Vec<Vec<P>>,
}

impl<P: Copy> PixelGrid<P> {
    /// Wrap nested rows.  All rows must share one non-zero length.
    pub fn from_rows(rows: Vec<Vec<P>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(CarveError::InvalidInput(
                "pixel grid must have at least one row and one column".to_string(),
            ));
        }
        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            return Err(CarveError::InvalidInput(format!(
                "pixel row {} has {} entries, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }
        Ok(PixelGrid { rows })
    }

    /// Build a grid by calling `f(col, row)` for every position.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> P,
    {
        PixelGrid::from_rows(
            (0..height)
                .map(|y| (0..width).map(|x| f(x, y)).collect())
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&P> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn row(&self, y: usize) -> &[P] {
        &self.rows[y]
    }

    /// Overwrite the color at `(row, col)`.
    pub fn paint(&mut self, row: usize, col: usize, color: P) -> Result<()> {
        let slot = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| {
                CarveError::InvariantViolation(format!("no pixel at ({}, {})", row, col))
            })?;
        *slot = color;
        Ok(())
    }

    /// Delete one pixel per row, shifting the rest of each row left.
    pub fn remove_seam(&mut self, seam: &[(usize, usize)]) -> Result<()> {
        if seam.len() != self.rows.len() {
            return Err(CarveError::InvariantViolation(format!(
                "seam has {} rows, pixel grid has {}",
                seam.len(),
                self.rows.len()
            )));
        }
        if let Some(&(row, col)) = seam
            .iter()
            .find(|&&(row, col)| row >= self.rows.len() || col >= self.rows[row].len())
        {
            return Err(CarveError::InvariantViolation(format!(
                "no pixel at ({}, {}) to remove",
                row, col
            )));
        }
        for &(row, col) in seam {
            self.rows[row].remove(col);
        }
        Ok(())
    }

    pub fn into_rows(self) -> Vec<Vec<P>> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_shifts_rows_left() {
        let mut grid = PixelGrid::from_fn(3, 2, |x, y| (x, y)).unwrap();
        grid.remove_seam(&[(0, 0), (1, 1)]).unwrap();
        assert_eq!(grid.row(0), &[(1, 0), (2, 0)]);
        assert_eq!(grid.row(1), &[(0, 1), (2, 1)]);
        assert_eq!(grid.dimensions(), (2, 2));
    }

    #[test]
    fn bad_seam_leaves_grid_alone() {
        let mut grid = PixelGrid::from_fn(2, 2, |x, _| x).unwrap();
        assert!(grid.remove_seam(&[(0, 0), (1, 5)]).is_err());
        assert_eq!(grid.dimensions(), (2, 2));
    }

    #[test]
    fn ragged_rows_are_invalid_input() {
        match PixelGrid::from_rows(vec![vec![1u8, 2], vec![3]]) {
            Err(CarveError::InvalidInput(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(PixelGrid::<u8>::from_rows(vec![]).is_err());
    }

    #[test]
    fn paint_overwrites_in_place() {
        let mut grid = PixelGrid::from_fn(2, 1, |_, _| 0u8).unwrap();
        grid.paint(0, 1, 9).unwrap();
        assert_eq!(grid.row(0), &[0, 9]);
        assert!(grid.paint(3, 0, 1).is_err());
    }
}
