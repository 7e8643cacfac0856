use crate::error::{CarveError, Result};
use std::ops::{Index, IndexMut};

/// Defines the basic two-dimensional field: an addressable,
/// fixed-size, row-major grid.  The luminance grid handed to the
/// engine and the energy field computed from it are both this shape;
/// the cost graph and the pixel grid are not, because their rows
/// shrink.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: usize,
    pub height: usize,
    values: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with the content type's default.
    pub fn new(width: usize, height: usize) -> Self {
        TwoDimensionalMap {
            width,
            height,
            values: vec![P::default(); width * height],
        }
    }

    /// Wrap an existing row-major buffer.  The buffer must hold exactly
    /// `width * height` values and neither dimension may be zero.
    pub fn from_vec(width: usize, height: usize, values: Vec<P>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidInput(format!(
                "grid dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if values.len() != width * height {
            return Err(CarveError::InvalidInput(format!(
                "{}x{} grid needs {} values, got {}",
                width,
                height,
                width * height,
                values.len()
            )));
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            values,
        })
    }

    /// Build a map from nested rows, all of which must be the same
    /// non-zero length.
    pub fn from_rows(rows: &[Vec<P>]) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            return Err(CarveError::InvalidInput(format!(
                "row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }
        TwoDimensionalMap::from_vec(width, rows.len(), rows.concat())
    }

    /// The `(width, height)` pair, in the same order `image` reports it.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// One row as a slice.
    pub fn row(&self, y: usize) -> &[P] {
        let start = self.get_index(0, y);
        &self.values[start..start + self.width]
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

impl<P: Default + Copy> Index<(usize, usize)> for TwoDimensionalMap<P> {
    type Output = P;

    /// Addressed as `(x, y)`, like `image`.
    fn index(&self, (x, y): (usize, usize)) -> &P {
        let index = self.get_index(x, y);
        &self.values[index]
    }
}

impl<P: Default + Copy> IndexMut<(usize, usize)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_x_then_y() {
        let map = TwoDimensionalMap::from_vec(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(map[(2, 0)], 2);
        assert_eq!(map[(0, 1)], 3);
        assert_eq!(map.row(1), &[3, 4, 5]);
    }

    #[test]
    fn rejects_empty_and_mismatched_buffers() {
        assert!(TwoDimensionalMap::<u8>::from_vec(0, 4, vec![]).is_err());
        assert!(TwoDimensionalMap::from_vec(2, 2, vec![1u8, 2, 3]).is_err());
        assert!(TwoDimensionalMap::from_rows(&[vec![1u8, 2], vec![3]]).is_err());
        assert!(TwoDimensionalMap::<u8>::from_rows(&[]).is_err());
    }
}
