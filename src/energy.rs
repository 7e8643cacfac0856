// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given the luminance of an image, calculate how "important" each
//! pixel is: the magnitude of the Sobel gradient, taken along both
//! axes independently and combined as a Euclidean norm.
//!
//! Edges are handled by clamping: a neighbor that would fall outside
//! the image is replaced by the nearest pixel inside it.  For a 3x3
//! kernel this is the same as mirroring the border.

use crate::cq;
use crate::error::Result;
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;

/// The luminance of the 3x3 neighborhood around `(x, y)`, clamped at
/// the borders, as `k[row][col]`.
fn neighborhood(luma: &TwoDimensionalMap<f64>, x: usize, y: usize) -> [[f64; 3]; 3] {
    let (mw, mh) = (luma.width - 1, luma.height - 1);
    let xs = [cq!(x == 0, 0, x - 1), x, cq!(x >= mw, mw, x + 1)];
    let ys = [cq!(y == 0, 0, y - 1), y, cq!(y >= mh, mh, y + 1)];
    let mut k = [[0.0; 3]; 3];
    for (r, &yy) in ys.iter().enumerate() {
        for (c, &xx) in xs.iter().enumerate() {
            k[r][c] = luma[(xx, yy)];
        }
    }
    k
}

// Standard Sobel:
//
//        | -1  0  1 |          | -1 -2 -1 |
//   Gx = | -2  0  2 |     Gy = |  0  0  0 |
//        | -1  0  1 |          |  1  2  1 |
//
//   e(x,y) = sqrt(Gx² + Gy²)
#[inline]
fn sobel_magnitude(k: &[[f64; 3]; 3]) -> f64 {
    let gx = (k[0][2] + 2.0 * k[1][2] + k[2][2]) - (k[0][0] + 2.0 * k[1][0] + k[2][0]);
    let gy = (k[2][0] + 2.0 * k[2][1] + k[2][2]) - (k[0][0] + 2.0 * k[0][1] + k[0][2]);
    (gx * gx + gy * gy).sqrt()
}

/// Compute the energy of every pixel from its luminance.  The result
/// has the same dimensions as the input.  Fails only if the grid is
/// empty, which `TwoDimensionalMap::from_vec` already refuses to
/// build, so this is a belt for maps built with `new(0, _)`.
pub fn compute_energy(luma: &TwoDimensionalMap<f64>) -> Result<TwoDimensionalMap<f64>> {
    let (width, height) = luma.dimensions();
    let values = iproduct!(0..height, 0..width)
        .map(|(y, x)| sobel_magnitude(&neighborhood(luma, x, y)))
        .collect();
    TwoDimensionalMap::from_vec(width, height, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(width: usize, height: usize, data: &[f64]) -> TwoDimensionalMap<f64> {
        TwoDimensionalMap::from_vec(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn flat_field_has_no_energy() {
        let energy = compute_energy(&luma(3, 3, &[7.0; 9])).unwrap();
        assert!(iproduct!(0..3, 0..3).all(|(y, x)| energy[(x, y)] == 0.0));
    }

    #[test]
    fn vertical_stripe_lights_up_its_flanks() {
        #[rustfmt::skip]
        let data = [
            0.0, 0.0, 255.0, 0.0, 0.0,
            0.0, 0.0, 255.0, 0.0, 0.0,
            0.0, 0.0, 255.0, 0.0, 0.0,
        ];
        let energy = compute_energy(&luma(5, 3, &data)).unwrap();
        // Gx across the stripe is 4 * 255, Gy is zero everywhere.
        for y in 0..3 {
            assert_eq!(energy[(0, y)], 0.0);
            assert_eq!(energy[(1, y)], 1020.0);
            assert_eq!(energy[(2, y)], 0.0);
            assert_eq!(energy[(3, y)], 1020.0);
            assert_eq!(energy[(4, y)], 0.0);
        }
    }

    #[test]
    fn combines_both_axes() {
        // A single bright corner: both gradients are non-zero at (1, 1).
        #[rustfmt::skip]
        let data = [
            0.0, 0.0, 0.0,
            0.0, 0.0, 0.0,
            0.0, 0.0, 9.0,
        ];
        let energy = compute_energy(&luma(3, 3, &data)).unwrap();
        let expected = (9.0f64 * 9.0 + 9.0 * 9.0).sqrt();
        assert!((energy[(1, 1)] - expected).abs() < 1e-9);
    }

    #[test]
    fn single_pixel_image() {
        let energy = compute_energy(&luma(1, 1, &[42.0])).unwrap();
        assert_eq!(energy.dimensions(), (1, 1));
        assert_eq!(energy[(0, 0)], 0.0);
    }

    #[test]
    fn empty_map_is_invalid_input() {
        assert!(compute_energy(&TwoDimensionalMap::new(0, 0)).is_err());
    }
}
