// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Moving between `image` buffers and the engine's grids
//!
//! The engine itself never decodes or encodes anything.  These
//! adapters take whatever `image` decoded, split it into the two grids
//! the carver wants (luminance for energy, RGBA for the pixels that
//! survive), and put the carved pixels back into an `RgbaImage`.

use crate::error::Result;
use crate::pixelgrid::PixelGrid;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgba, RgbaImage};
use itertools::iproduct;
use num_traits::NumCast;

/// The luma channel of any pixel, as a float.
#[inline]
pub fn luminance_of<P, S>(p: &P) -> f64
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let c = p.to_luma().channels().to_owned();
    NumCast::from(c[0]).unwrap_or(0.0)
}

/// The luminance grid of an image, for energy computation.
pub fn luminance_grid<I, P, S>(image: &I) -> Result<TwoDimensionalMap<f64>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let values = iproduct!(0..height, 0..width)
        .map(|(y, x)| luminance_of(&image.get_pixel(x, y)))
        .collect();
    TwoDimensionalMap::from_vec(width as usize, height as usize, values)
}

/// The RGBA pixel grid the carver shrinks.
pub fn color_grid(image: &RgbaImage) -> Result<PixelGrid<Rgba<u8>>> {
    let (width, height) = image.dimensions();
    PixelGrid::from_fn(width as usize, height as usize, |x, y| {
        *image.get_pixel(x as u32, y as u32)
    })
}

/// Re-assemble a carved grid into an image.
pub fn to_image(grid: &PixelGrid<Rgba<u8>>) -> RgbaImage {
    let (width, height) = grid.dimensions();
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        grid.row(y as usize)[x as usize]
    })
}
