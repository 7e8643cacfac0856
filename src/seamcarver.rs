// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! Narrow an image by removing vertical seams, or paint the seams that
//! would be removed onto the original (or onto a picture of its
//! cumulative energy) to see what the carver is doing.

use crate::costgraph::CostGraph;
use crate::energy::compute_energy;
use crate::error::{CarveError, Result};
use crate::imagegrid::{color_grid, luminance_grid, to_image};
use crate::pixelgrid::PixelGrid;
use crate::seamfinder::SeamSelector;
use crate::twodmap::TwoDimensionalMap;
use image::{Pixel, Rgba, RgbaImage};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// What a carve produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Remove the seams; the result is narrower.
    Commit,
    /// Paint the seams onto the original colors.
    VisualizePath,
    /// Paint the seams onto a grayscale map of cumulative energy.
    VisualizeEnergy,
}

impl FromStr for Mode {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "commit" => Ok(Mode::Commit),
            "visualize-path" => Ok(Mode::VisualizePath),
            "visualize-energy" => Ok(Mode::VisualizeEnergy),
            other => Err(CarveError::InvalidArgument(format!(
                "unrecognized mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Mode::Commit => "commit",
            Mode::VisualizePath => "visualize-path",
            Mode::VisualizeEnergy => "visualize-energy",
        })
    }
}

/// The color seams are painted with in the visualization modes.
pub fn seam_marker() -> Rgba<u8> {
    Rgba::from_channels(255, 0, 0, 255)
}

/// How many seams narrowing `width` to `percent` of itself takes.
///
/// Zero means there is nothing to do.  Asking to carve the whole
/// width away, or a percentage outside `0..=100`, is an error.
pub fn seam_count(width: usize, percent: f64) -> Result<usize> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(CarveError::InvalidArgument(format!(
            "percent must be within 0..=100, got {}",
            percent
        )));
    }
    let width_f = width as f64;
    let count = (((100.0 - percent) / 100.0) * width_f).min(width_f).floor() as usize;
    if count > 0 && count >= width {
        return Err(CarveError::InvalidArgument(format!(
            "removing {} seams would leave nothing of a {} pixel wide image",
            count, width
        )));
    }
    Ok(count)
}

// Linear map of [lo, hi] onto [0, 255].  A flat graph maps to black.
fn normalize(energy: f64, (lo, hi): (f64, f64)) -> u8 {
    if hi <= lo {
        return 0;
    }
    ((energy - lo) / (hi - lo) * 255.0).round().max(0.0).min(255.0) as u8
}

/// The engine's session object.  It owns the cost graph and the pixel
/// grid outright for the duration of one carve.
pub struct Carver {
    graph: CostGraph,
    pixels: PixelGrid<Rgba<u8>>,
}

impl Carver {
    /// Set up a session from a luminance grid and a color grid of the
    /// same shape.
    pub fn new(luma: &TwoDimensionalMap<f64>, pixels: PixelGrid<Rgba<u8>>) -> Result<Self> {
        if luma.dimensions() != pixels.dimensions() {
            let (lw, lh) = luma.dimensions();
            let (pw, ph) = pixels.dimensions();
            return Err(CarveError::InvalidInput(format!(
                "luminance grid is {}x{} but color grid is {}x{}",
                lw, lh, pw, ph
            )));
        }
        let energy = compute_energy(luma)?;
        let graph = CostGraph::build(&energy)?;
        Ok(Carver { graph, pixels })
    }

    pub fn graph(&self) -> &CostGraph {
        &self.graph
    }

    pub fn pixels(&self) -> &PixelGrid<Rgba<u8>> {
        &self.pixels
    }

    /// Carve down to `percent` of the original width, in `mode`.
    pub fn carve(mut self, percent: f64, mode: Mode) -> Result<PixelGrid<Rgba<u8>>> {
        let count = seam_count(self.graph.width(), percent)?;
        if count == 0 {
            debug!(percent, "nothing to carve");
            return Ok(self.pixels);
        }

        if mode == Mode::VisualizeEnergy {
            self.pixels = self.energy_picture()?;
        }

        let started = Instant::now();
        let selector = SeamSelector::new(&self.graph);
        for i in 0..count {
            let seam = selector.extract(&self.graph, i)?;
            let bottom = seam.last().map(|&(_, col)| col).unwrap_or(0);
            match mode {
                Mode::Commit => {
                    self.pixels.remove_seam(&seam)?;
                    self.graph.remove_seam(&seam)?;
                    let repaired = self.graph.repair(&seam)?;
                    debug!(
                        carve = i + 1,
                        of = count,
                        bottom,
                        repaired,
                        "removed seam"
                    );
                }
                // Nothing leaves the graph here, so there is nothing to
                // repair; every seam comes from the unmodified graph.
                Mode::VisualizePath | Mode::VisualizeEnergy => {
                    for &(row, col) in &seam {
                        self.pixels.paint(row, col, seam_marker())?;
                    }
                    debug!(carve = i + 1, of = count, bottom, "painted seam");
                }
            }
        }

        info!(
            seams = count,
            mode = %mode,
            width = self.pixels.width(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "carving finished"
        );
        Ok(self.pixels)
    }

    fn energy_picture(&self) -> Result<PixelGrid<Rgba<u8>>> {
        let bounds = self.graph.energy_bounds();
        let graph = &self.graph;
        PixelGrid::from_fn(graph.width(), graph.height(), |x, y| {
            let v = graph
                .node(y, x)
                .map(|node| normalize(node.cumulative_energy(), bounds))
                .unwrap_or(0);
            Rgba::from_channels(v, v, v, 255)
        })
    }
}

/// Carve a whole image: derive both grids from it, carve, and hand the
/// pixels back as an image.
pub fn carve_image(image: &RgbaImage, percent: f64, mode: Mode) -> Result<RgbaImage> {
    let luma = luminance_grid(image)?;
    let pixels = color_grid(image)?;
    let carved = Carver::new(&luma, pixels)?.carve(percent, mode)?;
    Ok(to_image(&carved))
}
