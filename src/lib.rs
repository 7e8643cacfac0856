// #![deny(missing_docs)]

//! Content-aware narrowing of images by vertical seam carving.
//!
//! Energy comes from the Sobel gradient of the luminance.  The cost
//! graph is built once, and after every removed seam only the cone of
//! nodes below it is recomputed.

pub mod ternary;

pub mod error;
pub use error::CarveError;

pub mod twodmap;
pub use twodmap::TwoDimensionalMap;

pub mod pixelgrid;
pub use pixelgrid::PixelGrid;

pub mod energy;
pub use energy::compute_energy;

pub mod costgraph;
pub use costgraph::{CostGraph, PixelNode, Step};

pub mod seamfinder;
pub use seamfinder::{Seam, SeamSelector};

pub mod imagegrid;

pub mod seamcarver;
pub use seamcarver::{carve_image, seam_count, Carver, Mode};

pub mod config;
pub use config::Config;
