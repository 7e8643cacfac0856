// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Configuration for one carving run.

use crate::seamcarver::Mode;
use std::path::PathBuf;

/// Where the image comes from, where the result goes, and how to
/// carve it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Image to decode
    pub input: PathBuf,

    /// Where to encode the result; the format follows the extension
    pub output: PathBuf,

    /// Target width as a percentage of the original (0 to 100)
    pub percent: f64,

    /// Commit, or one of the visualizations
    pub mode: Mode,
}

impl Config {
    /// A run that narrows `input` to 90% of its width and writes the
    /// result to `output`.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output: Q) -> Self {
        Config {
            input: input.into(),
            output: output.into(),
            percent: 90.0,
            mode: Mode::Commit,
        }
    }

    pub fn with_percent(mut self, percent: f64) -> Self {
        self.percent = percent;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_then_overrides() {
        let config = Config::new("in.jpg", "out.png");
        assert_eq!(config.percent, 90.0);
        assert_eq!(config.mode, Mode::Commit);

        let config = config.with_percent(50.0).with_mode(Mode::VisualizePath);
        assert_eq!(config.percent, 50.0);
        assert_eq!(config.mode, Mode::VisualizePath);
        assert_eq!(config.output, PathBuf::from("out.png"));
    }
}
