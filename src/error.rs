// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving errors
//!
//! Everything a caller can get wrong is checked before the first seam
//! is removed.  `OutOfRange` and `InvariantViolation` mean the engine
//! itself is broken; nothing retries on any of them.

use failure::Fail;

/// The error taxonomy for the whole engine.
#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    /// Zero-sized or mismatched input grids.
    #[fail(display = "invalid input: {}", _0)]
    InvalidInput(String),

    /// A parameter the caller supplied can't be honored.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// A seam was requested past the end of the bottom row.
    #[fail(display = "seam index {} out of range for bottom row of {}", index, len)]
    OutOfRange { index: usize, len: usize },

    /// The cost graph no longer satisfies its own invariants.
    #[fail(display = "cost graph invariant violated: {}", _0)]
    InvariantViolation(String),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, CarveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = CarveError::OutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "seam index 7 out of range for bottom row of 3"
        );
        let err = CarveError::InvalidArgument("mode 'sideways'".to_string());
        assert_eq!(err.to_string(), "invalid argument: mode 'sideways'");
    }
}
