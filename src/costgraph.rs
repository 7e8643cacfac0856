// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The seam cost graph
//!
//! One node per surviving pixel.  Each node knows the cheapest
//! cumulative energy of any connected path from the top row down to
//! itself, and which of the (up to) three nodes above it that path
//! came through.
//!
//! The graph is an arena: a vector of rows, each row a vector of
//! nodes.  A predecessor is a step (left, middle, right) relative to
//! the node's own column, never a reference, so compacting a row
//! can't leave anything dangling.  Nodes that shift left together
//! with their predecessor keep a valid step without being touched,
//! which is what makes the incremental repair after a seam removal
//! possible.

use crate::cq;
use crate::error::{CarveError, Result};
use crate::twodmap::TwoDimensionalMap;
use std::cmp::Ordering;
use tracing::trace;

/// Which of the three nodes in the row above a node descends from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Left,
    Middle,
    Right,
}

impl Step {
    /// The predecessor's column, given the node's own column.
    pub fn parent_col(self, col: usize) -> usize {
        match self {
            Step::Left => col - 1,
            Step::Middle => col,
            Step::Right => col + 1,
        }
    }
}

/// One surviving pixel in the cost graph.
///
/// Two nodes compare equal, and sort, by position alone; their
/// energies play no part.
#[derive(Debug, Clone, Copy)]
pub struct PixelNode {
    row: usize,
    col: usize,
    origin: usize,
    local_energy: f64,
    cumulative_energy: f64,
    predecessor: Option<Step>,
}

impl PixelNode {
    fn root(col: usize, local_energy: f64) -> Self {
        PixelNode {
            row: 0,
            col,
            origin: col,
            local_energy,
            cumulative_energy: local_energy,
            predecessor: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Current column; drops by one each time a node to its left is removed.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Column this node had when the graph was built.  Never changes,
    /// and stays ascending along a row, so it can be binary searched.
    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn local_energy(&self) -> f64 {
        self.local_energy
    }

    pub fn cumulative_energy(&self) -> f64 {
        self.cumulative_energy
    }

    pub fn predecessor(&self) -> Option<Step> {
        self.predecessor
    }

    /// Column of the predecessor in the row above, if any.
    pub fn predecessor_col(&self) -> Option<usize> {
        self.predecessor.map(|step| step.parent_col(self.col))
    }
}

impl PartialEq for PixelNode {
    fn eq(&self, other: &Self) -> bool {
        (self.row, self.col) == (other.row, other.col)
    }
}

impl Eq for PixelNode {}

impl PartialOrd for PixelNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PixelNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

// Candidates are scanned left, middle, right; only a strictly smaller
// cumulative energy displaces the current best, so ties go to the
// leftmost.  The right candidate exists only if `col` is not the last
// column, and the row above is always the same length as this one.
fn choose_predecessor(above: &[PixelNode], col: usize) -> Result<(Step, f64)> {
    let last = above.len().saturating_sub(1);
    let candidates = [
        cq!(col == 0, None, Some((Step::Left, col - 1))),
        Some((Step::Middle, col)),
        cq!(col >= last, None, Some((Step::Right, col + 1))),
    ];
    candidates
        .iter()
        .flatten()
        .filter_map(|&(step, c)| above.get(c).map(|node| (step, node.cumulative_energy)))
        .fold(None, |best: Option<(Step, f64)>, (step, energy)| match best {
            Some((_, least)) if least <= energy => best,
            _ => Some((step, energy)),
        })
        .ok_or_else(|| {
            CarveError::InvariantViolation(format!(
                "no predecessor candidates for column {} under a row of {}",
                col,
                above.len()
            ))
        })
}

/// The cumulative-energy graph over an image's surviving pixels.
#[derive(Debug, Clone)]
pub struct CostGraph {
    rows: Vec<Vec<PixelNode>>,
}

impl CostGraph {
    /// Build the graph from an energy field, top to bottom, left to right.
    pub fn build(energy: &TwoDimensionalMap<f64>) -> Result<Self> {
        let (width, height) = energy.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidInput(format!(
                "cannot build a cost graph over a {}x{} energy field",
                width, height
            )));
        }

        let mut rows: Vec<Vec<PixelNode>> = Vec::with_capacity(height);
        rows.push(
            energy
                .row(0)
                .iter()
                .enumerate()
                .map(|(col, &e)| PixelNode::root(col, e))
                .collect(),
        );

        for y in 1..height {
            let above = &rows[y - 1];
            let row = energy
                .row(y)
                .iter()
                .enumerate()
                .map(|(col, &local_energy)| {
                    let (step, parent_energy) = choose_predecessor(above, col)?;
                    Ok(PixelNode {
                        row: y,
                        col,
                        origin: col,
                        local_energy,
                        cumulative_energy: local_energy + parent_energy,
                        predecessor: Some(step),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        Ok(CostGraph { rows })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Current row length.  Every row has the same length.
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn row(&self, y: usize) -> &[PixelNode] {
        &self.rows[y]
    }

    pub fn bottom_row(&self) -> &[PixelNode] {
        self.rows.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node(&self, row: usize, col: usize) -> Option<&PixelNode> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Find a node by the column it had when the graph was built.
    pub fn find_by_origin(&self, row: usize, origin: usize) -> Option<&PixelNode> {
        let nodes = self.rows.get(row)?;
        nodes
            .binary_search_by_key(&origin, |node| node.origin)
            .ok()
            .map(|index| &nodes[index])
    }

    /// The smallest and largest cumulative energies in the graph.
    pub fn energy_bounds(&self) -> (f64, f64) {
        self.rows
            .iter()
            .flatten()
            .map(|node| node.cumulative_energy)
            .fold((std::f64::INFINITY, std::f64::NEG_INFINITY), |(lo, hi), e| {
                (lo.min(e), hi.max(e))
            })
    }

    /// Delete one node per row.  The survivors' column numbers are left
    /// stale until `repair` runs; nothing else may touch the graph in
    /// between.
    pub fn remove_seam(&mut self, seam: &[(usize, usize)]) -> Result<()> {
        self.check_seam(seam)?;
        for &(row, col) in seam {
            self.rows[row].remove(col);
        }
        Ok(())
    }

    /// Re-derive costs after `remove_seam` took `seam` out of the graph.
    /// Returns the number of nodes whose costs were recomputed.
    ///
    /// Column numbers right of the seam are shifted first.  Then, row by
    /// row from the top, only the window of nodes whose costs could have
    /// moved is recomputed: the neighbours of anything that changed in
    /// the row above, plus the few columns around the removed nodes
    /// whose set of candidates was rearranged by the shift.  The window
    /// can widen by at most one column per side per row, so the work is
    /// bounded by a cone under the seam rather than the whole image.
    pub fn repair(&mut self, seam: &[(usize, usize)]) -> Result<usize> {
        if seam.len() != self.rows.len() {
            return Err(CarveError::InvariantViolation(format!(
                "seam has {} rows, graph has {}",
                seam.len(),
                self.rows.len()
            )));
        }

        for &(row, col) in seam {
            for node in self.rows[row].iter_mut().skip(col) {
                if node.col == 0 {
                    return Err(CarveError::InvariantViolation(format!(
                        "row {} would get a negative column",
                        row
                    )));
                }
                node.col -= 1;
            }
            let contiguous = self.rows[row]
                .iter()
                .enumerate()
                .skip(col.saturating_sub(1))
                .take(2)
                .all(|(index, node)| node.col == index);
            if !contiguous {
                return Err(CarveError::InvariantViolation(format!(
                    "row {} columns are not contiguous at {} after reindexing",
                    row, col
                )));
            }
        }

        let mut repaired = 0;
        // Span of columns in the row above whose cumulative energy moved.
        let mut moved: Option<(usize, usize)> = None;
        for y in 1..self.rows.len() {
            let len = self.rows[y].len();
            if len == 0 {
                break;
            }
            let last = len - 1;
            let (above_col, here_col) = (seam[y - 1].1, seam[y].1);
            let mut lo = above_col.min(here_col).saturating_sub(1);
            let mut hi = above_col.max(here_col).min(last);
            if let Some((mlo, mhi)) = moved {
                lo = lo.min(mlo.saturating_sub(1));
                hi = hi.max((mhi + 1).min(last));
            }

            let (top, bottom) = self.rows.split_at_mut(y);
            let above = &top[y - 1];
            let here = &mut bottom[0];
            let mut moved_here: Option<(usize, usize)> = None;
            for col in lo..=hi {
                let (step, parent_energy) = choose_predecessor(above, col)?;
                let node = &mut here[col];
                let cumulative = node.local_energy + parent_energy;
                if cumulative != node.cumulative_energy {
                    moved_here = Some(match moved_here {
                        Some((a, _)) => (a, col),
                        None => (col, col),
                    });
                }
                node.cumulative_energy = cumulative;
                node.predecessor = Some(step);
            }
            repaired += hi + 1 - lo;
            trace!(row = y, lo, hi, "repaired window");
            moved = moved_here;
        }
        Ok(repaired)
    }

    /// Recompute every cost from the surviving local energies.  This is
    /// the slow reference the incremental repair is measured against.
    pub fn recompute_all(&mut self) -> Result<()> {
        for y in 1..self.rows.len() {
            let (top, bottom) = self.rows.split_at_mut(y);
            let above = &top[y - 1];
            for node in bottom[0].iter_mut() {
                let (step, parent_energy) = choose_predecessor(above, node.col)?;
                node.cumulative_energy = node.local_energy + parent_energy;
                node.predecessor = Some(step);
            }
        }
        Ok(())
    }

    /// Verify every structural and cost invariant of the graph.
    pub fn check_invariants(&self) -> Result<()> {
        let width = self.width();
        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(CarveError::InvariantViolation(format!(
                    "row {} has {} nodes, row 0 has {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (index, node) in row.iter().enumerate() {
                if node.row != y || node.col != index {
                    return Err(CarveError::InvariantViolation(format!(
                        "node at ({}, {}) claims to be at ({}, {})",
                        y, index, node.row, node.col
                    )));
                }
                let expected = if y == 0 {
                    (None, node.local_energy)
                } else {
                    let (step, parent_energy) = choose_predecessor(&self.rows[y - 1], index)?;
                    (Some(step), node.local_energy + parent_energy)
                };
                if (node.predecessor, node.cumulative_energy) != expected {
                    return Err(CarveError::InvariantViolation(format!(
                        "node ({}, {}) has cost {:?}, expected {:?}",
                        y,
                        index,
                        (node.predecessor, node.cumulative_energy),
                        expected
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_seam(&self, seam: &[(usize, usize)]) -> Result<()> {
        if seam.len() != self.rows.len() {
            return Err(CarveError::InvariantViolation(format!(
                "seam has {} rows, graph has {}",
                seam.len(),
                self.rows.len()
            )));
        }
        for (y, &(row, col)) in seam.iter().enumerate() {
            if row != y || col >= self.rows[y].len() {
                return Err(CarveError::InvariantViolation(format!(
                    "seam entry {} at ({}, {}) is outside the graph",
                    y, row, col
                )));
            }
        }
        Ok(())
    }
}
