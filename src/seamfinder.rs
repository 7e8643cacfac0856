// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam selection
//!
//! The bottom row is ranked once, cheapest first, when the selector is
//! made.  Carve number `i` takes the `i`-th entry of that ranking and
//! follows predecessor steps back up to the top row.  The ranking is
//! never refreshed, so later seams are not necessarily the cheapest
//! seams left in the graph after earlier removals; they are the ones
//! that were next-cheapest before any carving started.

use crate::costgraph::{CostGraph, PixelNode};
use crate::error::{CarveError, Result};
use std::cmp::Ordering;

/// A seam as `(row, col)` pairs, top row first.
pub type Seam = Vec<(usize, usize)>;

/// Hands out seams in the bottom-row order fixed at construction.
#[derive(Debug, Clone)]
pub struct SeamSelector {
    // Origin columns of the bottom row, cheapest first.
    ranking: Vec<usize>,
}

impl SeamSelector {
    /// Rank the graph's bottom row by cumulative energy, ties broken by
    /// column.
    pub fn new(graph: &CostGraph) -> Self {
        let mut bottom: Vec<&PixelNode> = graph.bottom_row().iter().collect();
        bottom.sort_by(|a, b| {
            a.cumulative_energy()
                .partial_cmp(&b.cumulative_energy())
                .unwrap_or(Ordering::Equal)
                .then(a.col().cmp(&b.col()))
        });
        SeamSelector {
            ranking: bottom.into_iter().map(PixelNode::origin).collect(),
        }
    }

    /// How many seams the ranking can hand out.
    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Trace the seam ending at the `index`-th ranked bottom node.
    pub fn extract(&self, graph: &CostGraph, index: usize) -> Result<Seam> {
        let origin = *self.ranking.get(index).ok_or(CarveError::OutOfRange {
            index,
            len: self.ranking.len(),
        })?;
        let bottom = graph.height() - 1;
        let start = graph.find_by_origin(bottom, origin).ok_or_else(|| {
            CarveError::InvariantViolation(format!(
                "ranked bottom node from column {} has already been carved",
                origin
            ))
        })?;

        let mut seam = Vec::with_capacity(graph.height());
        let mut node = start;
        seam.push((node.row(), node.col()));
        while let Some(col) = node.predecessor_col() {
            node = graph.node(node.row() - 1, col).ok_or_else(|| {
                CarveError::InvariantViolation(format!(
                    "predecessor ({}, {}) is missing",
                    node.row() - 1,
                    col
                ))
            })?;
            seam.push((node.row(), node.col()));
        }
        seam.reverse();
        Ok(seam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twodmap::TwoDimensionalMap;

    const ENERGY_DATA: [f64; 20] = [
        9.0, 9.0, 0.0, 9.0, 9.0, //
        9.0, 1.0, 9.0, 8.0, 9.0, //
        9.0, 9.0, 9.0, 9.0, 0.0, //
        9.0, 9.0, 9.0, 0.0, 9.0, //
    ];

    fn graph() -> CostGraph {
        let energy = TwoDimensionalMap::from_vec(5, 4, ENERGY_DATA.to_vec()).unwrap();
        CostGraph::build(&energy).unwrap()
    }

    #[test]
    fn cheapest_seam_comes_first() {
        let graph = graph();
        let selector = SeamSelector::new(&graph);
        assert_eq!(
            selector.extract(&graph, 0).unwrap(),
            vec![(0, 2), (1, 3), (2, 4), (3, 3)]
        );
    }

    #[test]
    fn ranking_breaks_ties_by_column() {
        let graph = graph();
        let selector = SeamSelector::new(&graph);
        // Bottom row costs are 19, 19, 19, 8, 17.
        assert_eq!(selector.ranking, vec![3, 4, 0, 1, 2]);
        assert_eq!(selector.extract(&graph, 1).unwrap()[3], (3, 4));
        assert_eq!(selector.extract(&graph, 2).unwrap()[3], (3, 0));
    }

    #[test]
    fn seams_are_connected() {
        let graph = graph();
        let selector = SeamSelector::new(&graph);
        for index in 0..selector.len() {
            let seam = selector.extract(&graph, index).unwrap();
            assert_eq!(seam.len(), graph.height());
            for pair in seam.windows(2) {
                let (a, b) = (pair[0].1 as isize, pair[1].1 as isize);
                assert!((a - b).abs() <= 1, "{:?} is broken", seam);
            }
        }
    }

    #[test]
    fn index_past_bottom_row_is_out_of_range() {
        let graph = graph();
        let selector = SeamSelector::new(&graph);
        assert_eq!(
            selector.extract(&graph, 5).unwrap_err(),
            CarveError::OutOfRange { index: 5, len: 5 }
        );
    }

    #[test]
    fn ranking_survives_earlier_removals() {
        let mut graph = graph();
        let selector = SeamSelector::new(&graph);
        let first = selector.extract(&graph, 0).unwrap();
        graph.remove_seam(&first).unwrap();
        graph.repair(&first).unwrap();

        // Second pick is still the node that started at column 4, one
        // column further left now.
        let second = selector.extract(&graph, 1).unwrap();
        assert_eq!(second[3], (3, 3));
        assert_eq!(graph.node(3, 3).unwrap().origin(), 4);

        // Asking for the node the first seam already took is a defect.
        let stale = SeamSelector { ranking: vec![3] };
        assert!(stale.extract(&graph, 0).is_err());
    }
}
