#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Knuth's Algorithm X: depth-first enumeration of every exact cover of a
//! [`LinkMatrix`].
//!
//! The engine repeatedly picks the uncovered column with the fewest live
//! nodes (minimum remaining values), covers it, and branches over the rows
//! that satisfy it. Solutions are reported through a callback invoked
//! synchronously from inside the recursion; the callback's return value
//! decides whether the search keeps enumerating or unwinds immediately.

use crate::dlx::matrix::{IncidenceMatrix, LinkMatrix};
use crate::dlx::node::NodeId;

/// Tells the search engine whether to keep enumerating after a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverControl {
    /// Keep searching for further exact covers.
    Continue,
    /// Unwind the search immediately. Every covered column is still
    /// uncovered on the way out.
    Stop,
}

/// Algorithm X search over a dancing-links matrix.
///
/// The candidate list holds every node of every row chosen along the current
/// branch, in the order the rows were entered. When the header ring empties,
/// that list is a complete exact cover and is handed to the solution
/// callback.
#[derive(Debug, Clone)]
pub struct AlgorithmX {
    links: LinkMatrix,
    candidates: Vec<NodeId>,
}

impl AlgorithmX {
    /// Builds the link matrix for `map` and an engine ready to search it.
    #[must_use]
    pub fn new(map: &IncidenceMatrix) -> Self {
        Self {
            links: LinkMatrix::new(map),
            candidates: Vec::new(),
        }
    }

    /// Enumerates exact covers, invoking `on_solution` once per cover found,
    /// in depth-first discovery order.
    ///
    /// The callback receives the matrix (for node coordinates) and the
    /// candidate nodes of the cover; it must not retain the ids. Returning
    /// [`SolverControl::Stop`] ends the enumeration early. The number of
    /// callback invocations is returned; zero means no exact cover exists.
    pub fn solve<F>(&mut self, mut on_solution: F) -> usize
    where
        F: FnMut(&LinkMatrix, &[NodeId]) -> SolverControl,
    {
        let mut found = 0;
        self.candidates.clear();
        self.search(self.choose_column(), &mut on_solution, &mut found);
        found
    }

    /// Picks the live header with the fewest nodes, first one winning ties.
    /// Returns the root when no columns remain, which is the terminal case.
    fn choose_column(&self) -> NodeId {
        let root = self.links.root();
        let mut best = self.links.right(root);

        let mut id = self.links.right(root);
        while id != root {
            if self.links.count(id) < self.links.count(best) {
                best = id;
            }
            id = self.links.right(id);
        }

        best
    }

    fn search<F>(&mut self, header: NodeId, on_solution: &mut F, found: &mut usize) -> SolverControl
    where
        F: FnMut(&LinkMatrix, &[NodeId]) -> SolverControl,
    {
        if header == self.links.root() {
            *found += 1;
            return on_solution(&self.links, &self.candidates);
        }

        self.links.cover(header);

        let mut control = SolverControl::Continue;
        let mut column = self.links.down(header);
        while column != header {
            let depth = self.candidates.len();
            self.candidates.push(column);

            let mut row = self.links.right(column);
            while row != column {
                self.links.cover(self.links.header_of(row));
                self.candidates.push(row);
                row = self.links.right(row);
            }

            control = self.search(self.choose_column(), on_solution, found);

            let mut row = self.links.left(column);
            while row != column {
                self.links.uncover(self.links.header_of(row));
                row = self.links.left(row);
            }
            self.candidates.truncate(depth);

            if control == SolverControl::Stop {
                break;
            }
            column = self.links.down(column);
        }

        self.links.uncover(header);
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    /// Collects the matrix-row indices of one reported cover, sorted.
    fn chosen_rows(links: &LinkMatrix, candidates: &[NodeId]) -> Vec<usize> {
        candidates
            .iter()
            .map(|&id| links.position(id).1)
            .unique()
            .sorted()
            .collect()
    }

    fn knuth_example() -> IncidenceMatrix {
        IncidenceMatrix::from_rows(
            7,
            &[
                vec![2, 4],
                vec![0, 3, 6],
                vec![1, 2, 5],
                vec![0, 3, 5],
                vec![1, 6],
                vec![3, 4, 6],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_unique_cover_found_once() {
        let mut engine = AlgorithmX::new(&knuth_example());

        let mut solutions = Vec::new();
        let found = engine.solve(|links, candidates| {
            solutions.push(chosen_rows(links, candidates));
            SolverControl::Continue
        });

        assert_eq!(found, 1);
        assert_eq!(solutions, vec![vec![0, 3, 4]]);
    }

    #[test]
    fn test_every_cover_is_enumerated() {
        // Two ways to cover column 0, one way to cover column 1.
        let map = IncidenceMatrix::from_rows(2, &[vec![0], vec![0], vec![1]]).unwrap();
        let mut engine = AlgorithmX::new(&map);

        let mut solutions = Vec::new();
        engine.solve(|links, candidates| {
            solutions.push(chosen_rows(links, candidates));
            SolverControl::Continue
        });

        solutions.sort();
        assert_eq!(solutions, vec![vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn test_stop_signal_ends_enumeration() {
        let map = IncidenceMatrix::from_rows(2, &[vec![0], vec![0], vec![1]]).unwrap();
        let mut engine = AlgorithmX::new(&map);

        let mut calls = 0;
        let found = engine.solve(|_, _| {
            calls += 1;
            SolverControl::Stop
        });

        assert_eq!(calls, 1);
        assert_eq!(found, 1);
    }

    #[test]
    fn test_unsatisfiable_never_calls_back() {
        // Column 1 has no rows at all.
        let map = IncidenceMatrix::from_rows(2, &[vec![0]]).unwrap();
        let mut engine = AlgorithmX::new(&map);

        let found = engine.solve(|_, _| unreachable!("no cover exists"));
        assert_eq!(found, 0);
    }

    #[test]
    fn test_solve_is_repeatable() {
        // Full restoration on unwind means the engine can run again.
        let mut engine = AlgorithmX::new(&knuth_example());
        let first = engine.solve(|_, _| SolverControl::Continue);
        let second = engine.solve(|_, _| SolverControl::Continue);
        assert_eq!((first, second), (1, 1));
    }

    #[test]
    fn test_choose_column_prefers_minimum_count() {
        // Column counts: 1, 2, 1. Minimum is 1; column 0 is seen first.
        let map =
            IncidenceMatrix::from_rows(3, &[vec![0, 1], vec![1, 2]]).unwrap();
        let engine = AlgorithmX::new(&map);

        let chosen = engine.choose_column();
        assert_eq!(engine.links.position(chosen).0, 0);
        assert_eq!(engine.links.count(chosen), 1);

        let minimum = engine
            .links
            .live_headers()
            .map(|id| engine.links.count(id))
            .min()
            .unwrap();
        assert_eq!(engine.links.count(chosen), minimum);
    }

    #[test]
    fn test_empty_problem_has_one_empty_cover() {
        let mut engine = AlgorithmX::new(&IncidenceMatrix::new(0, 0));
        let mut sizes = Vec::new();
        let found = engine.solve(|_, candidates| {
            sizes.push(candidates.len());
            SolverControl::Continue
        });
        assert_eq!(found, 1);
        assert_eq!(sizes, vec![0]);
    }
}
