#![deny(missing_docs)]
//! This crate solves exact-cover problems with Knuth's Algorithm X over a
//! dancing-links matrix, and provides a Sudoku solver built on that engine.

/// The `dlx` module implements the dancing-links matrix and the Algorithm X
/// search engine that enumerates every exact cover over it.
pub mod dlx;

/// The `sudoku` module implements the Sudoku solver, which encodes a grid as
/// an exact-cover problem and decodes found covers back into grids.
pub mod sudoku;
