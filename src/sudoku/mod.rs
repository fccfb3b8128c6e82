#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// The `solver` module reduces Sudoku grids to exact cover and back.
pub mod solver;
