#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Dancing links: a toroidal doubly-linked sparse matrix supporting O(1)
//! reversible column removal, and the Algorithm X search built on top of it.

pub mod matrix;
pub mod node;
pub mod search;
