#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Arena node for the dancing-links matrix.
//!
//! The matrix is a cyclic, self-referential graph. Rather than linking nodes
//! through pointers, every node lives in one arena and the four neighbour
//! relations are stable indices into it. A freshly created node is a
//! singleton ring: all four neighbours (and its header) point back at
//! itself, so no "null" sentinel is ever needed.
//!
//! Column headers are ordinary nodes whose `count` field is meaningful: it
//! tracks how many nodes are currently linked into the column below them.

/// Stable index of a node within a [`LinkMatrix`](super::matrix::LinkMatrix)
/// arena.
///
/// Ids are not transferable between matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

/// Row coordinate given to column headers, which sit above every real row.
pub(crate) const HEADER_ROW: usize = usize::MAX;

/// One occupied cell of the incidence matrix (or a column header).
///
/// `column` and `row` are fixed at creation and identify the node; the four
/// neighbour links and the header's `count` are rewritten freely by
/// cover/uncover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) up: NodeId,
    pub(crate) down: NodeId,
    /// Header of the column this node is linked into. Headers are their own
    /// header.
    pub(crate) header: NodeId,
    pub(crate) column: usize,
    pub(crate) row: usize,
    /// Number of nodes currently linked below this node. Only meaningful
    /// when the node is a column header.
    pub(crate) count: usize,
}

impl Node {
    /// Creates a detached node at `id`: a singleton ring owned by `header`.
    pub(crate) const fn new(id: NodeId, column: usize, row: usize, header: NodeId) -> Self {
        Self {
            left: id,
            right: id,
            up: id,
            down: id,
            header,
            column,
            row,
            count: 0,
        }
    }

    /// Creates a column header at `id`. Headers own themselves and start
    /// with an empty column.
    pub(crate) const fn header(id: NodeId, column: usize) -> Self {
        Self::new(id, column, HEADER_ROW, id)
    }

    pub(crate) const fn is_header(&self) -> bool {
        self.row == HEADER_ROW
    }
}
