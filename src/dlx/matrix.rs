#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The link matrix: a toroidal, 4-way circular doubly-linked representation
//! of a 0/1 incidence matrix.
//!
//! Construction ingests an [`IncidenceMatrix`], creates one header per
//! constraint column plus one node per set cell, and wires every node into
//! its row ring and column ring by scanning cyclically for the nearest
//! occupied neighbour in each direction. A root header is spliced into the
//! header ring so that walking right from it visits every uncovered column.
//!
//! All nodes are allocated once, up front. [`LinkMatrix::cover`] and
//! [`LinkMatrix::uncover`] only rewrite links; applying them in sequence on
//! the same header restores the arena to the exact prior state, index for
//! index.

use crate::dlx::node::{Node, NodeId};
use std::fmt;

/// Error building an incidence matrix from raw row data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// A row referenced a column index at or beyond the declared width.
    MalformedMatrix {
        /// The offending column index.
        column: usize,
        /// The declared number of columns.
        columns: usize,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedMatrix { column, columns } => write!(
                f,
                "malformed incidence matrix: column {column} out of range for width {columns}"
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// A dense 0/1 incidence matrix indexed by `(column, row)`.
///
/// A set cell means "row participates in constraint column". This is the
/// construction input for [`LinkMatrix`]; it is consumed once and plays no
/// part in the search itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceMatrix {
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl IncidenceMatrix {
    /// Creates an all-zero matrix with the given dimensions.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![false; columns * rows],
        }
    }

    /// Builds a matrix from per-row lists of participating column indices.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::MalformedMatrix`] if any row references a
    /// column index `>= columns`.
    pub fn from_rows(columns: usize, rows: &[Vec<usize>]) -> Result<Self, MatrixError> {
        let mut matrix = Self::new(columns, rows.len());
        for (row, entries) in rows.iter().enumerate() {
            for &column in entries {
                if column >= columns {
                    return Err(MatrixError::MalformedMatrix { column, columns });
                }
                matrix.set(column, row);
            }
        }
        Ok(matrix)
    }

    /// Marks `(column, row)` as occupied.
    ///
    /// # Panics
    ///
    /// If either index is out of range.
    pub fn set(&mut self, column: usize, row: usize) {
        assert!(
            column < self.columns && row < self.rows,
            "cell ({column}, {row}) out of range for {}x{} matrix",
            self.columns,
            self.rows
        );
        self.cells[column * self.rows + row] = true;
    }

    /// Returns whether `(column, row)` is occupied.
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> bool {
        self.cells[column * self.rows + row]
    }

    /// The number of constraint columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// The number of candidate rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }
}

/// Column coordinate given to the root header, which anchors the header ring
/// without belonging to any constraint column.
const ROOT_COLUMN: usize = usize::MAX;

/// The toroidal linked structure Algorithm X dances on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatrix {
    nodes: Vec<Node>,
    root: NodeId,
}

impl LinkMatrix {
    /// Builds the linked structure from an incidence matrix.
    ///
    /// Headers occupy a synthetic row above row 0, so the same wrap-around
    /// neighbour scan that closes the row and column rings also closes the
    /// header ring and links each header into its own column ring.
    #[must_use]
    pub fn new(map: &IncidenceMatrix) -> Self {
        let columns = map.columns();
        let height = map.rows() + 1;

        let mut nodes = Vec::new();
        let mut grid: Vec<Option<NodeId>> = vec![None; columns * height];

        for column in 0..columns {
            let header = NodeId::new(nodes.len());
            nodes.push(Node::header(header, column));
            grid[column * height] = Some(header);

            for row in 0..map.rows() {
                if map.get(column, row) {
                    let id = NodeId::new(nodes.len());
                    nodes.push(Node::new(id, column, row, header));
                    nodes[header.index()].count += 1;
                    grid[column * height + row + 1] = Some(id);
                }
            }
        }

        link_grid(&mut nodes, &grid, columns, height);

        let root = NodeId::new(nodes.len());
        nodes.push(Node::header(root, ROOT_COLUMN));
        if columns > 0 {
            // Splice the root in just before the header of column 0.
            let first = NodeId::new(0);
            let last = nodes[first.index()].left;
            nodes[root.index()].left = last;
            nodes[root.index()].right = first;
            nodes[last.index()].right = root;
            nodes[first.index()].left = root;
        }

        Self { nodes, root }
    }

    /// The sentinel header anchoring the header ring.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The right neighbour of `id` in its row ring.
    #[must_use]
    pub fn right(&self, id: NodeId) -> NodeId {
        self.node(id).right
    }

    /// The left neighbour of `id` in its row ring.
    #[must_use]
    pub fn left(&self, id: NodeId) -> NodeId {
        self.node(id).left
    }

    /// The upward neighbour of `id` in its column ring.
    #[must_use]
    pub fn up(&self, id: NodeId) -> NodeId {
        self.node(id).up
    }

    /// The downward neighbour of `id` in its column ring.
    #[must_use]
    pub fn down(&self, id: NodeId) -> NodeId {
        self.node(id).down
    }

    /// The header of the column `id` belongs to.
    #[must_use]
    pub fn header_of(&self, id: NodeId) -> NodeId {
        self.node(id).header
    }

    /// The number of nodes currently linked into the column under `header`.
    #[must_use]
    pub fn count(&self, header: NodeId) -> usize {
        self.node(header).count
    }

    /// The `(column, row)` coordinates of an in-matrix node.
    ///
    /// Headers report their column and a row above every real row; the root
    /// belongs to no column at all.
    #[must_use]
    pub fn position(&self, id: NodeId) -> (usize, usize) {
        let node = self.node(id);
        (node.column, node.row)
    }

    /// Walks the header ring right from the root, yielding every uncovered
    /// column header.
    pub fn live_headers(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(self.right(self.root)), |&id| Some(self.right(id)))
            .take_while(|&id| id != self.root)
    }

    /// Removes `header`'s column and every row with a node in that column.
    ///
    /// The header leaves the header ring first; then each node in the
    /// column, top to bottom, has its row-mates unlinked from their own
    /// columns, left to right.
    pub(crate) fn cover(&mut self, header: NodeId) {
        debug_assert!(self.node(header).is_header(), "cover target must be a header");
        self.unlink_row(header);

        let mut column = self.down(header);
        while column != header {
            let mut row = self.right(column);
            while row != column {
                self.unlink_column(row);
                row = self.right(row);
            }
            column = self.down(column);
        }
    }

    /// Exact inverse of [`cover`](Self::cover).
    ///
    /// Walks the column ring upward and each row ring leftward, the mirror
    /// of the cover order, and relinks the header into the header ring only
    /// after every column membership is consistent again.
    pub(crate) fn uncover(&mut self, header: NodeId) {
        debug_assert!(self.node(header).is_header(), "uncover target must be a header");
        let mut column = self.up(header);
        while column != header {
            let mut row = self.left(column);
            while row != column {
                self.link_column(row);
                row = self.left(row);
            }
            column = self.up(column);
        }

        self.link_row(header);
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn unlink_row(&mut self, id: NodeId) {
        let Node { left, right, .. } = *self.node(id);
        self.nodes[right.index()].left = left;
        self.nodes[left.index()].right = right;
    }

    fn link_row(&mut self, id: NodeId) {
        let Node { left, right, .. } = *self.node(id);
        self.nodes[right.index()].left = id;
        self.nodes[left.index()].right = id;
    }

    fn unlink_column(&mut self, id: NodeId) {
        let Node { up, down, header, .. } = *self.node(id);
        self.nodes[up.index()].down = down;
        self.nodes[down.index()].up = up;
        self.nodes[header.index()].count -= 1;
    }

    fn link_column(&mut self, id: NodeId) {
        let Node { up, down, header, .. } = *self.node(id);
        self.nodes[up.index()].down = id;
        self.nodes[down.index()].up = id;
        self.nodes[header.index()].count += 1;
    }
}

/// Wires every occupied grid cell to its nearest occupied neighbour in all
/// four directions, wrapping toroidally. A cell alone in its row or column
/// ends up linked to itself.
fn link_grid(nodes: &mut [Node], grid: &[Option<NodeId>], columns: usize, height: usize) {
    let at = |column: usize, gy: usize| grid[column * height + gy];

    for column in 0..columns {
        for gy in 0..height {
            let Some(id) = at(column, gy) else {
                continue;
            };

            let mut i = column;
            let left = loop {
                i = if i == 0 { columns - 1 } else { i - 1 };
                if let Some(found) = at(i, gy) {
                    break found;
                }
            };

            let mut i = column;
            let right = loop {
                i = if i + 1 >= columns { 0 } else { i + 1 };
                if let Some(found) = at(i, gy) {
                    break found;
                }
            };

            let mut j = gy;
            let up = loop {
                j = if j == 0 { height - 1 } else { j - 1 };
                if let Some(found) = at(column, j) {
                    break found;
                }
            };

            let mut j = gy;
            let down = loop {
                j = if j + 1 >= height { 0 } else { j + 1 };
                if let Some(found) = at(column, j) {
                    break found;
                }
            };

            let node = &mut nodes[id.index()];
            node.left = left;
            node.right = right;
            node.up = up;
            node.down = down;
        }
    }
}
