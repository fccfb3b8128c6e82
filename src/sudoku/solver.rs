#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reduction of Sudoku to exact cover.
//!
//! An N×N grid (N a perfect square) maps onto an incidence matrix with 4·N²
//! constraint columns, one family of N² columns each for: cell occupied,
//! row has digit, column has digit, box has digit. Every candidate placement
//! `(row, column, digit)` becomes one matrix row setting exactly one column
//! in each family; a given cell contributes a single candidate, a blank cell
//! contributes N. A cover picked by the engine selects one candidate per
//! cell while satisfying every family once, which is precisely a solved
//! grid.

use crate::dlx::matrix::{IncidenceMatrix, LinkMatrix};
use crate::dlx::node::NodeId;
use crate::dlx::search::{AlgorithmX, SolverControl};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Ways a puzzle can be rejected before the engine ever runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// The input string's length is not a perfect square.
    LengthNotSquare(usize),
    /// The grid size has no integer square root, so no box partition exists.
    SizeNotSquare(usize),
    /// A grid row has a different length than the grid's height.
    RowLengthMismatch {
        /// Index of the offending row.
        row: usize,
        /// Its actual length.
        length: usize,
        /// The expected length (the grid's height).
        size: usize,
    },
    /// A cell holds something that is not a digit in `0..=N`.
    InvalidCell {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthNotSquare(length) => {
                write!(f, "puzzle length {length} is not a perfect square")
            }
            Self::SizeNotSquare(size) => {
                write!(f, "grid size {size} has no integer square root")
            }
            Self::RowLengthMismatch { row, length, size } => {
                write!(f, "row {row} has {length} cells, expected {size}")
            }
            Self::InvalidCell { row, column } => {
                write!(f, "cell ({row}, {column}) is not a valid digit")
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

/// An N×N grid of cell values; 0 marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    /// Wraps a grid of cell values.
    #[must_use]
    pub const fn new(cells: Vec<Vec<usize>>) -> Self {
        Self(cells)
    }

    /// The grid's height (and, for a valid puzzle, its width).
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// The value at `(row, column)`; 0 for empty.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> usize {
        self.0[row][column]
    }

    /// The underlying rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.0
    }
}

impl From<Vec<Vec<usize>>> for Board {
    fn from(cells: Vec<Vec<usize>>) -> Self {
        Self::new(cells)
    }
}

impl From<Board> for Vec<Vec<usize>> {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl<const N: usize> From<[[usize; N]; N]> for Board {
    fn from(cells: [[usize; N]; N]) -> Self {
        Self::new(cells.iter().map(|row| row.to_vec()).collect())
    }
}

impl fmt::Display for Board {
    /// Renders the grid with rules between boxes, e.g. for a solved 4×4:
    ///
    /// ```text
    /// +-----+-----+
    /// | 1 2 | 3 4 |
    /// | 3 4 | 1 2 |
    /// +-----+-----+
    /// | 2 1 | 4 3 |
    /// | 4 3 | 2 1 |
    /// +-----+-----+
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        let box_size = integer_sqrt(size).unwrap_or(size).max(1);
        let width = if size > 9 { 2 } else { 1 };

        let rule: String = {
            let segment = "-".repeat((width + 1) * box_size + 1);
            let mut rule = "+".to_owned();
            for _ in 0..size.div_ceil(box_size) {
                rule.push_str(&segment);
                rule.push('+');
            }
            rule
        };

        for (r, row) in self.0.iter().enumerate() {
            if r % box_size == 0 {
                writeln!(f, "{rule}")?;
            }
            for (c, &value) in row.iter().enumerate() {
                if c % box_size == 0 {
                    write!(f, "| ")?;
                }
                if value == 0 {
                    write!(f, "{:>width$} ", ".")?;
                } else {
                    write!(f, "{value:>width$} ")?;
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{rule}")
    }
}

/// The classic 9×9 puzzle with a unique solution, handy as a fixture.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A 4×4 puzzle whose two blanks are both forced.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [
    [1, 2, 0, 4],
    [3, 4, 1, 2],
    [2, 1, 4, 3],
    [4, 0, 2, 1],
];

/// A validated Sudoku puzzle ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    board: Board,
    size: usize,
    box_size: usize,
}

impl Sudoku {
    /// Validates a board: the grid must be square, its size a perfect
    /// square, and every cell value in `0..=N`.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::SizeNotSquare`], [`PuzzleError::RowLengthMismatch`] or
    /// [`PuzzleError::InvalidCell`] when the board fails those checks.
    pub fn new(board: Board) -> Result<Self, PuzzleError> {
        let size = board.size();
        let box_size = integer_sqrt(size).ok_or(PuzzleError::SizeNotSquare(size))?;

        for (row, cells) in board.rows().iter().enumerate() {
            if cells.len() != size {
                return Err(PuzzleError::RowLengthMismatch {
                    row,
                    length: cells.len(),
                    size,
                });
            }
            for (column, &value) in cells.iter().enumerate() {
                if value > size {
                    return Err(PuzzleError::InvalidCell { row, column });
                }
            }
        }

        Ok(Self {
            board,
            size,
            box_size,
        })
    }

    /// Parses a row-major digit string of length N²; `'0'` and `' '` mark
    /// empty cells. Only sizes up to 9×9 are expressible in this form;
    /// larger boards go through [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// [`PuzzleError::LengthNotSquare`] when the string length has no
    /// integer square root, [`PuzzleError::InvalidCell`] for characters that
    /// are not digits or blanks, plus everything [`new`](Self::new) rejects.
    pub fn from_line(line: &str) -> Result<Self, PuzzleError> {
        let length = line.chars().count();
        let size = integer_sqrt(length).ok_or(PuzzleError::LengthNotSquare(length))?;

        let mut cells = vec![vec![0; size]; size];
        for (i, ch) in line.chars().enumerate() {
            let (row, column) = (i / size, i % size);
            cells[row][column] = match ch {
                '0' | ' ' => 0,
                _ => ch
                    .to_digit(10)
                    .ok_or(PuzzleError::InvalidCell { row, column })?
                    as usize,
            };
        }

        Self::new(Board::new(cells))
    }

    /// The puzzle's grid.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The grid size N.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The box size √N.
    #[must_use]
    pub const fn box_size(&self) -> usize {
        self.box_size
    }

    /// Builds the exact-cover incidence matrix for this puzzle: 4·N²
    /// constraint columns, one candidate row per given cell and N per blank.
    #[must_use]
    pub fn encode(&self) -> IncidenceMatrix {
        let cells = self.size * self.size;
        let blanks = self
            .board
            .rows()
            .iter()
            .flatten()
            .filter(|&&value| value == 0)
            .count();
        let candidates = blanks * self.size + (cells - blanks);

        let mut map = IncidenceMatrix::new(4 * cells, candidates);
        let mut next = 0;
        for row in 0..self.size {
            for column in 0..self.size {
                let given = self.board.get(row, column);
                if given == 0 {
                    for digit in 0..self.size {
                        self.mark(&mut map, row, column, digit, next);
                        next += 1;
                    }
                } else {
                    self.mark(&mut map, row, column, given - 1, next);
                    next += 1;
                }
            }
        }
        map
    }

    /// Enumerates completions of the puzzle in discovery order, handing each
    /// decoded grid to `on_solution` until the callback stops the search or
    /// the search space is exhausted. Returns the number of grids emitted;
    /// zero means the puzzle is unsolvable.
    pub fn solve<F>(&self, mut on_solution: F) -> usize
    where
        F: FnMut(&Board) -> SolverControl,
    {
        let mut engine = AlgorithmX::new(&self.encode());
        engine.solve(|links, candidates| on_solution(&self.decode(links, candidates)))
    }

    /// Stops at the first completion found, if any.
    #[must_use]
    pub fn first_solution(&self) -> Option<Board> {
        let mut found = None;
        self.solve(|board| {
            found = Some(board.clone());
            SolverControl::Stop
        });
        found
    }

    /// Collects every distinct completion of the puzzle.
    #[must_use]
    pub fn solutions(&self) -> Vec<Board> {
        let mut all = Vec::new();
        self.solve(|board| {
            all.push(board.clone());
            SolverControl::Continue
        });
        all
    }

    /// The four constraint columns satisfied by placing `digit` (0-based) at
    /// `(row, column)`: one per family, in family order.
    fn constraint_columns(&self, row: usize, column: usize, digit: usize) -> SmallVec<[usize; 4]> {
        let n = self.size;
        let cells = n * n;
        let box_index = column / self.box_size + (row / self.box_size) * self.box_size;

        SmallVec::from_buf([
            column + row * n,
            cells + row * n + digit,
            2 * cells + column * n + digit,
            3 * cells + box_index * n + digit,
        ])
    }

    fn mark(&self, map: &mut IncidenceMatrix, row: usize, column: usize, digit: usize, at: usize) {
        for constraint in self.constraint_columns(row, column, digit) {
            map.set(constraint, at);
        }
    }

    /// Rebuilds a grid from the candidate nodes of one cover.
    ///
    /// Nodes are paired by their shared matrix row: the cell-family node
    /// pins the grid position, the row-family node for the same matrix row
    /// supplies the digit. Column- and box-family nodes carry no extra
    /// information.
    fn decode(&self, links: &LinkMatrix, candidates: &[NodeId]) -> Board {
        let n = self.size;
        let cells = n * n;

        let mut grid = vec![vec![0; n]; n];
        let mut positions: FxHashMap<usize, (usize, usize)> = FxHashMap::default();

        for &id in candidates
            .iter()
            .sorted_by_key(|&&id| links.position(id).0)
        {
            let (constraint, candidate) = links.position(id);
            if constraint < cells {
                positions.insert(candidate, (constraint / n, constraint % n));
            } else if constraint < 2 * cells {
                if let Some(&(row, column)) = positions.get(&candidate) {
                    grid[row][column] = constraint % n + 1;
                }
            }
        }

        Board::new(grid)
    }
}

/// The integer square root of `value`, if it is exact.
const fn integer_sqrt(value: usize) -> Option<usize> {
    let root = value.isqrt();
    if root * root == value { Some(root) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NINE_SOLVED: [[usize; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    /// Asserts that `solved` completes `puzzle`: every row, column and box
    /// holds each digit exactly once and every given is unchanged.
    fn assert_completes(puzzle: &Sudoku, solved: &Board) {
        let n = puzzle.size();
        let b = puzzle.box_size();

        for r in 0..n {
            for c in 0..n {
                let given = puzzle.board().get(r, c);
                if given != 0 {
                    assert_eq!(solved.get(r, c), given, "given at ({r}, {c}) changed");
                }
            }
        }

        for i in 0..n {
            let mut row_seen = vec![false; n + 1];
            let mut col_seen = vec![false; n + 1];
            let mut box_seen = vec![false; n + 1];
            for j in 0..n {
                row_seen[solved.get(i, j)] = true;
                col_seen[solved.get(j, i)] = true;
                let (br, bc) = ((i / b) * b + j / b, (i % b) * b + j % b);
                box_seen[solved.get(br, bc)] = true;
            }
            for digit in 1..=n {
                assert!(row_seen[digit], "row {i} misses {digit}");
                assert!(col_seen[digit], "column {i} misses {digit}");
                assert!(box_seen[digit], "box {i} misses {digit}");
            }
        }
    }

    #[test]
    fn test_length_not_square_rejected() {
        assert_eq!(
            Sudoku::from_line("12345"),
            Err(PuzzleError::LengthNotSquare(5))
        );
    }

    #[test]
    fn test_size_without_square_root_rejected() {
        // Length 25 is square, but the derived size 5 is not.
        assert_eq!(
            Sudoku::from_line(&"0".repeat(25)),
            Err(PuzzleError::SizeNotSquare(5))
        );
    }

    #[test]
    fn test_non_digit_character_rejected() {
        let mut line = "0".repeat(16);
        line.replace_range(5..6, "x");
        assert_eq!(
            Sudoku::from_line(&line),
            Err(PuzzleError::InvalidCell { row: 1, column: 1 })
        );
    }

    #[test]
    fn test_digit_above_size_rejected() {
        let mut cells = vec![vec![0; 4]; 4];
        cells[2][3] = 5;
        assert_eq!(
            Sudoku::new(Board::new(cells)),
            Err(PuzzleError::InvalidCell { row: 2, column: 3 })
        );
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let mut cells = vec![vec![0; 4]; 4];
        cells[1].pop();
        assert_eq!(
            Sudoku::new(Board::new(cells)),
            Err(PuzzleError::RowLengthMismatch {
                row: 1,
                length: 3,
                size: 4
            })
        );
    }

    #[test]
    fn test_blank_characters_parse_as_empty() {
        let sudoku = Sudoku::from_line("1 2 0034 3041 20").unwrap();
        assert_eq!(sudoku.board().get(0, 0), 1);
        assert_eq!(sudoku.board().get(0, 1), 0);
        assert_eq!(sudoku.board().get(1, 2), 3);
    }

    #[test]
    fn test_encode_dimensions() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_NINE)).unwrap();
        let map = sudoku.encode();
        // 51 blanks and 30 givens in the classic example.
        assert_eq!(map.columns(), 4 * 81);
        assert_eq!(map.rows(), 51 * 9 + 30);
    }

    #[test]
    fn test_encoding_complete_grid_covers_each_column_once() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_FOUR))
            .unwrap()
            .first_solution()
            .map(|board| Sudoku::new(board).unwrap())
            .unwrap();

        let map = sudoku.encode();
        assert_eq!(map.rows(), 16);
        for column in 0..map.columns() {
            let hits = (0..map.rows()).filter(|&row| map.get(column, row)).count();
            assert_eq!(hits, 1, "column {column} covered {hits} times");
        }
    }

    #[test]
    fn test_classic_nine_has_known_unique_solution() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_NINE)).unwrap();
        let solutions = sudoku.solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0], Board::from(NINE_SOLVED));
        assert_completes(&sudoku, &solutions[0]);
    }

    #[test]
    fn test_forced_blanks_are_filled() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_FOUR)).unwrap();
        let solutions = sudoku.solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get(0, 2), 3);
        assert_eq!(solutions[0].get(3, 1), 3);
        assert_completes(&sudoku, &solutions[0]);
    }

    #[test]
    fn test_fully_given_grid_solves_to_itself() {
        let solved = Sudoku::new(Board::from(NINE_SOLVED)).unwrap();
        let solutions = solved.solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0], Board::from(NINE_SOLVED));
    }

    #[test]
    fn test_contradictory_grid_has_no_solution() {
        let mut cells = vec![vec![0; 9]; 9];
        cells[0][0] = 5;
        cells[0][7] = 5;
        let sudoku = Sudoku::new(Board::new(cells)).unwrap();
        assert_eq!(sudoku.solve(|_| SolverControl::Continue), 0);
        assert!(sudoku.first_solution().is_none());
    }

    #[test]
    fn test_empty_four_enumerates_all_completions() {
        let sudoku = Sudoku::new(Board::new(vec![vec![0; 4]; 4])).unwrap();
        let solutions = sudoku.solutions();

        // The 4x4 variant has exactly 288 valid grids.
        assert_eq!(solutions.len(), 288);
        for board in &solutions {
            assert_completes(&sudoku, board);
        }

        let distinct: std::collections::HashSet<Vec<Vec<usize>>> = solutions
            .into_iter()
            .map(std::convert::Into::into)
            .collect();
        assert_eq!(distinct.len(), 288);
    }

    #[test]
    fn test_stop_signal_reports_exactly_one() {
        let sudoku = Sudoku::new(Board::new(vec![vec![0; 4]; 4])).unwrap();
        let mut calls = 0;
        let emitted = sudoku.solve(|_| {
            calls += 1;
            SolverControl::Stop
        });
        assert_eq!((calls, emitted), (1, 1));
    }

    #[test]
    fn test_display_draws_box_rules() {
        let rendered = Board::from(EXAMPLE_FOUR).to_string();
        let expected = "\
+-----+-----+
| 1 2 | . 4 |
| 3 4 | 1 2 |
+-----+-----+
| 2 1 | 4 3 |
| 4 . | 2 1 |
+-----+-----+";
        assert_eq!(rendered, expected);
    }
}
