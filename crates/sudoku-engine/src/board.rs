//! Public board value types handed to external collaborators.
//!
//! A [`SimpleBoard`] is one grid (problem or solution) as a flat row-major
//! character buffer, `' '` for unknown cells. A [`Board`] pairs a problem
//! with its solution. Both are plain values: no constraint state, no
//! propagation, serde-serializable for storage.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SudokuError};

/// A single grid as flat data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBoard {
    block_width: usize,
    block_height: usize,
    data: Vec<char>,
}

impl SimpleBoard {
    /// Create a board from flat row-major data, or an all-empty board if
    /// `data` is `None`.
    ///
    /// Fails with [`SudokuError::InvalidBoardData`] if the data length is
    /// not `side²`.
    pub fn new(block_width: usize, block_height: usize, data: Option<&str>) -> Result<Self> {
        let side = block_width * block_height;
        let data: Vec<char> = match data {
            Some(data) => data.chars().collect(),
            None => vec![' '; side * side],
        };
        if data.len() != side * side {
            return Err(SudokuError::InvalidBoardData {
                expected: side * side,
                actual: data.len(),
            });
        }
        Ok(Self {
            block_width,
            block_height,
            data,
        })
    }

    pub fn block_width(&self) -> usize {
        self.block_width
    }

    pub fn block_height(&self) -> usize {
        self.block_height
    }

    pub fn rows(&self) -> usize {
        self.block_width * self.block_height
    }

    /// Boards are square.
    pub fn cols(&self) -> usize {
        self.rows()
    }

    pub fn block_rows(&self) -> usize {
        self.rows() / self.block_height
    }

    pub fn block_cols(&self) -> usize {
        self.cols() / self.block_width
    }

    fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }

    /// The character at a position, `' '` if unknown.
    pub fn get(&self, row: usize, col: usize) -> char {
        self.data[self.index_of(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: char) {
        let index = self.index_of(row, col);
        self.data[index] = value;
    }
}

impl Index<(usize, usize)> for SimpleBoard {
    type Output = char;

    fn index(&self, (row, col): (usize, usize)) -> &char {
        &self.data[self.index_of(row, col)]
    }
}

impl IndexMut<(usize, usize)> for SimpleBoard {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut char {
        let index = self.index_of(row, col);
        &mut self.data[index]
    }
}

impl fmt::Display for SimpleBoard {
    /// Canonical flat serialization: row-major, no separators, length side².
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &value in &self.data {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// A problem board paired with its solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    block_width: usize,
    block_height: usize,
    problem: SimpleBoard,
    solution: SimpleBoard,
}

impl Board {
    /// Pair a problem with its solution (the problem doubles as its own
    /// solution when `None` is given).
    ///
    /// Fails with [`SudokuError::DimensionMismatch`] if either grid
    /// disagrees with the declared block dimensions.
    pub fn new(
        block_width: usize,
        block_height: usize,
        problem: SimpleBoard,
        solution: Option<SimpleBoard>,
    ) -> Result<Self> {
        let solution = solution.unwrap_or_else(|| problem.clone());
        for grid in [&problem, &solution] {
            if grid.block_width() != block_width || grid.block_height() != block_height {
                return Err(SudokuError::DimensionMismatch);
            }
        }
        Ok(Self {
            block_width,
            block_height,
            problem,
            solution,
        })
    }

    /// Reconstruct a board from persisted flat strings.
    pub fn from_strings(
        block_width: usize,
        block_height: usize,
        problem: &str,
        solution: &str,
    ) -> Result<Self> {
        let problem = SimpleBoard::new(block_width, block_height, Some(problem))?;
        let solution = SimpleBoard::new(block_width, block_height, Some(solution))?;
        Self::new(block_width, block_height, problem, Some(solution))
    }

    pub fn block_width(&self) -> usize {
        self.block_width
    }

    pub fn block_height(&self) -> usize {
        self.block_height
    }

    pub fn rows(&self) -> usize {
        self.block_width * self.block_height
    }

    pub fn cols(&self) -> usize {
        self.rows()
    }

    pub fn problem(&self) -> &SimpleBoard {
        &self.problem
    }

    pub fn solution(&self) -> &SimpleBoard {
        &self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_all_spaces() {
        let board = SimpleBoard::new(2, 2, None).unwrap();
        assert_eq!(board.to_string(), " ".repeat(16));
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 4);
    }

    #[test]
    fn test_indexing_reads_and_writes() {
        let mut board = SimpleBoard::new(2, 2, Some("1234123412341234")).unwrap();
        assert_eq!(board[(0, 0)], '1');
        assert_eq!(board[(1, 3)], '4');
        board[(1, 3)] = ' ';
        assert_eq!(board.get(1, 3), ' ');
        board.set(1, 3, '2');
        assert_eq!(board[(1, 3)], '2');
    }

    #[test]
    fn test_flat_round_trip() {
        for data in ["1234123412341234", " ".repeat(16).as_str(), "12  3   4      1"] {
            let board = SimpleBoard::new(2, 2, Some(data)).unwrap();
            let rebuilt = SimpleBoard::new(2, 2, Some(&board.to_string())).unwrap();
            assert_eq!(rebuilt, board);
        }
    }

    #[test]
    fn test_wrong_data_length_is_rejected() {
        assert!(matches!(
            SimpleBoard::new(2, 2, Some("123")),
            Err(SudokuError::InvalidBoardData {
                expected: 16,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_board_defaults_solution_to_problem() {
        let problem = SimpleBoard::new(2, 2, Some("12  3   4      1")).unwrap();
        let board = Board::new(2, 2, problem.clone(), None).unwrap();
        assert_eq!(board.solution(), &problem);
    }

    #[test]
    fn test_board_rejects_dimension_mismatch() {
        let problem = SimpleBoard::new(2, 2, None).unwrap();
        let solution = SimpleBoard::new(1, 4, None).unwrap();
        assert_eq!(
            Board::new(2, 2, problem, Some(solution)),
            Err(SudokuError::DimensionMismatch)
        );
    }

    #[test]
    fn test_from_strings() {
        let board = Board::from_strings(2, 2, "12  3   4      1", "1234341221434321").unwrap();
        assert_eq!(board.problem()[(0, 1)], '2');
        assert_eq!(board.solution()[(3, 3)], '1');
    }

    #[test]
    fn test_serde_round_trip() {
        let board = Board::from_strings(2, 2, "12  3   4      1", "1234341221434321").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
