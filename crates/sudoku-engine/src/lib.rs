//! Generalized Sudoku engine.
//!
//! Boards are N×N grids (`N = block_width * block_height`) over an arbitrary
//! symbol alphabet, partitioned into overlapping no-repeat groups (rows,
//! columns, blocks, and sub-groups discovered while solving). The engine
//! propagates forced deductions to a fixed point ([`Grid::solve_possible`])
//! and generates puzzles that reduce to a full solution by propagation alone
//! ([`generate`]), emitting them as flat-string [`Board`] values.
//!
//! ```
//! use sudoku_engine::Generator;
//!
//! let board = Generator::with_seed(42).generate(2, 2, None).unwrap();
//! assert_eq!(board.problem().to_string().len(), 16);
//! ```

mod alphabet;
mod board;
mod cell;
mod error;
mod generator;
mod grid;
mod group;

pub use alphabet::{Alphabet, SymbolSet, DEFAULT_ALPHABET};
pub use board::{Board, SimpleBoard};
pub use error::{Result, SudokuError};
pub use generator::{generate, Generator};
pub use grid::Grid;
