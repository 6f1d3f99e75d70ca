//! Error types shared across the engine.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SudokuError>;

/// Everything that can go wrong while building, solving, or generating a board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SudokuError {
    /// An assignment was attempted with a symbol the cell cannot hold.
    #[error("symbol {symbol:?} is not possible at ({row}, {col})")]
    SymbolNotPossible { row: usize, col: usize, symbol: char },

    /// A cell ran out of legal symbols during propagation. This is the
    /// expected rollback signal for the generator, not a fatal condition.
    #[error("cell ({row}, {col}) has no possible symbols")]
    NoPossibleSymbols { row: usize, col: usize },

    /// The alphabet does not fit the board (wrong length, repeated symbols,
    /// or a degenerate zero-sided board).
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// A cell's alphabet was narrowed in a way that violates the
    /// subset/assigned-symbol invariants. Indicates an engine bug.
    #[error("illegal alphabet narrowing at ({row}, {col})")]
    IllegalAlphabet { row: usize, col: usize },

    /// No explicit alphabet was given and the board side exceeds the
    /// default alphabet length.
    #[error("board side {side} exceeds the default alphabet length {max}")]
    SideOutOfRange { side: usize, max: usize },

    /// A board and its constituent grids disagree on block dimensions.
    #[error("dimension mismatch between board and its grids")]
    DimensionMismatch,

    /// A flat board string has the wrong length for the declared dimensions.
    #[error("board data has length {actual}, expected {expected}")]
    InvalidBoardData { expected: usize, actual: usize },
}
