//! A single grid cell.
//!
//! Cells live in an arena owned by the grid and are addressed by [`CellId`];
//! group membership is recorded on the groups, not the cells. The `possible`
//! set is derived state, refreshed by the grid's two-phase recompute after
//! every assignment or group change.

use crate::alphabet::SymbolSet;
use crate::error::{Result, SudokuError};

/// Index of a cell in the grid's arena.
pub type CellId = usize;

/// One board position: an optional committed symbol plus candidate state.
#[derive(Debug, Clone)]
pub struct Cell {
    row: usize,
    col: usize,
    /// Symbols legal for this cell. Starts as the full board alphabet and
    /// only ever narrows (group splitting, assigned-cell pruning).
    alphabet: SymbolSet,
    symbol: Option<u8>,
    possible: SymbolSet,
}

impl Cell {
    pub fn new(row: usize, col: usize, alphabet: SymbolSet) -> Self {
        Self {
            row,
            col,
            alphabet,
            symbol: None,
            possible: alphabet,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn symbol(&self) -> Option<u8> {
        self.symbol
    }

    pub fn is_empty(&self) -> bool {
        self.symbol.is_none()
    }

    /// The current candidate set. May be stale mid-propagation; always fresh
    /// after `Grid::refresh_constraints` has run.
    pub fn possible(&self) -> SymbolSet {
        self.possible
    }

    pub fn alphabet(&self) -> SymbolSet {
        self.alphabet
    }

    /// Commit a symbol to this cell. `display` is the symbol's character,
    /// only used for error reporting.
    ///
    /// Re-assigning the symbol the cell already holds is a no-op; any other
    /// write to an occupied cell, or a symbol outside the current possible
    /// set, fails with [`SudokuError::SymbolNotPossible`].
    pub fn assign(&mut self, symbol: u8, display: char) -> Result<()> {
        if self.symbol == Some(symbol) {
            return Ok(());
        }
        if self.symbol.is_some() || !self.possible.contains(symbol) {
            return Err(SudokuError::SymbolNotPossible {
                row: self.row,
                col: self.col,
                symbol: display,
            });
        }
        self.symbol = Some(symbol);
        self.possible.remove(symbol);
        Ok(())
    }

    /// Narrow the cell's legal alphabet, used by group splitting and
    /// assigned-cell pruning.
    ///
    /// Fails with [`SudokuError::IllegalAlphabet`] if the new alphabet is not
    /// a subset of the current one or excludes an already-committed symbol.
    pub fn reset_alphabet(&mut self, new_alphabet: SymbolSet) -> Result<()> {
        if !new_alphabet.is_subset(self.alphabet) {
            return Err(SudokuError::IllegalAlphabet {
                row: self.row,
                col: self.col,
            });
        }
        if let Some(symbol) = self.symbol {
            if !new_alphabet.contains(symbol) {
                return Err(SudokuError::IllegalAlphabet {
                    row: self.row,
                    col: self.col,
                });
            }
        }
        self.alphabet = new_alphabet;
        self.possible = self.possible.intersection(new_alphabet);
        Ok(())
    }

    /// Overwrite the derived candidate set (two-phase recompute only).
    pub(crate) fn set_possible(&mut self, possible: SymbolSet) {
        self.possible = possible;
    }

    /// Force a symbol without candidate checks. Used when rebuilding a grid
    /// from another grid's committed symbols, which are known consistent.
    pub(crate) fn force_symbol(&mut self, symbol: u8) {
        self.symbol = Some(symbol);
        self.possible.remove(symbol);
    }
}
