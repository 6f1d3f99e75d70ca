//! The working board: cell arena, constraint groups, and the propagation
//! fixed point (`solve_possible`).
//!
//! A grid owns all cells and groups for one puzzle attempt. Mutation happens
//! through `set` and through propagation; every individual assignment is
//! followed by a two-phase constraint refresh (all group taken caches first,
//! then every cell's possible set), so the derived state is never
//! order-dependent.

use std::fmt;

use log::trace;

use crate::alphabet::{Alphabet, SymbolSet};
use crate::cell::{Cell, CellId};
use crate::error::{Result, SudokuError};
use crate::group::CellGroup;

/// A board under construction or solving.
#[derive(Debug)]
pub struct Grid {
    block_width: usize,
    block_height: usize,
    alphabet: Alphabet,
    cells: Vec<Cell>,
    groups: Vec<CellGroup>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// The alphabet must hold exactly `block_width * block_height` distinct
    /// symbols, or construction fails with [`SudokuError::InvalidAlphabet`].
    pub fn new(block_width: usize, block_height: usize, alphabet: &str) -> Result<Self> {
        let side = block_width * block_height;
        let alphabet = Alphabet::new(alphabet, side)?;
        let full = alphabet.full_set();

        let mut cells = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                cells.push(Cell::new(row, col, full));
            }
        }

        let mut grid = Self {
            block_width,
            block_height,
            alphabet,
            cells,
            groups: Vec::new(),
        };
        grid.groups = grid.initial_groups();
        Ok(grid)
    }

    /// Reconstruct a grid from a flat row-major string, `' '` for empty.
    pub fn from_flat(
        block_width: usize,
        block_height: usize,
        alphabet: &str,
        data: &str,
    ) -> Result<Self> {
        let mut grid = Self::new(block_width, block_height, alphabet)?;
        let side = grid.side();
        let chars: Vec<char> = data.chars().collect();
        if chars.len() != side * side {
            return Err(SudokuError::InvalidBoardData {
                expected: side * side,
                actual: chars.len(),
            });
        }
        for (i, &symbol) in chars.iter().enumerate() {
            if symbol != ' ' {
                grid.set(i / side, i % side, symbol)?;
            }
        }
        Ok(grid)
    }

    /// One group per row, column, and block.
    fn initial_groups(&self) -> Vec<CellGroup> {
        let side = self.side();
        let mut groups = Vec::with_capacity(3 * side);

        for row in 0..side {
            groups.push(CellGroup::new((0..side).map(|col| row * side + col).collect()));
        }
        for col in 0..side {
            groups.push(CellGroup::new((0..side).map(|row| row * side + col).collect()));
        }
        for block_row in 0..self.block_rows() {
            let base_row = block_row * self.block_height;
            for block_col in 0..self.block_cols() {
                let base_col = block_col * self.block_width;
                let mut ids = Vec::with_capacity(side);
                for row in base_row..base_row + self.block_height {
                    for col in base_col..base_col + self.block_width {
                        ids.push(row * side + col);
                    }
                }
                groups.push(CellGroup::new(ids));
            }
        }
        groups
    }

    pub fn block_width(&self) -> usize {
        self.block_width
    }

    pub fn block_height(&self) -> usize {
        self.block_height
    }

    /// Side length; boards are square.
    pub fn side(&self) -> usize {
        self.block_width * self.block_height
    }

    pub fn block_rows(&self) -> usize {
        self.side() / self.block_height
    }

    pub fn block_cols(&self) -> usize {
        self.side() / self.block_width
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn cell_id(&self, row: usize, col: usize) -> CellId {
        row * self.side() + col
    }

    /// The committed symbol at a position, if any.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells[self.cell_id(row, col)]
            .symbol()
            .map(|index| self.alphabet.symbol(index))
    }

    /// Commit a symbol to a cell and refresh the constraint state.
    pub fn set(&mut self, row: usize, col: usize, symbol: char) -> Result<()> {
        let index = self
            .alphabet
            .index_of(symbol)
            .ok_or(SudokuError::SymbolNotPossible { row, col, symbol })?;
        let id = self.cell_id(row, col);
        self.cells[id].assign(index, symbol)?;
        self.refresh_constraints();
        Ok(())
    }

    /// The symbols currently legal for a cell, in alphabet order.
    pub fn possible_symbols(&self, row: usize, col: usize) -> Vec<char> {
        self.cells[self.cell_id(row, col)]
            .possible()
            .iter()
            .map(|index| self.alphabet.symbol(index))
            .collect()
    }

    pub fn num_possible_symbols(&self, row: usize, col: usize) -> usize {
        self.cells[self.cell_id(row, col)].possible().len()
    }

    /// Row-major positions of all unassigned cells.
    pub fn empty_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|cell| cell.is_empty())
            .map(|cell| (cell.row(), cell.col()))
            .collect()
    }

    /// True iff no live group holds a duplicated symbol.
    pub fn is_valid(&self) -> bool {
        self.groups.iter().all(|group| group.is_valid(&self.cells))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    pub fn is_final(&self) -> bool {
        self.is_full() && self.is_valid()
    }

    /// An independent grid carrying only this grid's committed symbols.
    /// Unassigned cells, alphabets, and groups restart from default state,
    /// so speculative propagation on the copy cannot corrupt the original.
    pub fn copy(&self) -> Grid {
        let side = self.side();
        let full = self.alphabet.full_set();
        let mut cells = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                cells.push(Cell::new(row, col, full));
            }
        }
        let mut grid = Grid {
            block_width: self.block_width,
            block_height: self.block_height,
            alphabet: self.alphabet.clone(),
            cells,
            groups: Vec::new(),
        };
        grid.groups = grid.initial_groups();
        for (id, cell) in self.cells.iter().enumerate() {
            if let Some(symbol) = cell.symbol() {
                grid.cells[id].force_symbol(symbol);
            }
        }
        grid.refresh_constraints();
        grid
    }

    /// Two-phase recompute of all derived constraint state: first every
    /// group's taken-symbol cache, then every cell's possible set (its
    /// alphabet minus the taken symbols of every group containing it).
    fn refresh_constraints(&mut self) {
        for group in &mut self.groups {
            group.recompute_taken(&self.cells);
        }
        let mut possibles: Vec<SymbolSet> =
            self.cells.iter().map(|cell| cell.alphabet()).collect();
        for group in &self.groups {
            for &id in group.cells() {
                possibles[id] = possibles[id].difference(group.taken());
            }
        }
        for (cell, possible) in self.cells.iter_mut().zip(possibles) {
            if cell.is_empty() {
                cell.set_possible(possible);
            } else {
                cell.set_possible(SymbolSet::empty());
            }
        }
    }

    /// Propagate deductions to a fixed point.
    ///
    /// Four rules sweep until none of them fires: naked singles, hidden
    /// singles (with subset pointing), group splitting, and assigned-cell
    /// pruning. Possible sets and groups only ever shrink, so the loop
    /// terminates. A cell with no possible symbols aborts the pass with
    /// [`SudokuError::NoPossibleSymbols`].
    pub fn solve_possible(&mut self) -> Result<()> {
        self.refresh_constraints();
        loop {
            let naked = self.fill_naked_singles()?;
            let hidden = self.fill_hidden_singles()?;
            let split = self.split_groups()?;
            let pruned = self.prune_assigned_cells()?;
            if !(naked || hidden || split || pruned) {
                return Ok(());
            }
        }
    }

    /// Rule 1: assign every empty cell with exactly one possible symbol.
    fn fill_naked_singles(&mut self) -> Result<bool> {
        let mut changed = false;
        for id in 0..self.cells.len() {
            if !self.cells[id].is_empty() {
                continue;
            }
            let possible = self.cells[id].possible();
            if let Some(symbol) = possible.single() {
                let display = self.alphabet.symbol(symbol);
                trace!(
                    "naked single {:?} at ({}, {})",
                    display,
                    self.cells[id].row(),
                    self.cells[id].col()
                );
                self.cells[id].assign(symbol, display)?;
                self.refresh_constraints();
                changed = true;
            } else if possible.is_empty() {
                return Err(SudokuError::NoPossibleSymbols {
                    row: self.cells[id].row(),
                    col: self.cells[id].col(),
                });
            }
        }
        Ok(changed)
    }

    /// Rule 4: per group, a symbol admissible in exactly one cell is
    /// assigned there; a symbol whose admissible cells all lie inside
    /// another group is eliminated from the rest of that other group.
    fn fill_hidden_singles(&mut self) -> Result<bool> {
        let mut changed = false;
        for gi in 0..self.groups.len() {
            // Re-derive the mapping after each assignment in this group;
            // assignments invalidate it.
            'group: loop {
                let mapping = self.groups[gi].symbol_to_possible_cells(&self.cells);
                for (symbol, ids) in &mapping {
                    if ids.len() == 1 {
                        let id = ids[0];
                        let display = self.alphabet.symbol(*symbol);
                        trace!(
                            "hidden single {:?} at ({}, {})",
                            display,
                            self.cells[id].row(),
                            self.cells[id].col()
                        );
                        self.cells[id].assign(*symbol, display)?;
                        self.refresh_constraints();
                        changed = true;
                        continue 'group;
                    }
                }
                // No more assignments here; check for subset pointing.
                for (symbol, ids) in &mapping {
                    if ids.len() < 2 {
                        continue;
                    }
                    for gj in 0..self.groups.len() {
                        if gj == gi || !ids.iter().all(|&id| self.groups[gj].contains(id)) {
                            continue;
                        }
                        let others: Vec<CellId> = self.groups[gj]
                            .cells()
                            .iter()
                            .copied()
                            .filter(|id| self.cells[*id].is_empty() && !ids.contains(id))
                            .collect();
                        if self.exclude_symbol_from_cells(&others, *symbol)? {
                            changed = true;
                        }
                    }
                }
                break;
            }
        }
        Ok(changed)
    }

    /// Rule 2: split off k cells of a group that share exactly k possible
    /// symbols into their own group, narrow the complement, and remove the
    /// new subgroup from every superset group. The group list is rebuilt
    /// after the sweep; nothing mutates the list being iterated.
    fn split_groups(&mut self) -> Result<bool> {
        let mut changed = false;
        let mut removed = vec![false; self.groups.len()];
        let mut new_groups: Vec<CellGroup> = Vec::new();

        for gi in 0..self.groups.len() {
            if removed[gi] {
                continue;
            }
            let mapping = self.groups[gi].possible_sets_to_cells(&self.cells);
            if mapping.len() <= 1 {
                continue;
            }
            let Some((possible, ids)) = mapping
                .into_iter()
                .find(|(possible, ids)| possible.len() == ids.len())
            else {
                continue;
            };

            trace!(
                "splitting a group of {} cells around {} shared symbols",
                self.groups[gi].len(),
                possible.len()
            );
            changed = true;
            removed[gi] = true;

            // The k cells become an independent sub-constraint over their
            // k shared symbols.
            for &id in &ids {
                self.cells[id].reset_alphabet(possible)?;
            }

            // The remaining empty cells keep everything but those symbols.
            let complement: Vec<CellId> = self.groups[gi]
                .cells()
                .iter()
                .copied()
                .filter(|id| self.cells[*id].is_empty() && !ids.contains(id))
                .collect();
            for &id in &complement {
                let narrowed = self.cells[id].possible().difference(possible);
                self.cells[id].reset_alphabet(narrowed)?;
            }

            // The subgroup's symbols are consumed inside it; any superset
            // group loses those cells and those symbols.
            for gj in 0..self.groups.len() {
                if gj == gi || removed[gj] {
                    continue;
                }
                if ids.iter().all(|&id| self.groups[gj].contains(id)) {
                    self.groups[gj].remove_cells(&ids);
                    let empties: Vec<CellId> = self.groups[gj]
                        .cells()
                        .iter()
                        .copied()
                        .filter(|id| self.cells[*id].is_empty())
                        .collect();
                    self.exclude_symbols_from_cells(&empties, possible)?;
                }
            }

            new_groups.push(CellGroup::new(ids));
            new_groups.push(CellGroup::new(complement));
        }

        if changed {
            let mut kept: Vec<CellGroup> = Vec::with_capacity(self.groups.len());
            for (gi, group) in self.groups.drain(..).enumerate() {
                if !removed[gi] {
                    kept.push(group);
                }
            }
            kept.extend(new_groups);
            kept.retain(|group| !group.is_empty());
            self.groups = kept;
            self.refresh_constraints();
        }
        Ok(changed)
    }

    /// Rule 3: solved cells stop constraining their groups; their symbols
    /// are burned out of the remaining members' alphabets.
    fn prune_assigned_cells(&mut self) -> Result<bool> {
        let mut changed = false;
        for gi in 0..self.groups.len() {
            if self.groups[gi].remove_assigned_cells(&mut self.cells)? {
                changed = true;
            }
        }
        if changed {
            self.groups.retain(|group| !group.is_empty());
            self.refresh_constraints();
        }
        Ok(changed)
    }

    fn exclude_symbol_from_cells(&mut self, ids: &[CellId], symbol: u8) -> Result<bool> {
        let mut single = SymbolSet::empty();
        single.insert(symbol);
        self.exclude_symbols_from_cells(ids, single)
    }

    fn exclude_symbols_from_cells(&mut self, ids: &[CellId], symbols: SymbolSet) -> Result<bool> {
        let mut changed = false;
        for &id in ids {
            let alphabet = self.cells[id].alphabet();
            let narrowed = alphabet.difference(symbols);
            if narrowed != alphabet {
                self.cells[id].reset_alphabet(narrowed)?;
                changed = true;
            }
        }
        if changed {
            self.refresh_constraints();
        }
        Ok(changed)
    }
}

impl fmt::Display for Grid {
    /// Flat row-major serialization, `' '` for unassigned cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            let symbol = cell
                .symbol()
                .map(|index| self.alphabet.symbol(index))
                .unwrap_or(' ');
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
