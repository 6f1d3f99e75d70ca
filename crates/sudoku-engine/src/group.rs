//! Cell groups: sets of cells under a mutual-exclusion constraint.
//!
//! One group per row, column, and block at grid construction; propagation may
//! split groups into sub-groups, shrink them as solved cells are pruned, and
//! discard them once empty. A group holds arena indices into the grid's cell
//! vector plus a cached taken-symbol set; cross-group operations (subgroup
//! removal) are orchestrated by the grid, which owns all groups.

use std::collections::BTreeMap;

use crate::alphabet::SymbolSet;
use crate::cell::{Cell, CellId};
use crate::error::Result;

/// A set of cells in which no two may share an assigned symbol.
#[derive(Debug, Clone)]
pub struct CellGroup {
    cells: Vec<CellId>,
    taken: SymbolSet,
}

impl CellGroup {
    pub fn new(cells: Vec<CellId>) -> Self {
        Self {
            cells,
            taken: SymbolSet::empty(),
        }
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains(&id)
    }

    /// Cached union of member symbols. Fresh after the last
    /// `recompute_taken` pass.
    pub fn taken(&self) -> SymbolSet {
        self.taken
    }

    /// Phase one of the constraint refresh: rebuild the taken-symbol cache.
    pub fn recompute_taken(&mut self, cells: &[Cell]) {
        let mut taken = SymbolSet::empty();
        for &id in &self.cells {
            if let Some(symbol) = cells[id].symbol() {
                taken.insert(symbol);
            }
        }
        self.taken = taken;
    }

    /// True iff no two member cells hold the same non-empty symbol.
    pub fn is_valid(&self, cells: &[Cell]) -> bool {
        let mut seen = SymbolSet::empty();
        for &id in &self.cells {
            if let Some(symbol) = cells[id].symbol() {
                if seen.contains(symbol) {
                    return false;
                }
                seen.insert(symbol);
            }
        }
        true
    }

    /// Partition empty member cells by their exact possible-symbol set.
    /// Used to detect splittable subgroups.
    pub fn possible_sets_to_cells(&self, cells: &[Cell]) -> BTreeMap<SymbolSet, Vec<CellId>> {
        let mut mapping: BTreeMap<SymbolSet, Vec<CellId>> = BTreeMap::new();
        for &id in &self.cells {
            if cells[id].is_empty() {
                mapping.entry(cells[id].possible()).or_default().push(id);
            }
        }
        mapping
    }

    /// For each symbol, the empty member cells where it is still legal.
    /// Used to detect symbols confined to a single cell or a sub-region.
    pub fn symbol_to_possible_cells(&self, cells: &[Cell]) -> BTreeMap<u8, Vec<CellId>> {
        let mut mapping: BTreeMap<u8, Vec<CellId>> = BTreeMap::new();
        for &id in &self.cells {
            if cells[id].is_empty() {
                for symbol in cells[id].possible().iter() {
                    mapping.entry(symbol).or_default().push(id);
                }
            }
        }
        mapping
    }

    /// Drop the given cells from this group without further bookkeeping.
    pub fn remove_cells(&mut self, removed: &[CellId]) {
        self.cells.retain(|id| !removed.contains(id));
    }

    /// Narrow every member cell's alphabet by `symbols`.
    pub fn exclude_symbols(&self, symbols: SymbolSet, cells: &mut [Cell]) -> Result<()> {
        for &id in &self.cells {
            let narrowed = cells[id].alphabet().difference(symbols);
            cells[id].reset_alphabet(narrowed)?;
        }
        Ok(())
    }

    /// Detach cells with committed symbols: they no longer constrain
    /// propagation once fixed, but their symbols are permanently excluded
    /// from the remaining members' alphabets.
    ///
    /// Returns whether any cell was removed.
    pub fn remove_assigned_cells(&mut self, cells: &mut [Cell]) -> Result<bool> {
        let mut assigned_symbols = SymbolSet::empty();
        for &id in &self.cells {
            if let Some(symbol) = cells[id].symbol() {
                assigned_symbols.insert(symbol);
            }
        }
        let before = self.cells.len();
        self.cells.retain(|&id| cells[id].is_empty());
        if self.cells.len() == before {
            return Ok(false);
        }
        self.exclude_symbols(assigned_symbols, cells)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn row_of_cells(alphabet: &Alphabet, n: usize) -> (Vec<Cell>, CellGroup) {
        let cells: Vec<Cell> = (0..n)
            .map(|col| Cell::new(0, col, alphabet.full_set()))
            .collect();
        let group = CellGroup::new((0..n).collect());
        (cells, group)
    }

    fn alphabet10() -> Alphabet {
        Alphabet::new("0123456789", 10).unwrap()
    }

    #[test]
    fn test_group_of_empty_cells_is_valid() {
        let (cells, group) = row_of_cells(&alphabet10(), 10);
        assert!(group.is_valid(&cells));
        assert!(group.taken().is_empty());
    }

    #[test]
    fn test_group_partially_filled_is_valid() {
        let (mut cells, mut group) = row_of_cells(&alphabet10(), 10);
        cells[0].assign(0, '0').unwrap();
        cells[1].assign(1, '1').unwrap();
        group.recompute_taken(&cells);
        assert!(group.is_valid(&cells));
        assert_eq!(group.taken().len(), 2);
    }

    #[test]
    fn test_group_with_duplicate_symbol_is_invalid() {
        let (mut cells, group) = row_of_cells(&alphabet10(), 10);
        cells[0].force_symbol(7);
        cells[1].force_symbol(7);
        assert!(!group.is_valid(&cells));
    }

    #[test]
    fn test_fully_assigned_group_takes_all_symbols() {
        let (mut cells, mut group) = row_of_cells(&alphabet10(), 10);
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.force_symbol(i as u8);
        }
        group.recompute_taken(&cells);
        assert_eq!(group.taken().len(), 10);
    }

    #[test]
    fn test_possible_sets_partition() {
        let alphabet = Alphabet::new("1234", 4).unwrap();
        let (mut cells, group) = row_of_cells(&alphabet, 4);
        let mut pair = SymbolSet::empty();
        pair.insert(0);
        pair.insert(1);
        cells[0].reset_alphabet(pair).unwrap();
        cells[1].reset_alphabet(pair).unwrap();

        let mapping = group.possible_sets_to_cells(&cells);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&pair].len(), 2);
        assert_eq!(mapping[&alphabet.full_set()].len(), 2);
    }

    #[test]
    fn test_symbol_to_possible_cells() {
        let alphabet = Alphabet::new("1234", 4).unwrap();
        let (mut cells, group) = row_of_cells(&alphabet, 4);
        let mut only_first = cells[0].alphabet();
        only_first.remove(3);
        // Symbol 3 stays possible only in cell 0.
        for cell in cells.iter_mut().skip(1) {
            cell.reset_alphabet(only_first).unwrap();
        }

        let mapping = group.symbol_to_possible_cells(&cells);
        assert_eq!(mapping[&3], vec![0]);
        assert_eq!(mapping[&0].len(), 4);
    }

    #[test]
    fn test_remove_assigned_cells_prunes_and_narrows() {
        let (mut cells, mut group) = row_of_cells(&alphabet10(), 10);
        cells[2].assign(2, '2').unwrap();
        cells[4].assign(7, '7').unwrap();

        assert!(group.remove_assigned_cells(&mut cells).unwrap());
        assert_eq!(group.len(), 8);
        for &id in group.cells() {
            assert!(!cells[id].alphabet().contains(2));
            assert!(!cells[id].alphabet().contains(7));
        }
        // Second pass finds nothing left to prune.
        assert!(!group.remove_assigned_cells(&mut cells).unwrap());
    }
}
