//! Board alphabets and symbol sets.
//!
//! Symbols are single characters externally and `u8` indices into the board's
//! alphabet internally. Candidate bookkeeping runs on `SymbolSet`, a `u64`
//! bitmask over those indices, so set algebra is branch-free and sets can key
//! hash maps when partitioning cells by their exact possible symbols.

use crate::error::{Result, SudokuError};

/// Default alphabet used when no explicit alphabet is supplied.
///
/// Its length (62) is the hard ceiling on the board side in that case.
pub const DEFAULT_ALPHABET: &str = "1234567890ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// An ordered sequence of distinct symbols, one per row of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet for a board of side `side`.
    ///
    /// Fails with [`SudokuError::InvalidAlphabet`] if the symbol count does
    /// not match `side`, a symbol repeats, or `side` is zero.
    pub fn new(symbols: &str, side: usize) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if side == 0 {
            return Err(SudokuError::InvalidAlphabet(
                "board has no cells".to_string(),
            ));
        }
        if symbols.len() != side {
            return Err(SudokuError::InvalidAlphabet(format!(
                "length {} does not match board side {}",
                symbols.len(),
                side
            )));
        }
        if side > SymbolSet::CAPACITY {
            return Err(SudokuError::InvalidAlphabet(format!(
                "length {} exceeds the supported maximum {}",
                side,
                SymbolSet::CAPACITY
            )));
        }
        for (i, &symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(&symbol) {
                return Err(SudokuError::InvalidAlphabet(format!(
                    "symbol {:?} repeats",
                    symbol
                )));
            }
        }
        Ok(Self { symbols })
    }

    /// Number of symbols (equals the board side).
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The character for a symbol index.
    pub fn symbol(&self, index: u8) -> char {
        self.symbols[index as usize]
    }

    /// The index of a character, if it belongs to this alphabet.
    pub fn index_of(&self, symbol: char) -> Option<u8> {
        self.symbols.iter().position(|&s| s == symbol).map(|i| i as u8)
    }

    /// The set of all symbols in this alphabet.
    pub fn full_set(&self) -> SymbolSet {
        SymbolSet::full(self.symbols.len())
    }
}

/// A set of symbol indices, packed into a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SymbolSet(u64);

impl SymbolSet {
    /// Maximum number of distinct symbols a set can hold.
    pub const CAPACITY: usize = 64;

    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// The set of all indices below `n`.
    pub fn full(n: usize) -> Self {
        debug_assert!(n <= Self::CAPACITY);
        if n == Self::CAPACITY {
            Self(u64::MAX)
        } else {
            Self((1u64 << n) - 1)
        }
    }

    pub fn contains(&self, index: u8) -> bool {
        self.0 & (1u64 << index) != 0
    }

    pub fn insert(&mut self, index: u8) {
        self.0 |= 1u64 << index;
    }

    pub fn remove(&mut self, index: u8) {
        self.0 &= !(1u64 << index);
    }

    /// Number of symbols in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Set union.
    pub fn union(&self, other: SymbolSet) -> SymbolSet {
        SymbolSet(self.0 | other.0)
    }

    /// Set intersection.
    pub fn intersection(&self, other: SymbolSet) -> SymbolSet {
        SymbolSet(self.0 & other.0)
    }

    /// Symbols in `self` but not in `other`.
    pub fn difference(&self, other: SymbolSet) -> SymbolSet {
        SymbolSet(self.0 & !other.0)
    }

    pub fn is_subset(&self, other: SymbolSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// The only member, if the set is a singleton.
    pub fn single(&self) -> Option<u8> {
        if self.len() == 1 {
            Some(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Iterate over member indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let bits = self.0;
        (0..Self::CAPACITY as u8).filter(move |i| bits & (1u64 << i) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_rejects_length_mismatch() {
        assert!(matches!(
            Alphabet::new("1234", 9),
            Err(SudokuError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_alphabet_rejects_duplicates() {
        assert!(matches!(
            Alphabet::new("1231", 4),
            Err(SudokuError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_alphabet_rejects_zero_side() {
        assert!(matches!(
            Alphabet::new("", 0),
            Err(SudokuError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_alphabet_lookup_round_trip() {
        let alphabet = Alphabet::new("1234", 4).unwrap();
        for (i, symbol) in "1234".chars().enumerate() {
            assert_eq!(alphabet.index_of(symbol), Some(i as u8));
            assert_eq!(alphabet.symbol(i as u8), symbol);
        }
        assert_eq!(alphabet.index_of('A'), None);
    }

    #[test]
    fn test_default_alphabet_is_distinct() {
        let alphabet = Alphabet::new(DEFAULT_ALPHABET, 62).unwrap();
        assert_eq!(alphabet.len(), 62);
    }

    #[test]
    fn test_symbol_set_algebra() {
        let mut a = SymbolSet::empty();
        a.insert(0);
        a.insert(3);
        let mut b = SymbolSet::empty();
        b.insert(3);

        assert_eq!(a.len(), 2);
        assert!(b.is_subset(a));
        assert!(!a.is_subset(b));
        assert_eq!(a.difference(b).single(), Some(0));
        assert_eq!(a.union(b), a);
        assert_eq!(a.intersection(b), b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn test_symbol_set_full() {
        assert_eq!(SymbolSet::full(4).len(), 4);
        assert_eq!(SymbolSet::full(64).len(), 64);
        assert!(SymbolSet::full(62).contains(61));
        assert!(!SymbolSet::full(62).contains(62));
    }
}
