//! Sets of symbols, such as terminals or nullable symbols.

use std::{iter, ops};

use bit_vec::BitVec;

use crate::local_prelude::*;

/// A set of symbols in the form of a bit vector.
///
/// Symbols beyond the current length are treated as absent, and the set grows
/// on demand when such a symbol is inserted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        SymbolBitSet {
            bit_vec: BitVec::new(),
        }
    }

    /// Empties the set and sizes it for the given symbol source.
    pub fn reset(&mut self, symbol_source: &SymbolSource) {
        self.bit_vec = BitVec::from_elem(symbol_source.num_syms(), false);
    }

    /// Marks the left-hand sides of all rules of the form `A ::= ε`.
    pub fn nulling(&mut self, grammar: &Cfg) {
        if self.is_empty() {
            self.reset(grammar.sym_source());
        }
        for rule in grammar.rules() {
            if rule.rhs.is_empty() {
                self.set(rule.lhs, true);
            }
        }
    }

    /// Inserts or removes a symbol.
    pub fn set(&mut self, index: Symbol, elem: bool) {
        let i = index.usize();
        if i >= self.bit_vec.len() {
            if !elem {
                return;
            }
            self.bit_vec.grow(i + 1 - self.bit_vec.len(), false);
        }
        self.bit_vec.set(i, elem);
    }

    /// Checks whether the symbol is present.
    pub fn contains(&self, index: Symbol) -> bool {
        self.bit_vec.get(index.usize()).unwrap_or(false)
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }

    /// Number of symbols the set covers, whether present or not.
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    /// Checks whether the set covers no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.bit_vec.is_empty()
    }

    /// Number of symbols present in the set.
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;
    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

impl FromIterator<Symbol> for SymbolBitSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut set = SymbolBitSet::new();
        for sym in iter {
            set.set(sym, true);
        }
        set
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.contains(index) {
            &TRUE
        } else {
            &FALSE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grows_on_insert() {
        let mut set = SymbolBitSet::new();
        let sym = Symbol::from(5usize);
        assert!(!set[sym]);
        set.set(sym, false);
        assert!(set.is_empty());
        set.set(sym, true);
        assert_eq!(set.len(), 6);
        assert!(set[sym]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![sym]);
    }
}
