use std::ops::{Deref, DerefMut};

use bit_matrix::BitMatrix;

use cfg_grammar::{Cfg, SymbolBitSet};
use cfg_symbol::{Symbol, SymbolSource};

/// A matrix that represents a relation `R(A, B)` between two symbols.
#[derive(Clone, Debug)]
pub struct SymbolBitMatrix {
    bit_matrix: BitMatrix,
}

/// A direct derivation matrix.
pub struct DirectDerivationMatrix(SymbolBitMatrix);
/// A reachability matrix.
pub struct ReachabilityMatrix(SymbolBitMatrix);

impl SymbolBitMatrix {
    fn new(num_syms: usize) -> Self {
        SymbolBitMatrix {
            bit_matrix: BitMatrix::new(num_syms, num_syms),
        }
    }

    fn set(&mut self, row: Symbol, col: Symbol, included: bool) {
        self.bit_matrix.set(row.usize(), col.usize(), included);
    }

    /// Returns the number of symbols this matrix relates.
    pub fn num_syms(&self) -> usize {
        self.bit_matrix.size().0
    }

    /// Creates an iterator over symbols which appear in the given row.
    pub fn iter_row_syms(&self, row: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        self.bit_matrix
            .iter_row(row.usize())
            .zip(SymbolSource::generate_fresh())
            .filter_map(|(present, sym)| if present { Some(sym) } else { None })
    }
}

impl Deref for SymbolBitMatrix {
    type Target = BitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.bit_matrix
    }
}

impl DerefMut for SymbolBitMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bit_matrix
    }
}

impl Deref for DirectDerivationMatrix {
    type Target = SymbolBitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DirectDerivationMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Deref for ReachabilityMatrix {
    type Target = SymbolBitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ReachabilityMatrix {
    /// A symbol is reachable from itself.
    pub fn reflexive(mut self) -> Self {
        self.0.reflexive_closure();
        self
    }

    /// Returns the set of symbols reachable from the given symbol.
    pub fn reachable_from(&self, sym: Symbol) -> SymbolBitSet {
        if sym.usize() >= self.num_syms() {
            return SymbolBitSet::new();
        }
        self.iter_row_syms(sym).collect()
    }
}

impl DirectDerivationMatrix {
    /// Returns the derivation matrix.
    pub fn reachability(mut self) -> ReachabilityMatrix {
        self.transitive_closure();
        ReachabilityMatrix(self.0)
    }
}

/// Extension traits for building matrices that represent relation between symbols,
/// `R(A, B)` where `A`: [`Symbol`], `B`: [`Symbol`].
pub trait CfgSymbolBitMatrixExt {
    /// Creates the empty matrix of size `|S|x|S|` where `S`: set of symbols.
    fn empty_matrix(&self) -> SymbolBitMatrix;
    /// Computes the direct derivation matrix.
    fn direct_derivation_matrix(&self) -> DirectDerivationMatrix;
    /// Computes the reachability matrix.
    fn reachability_matrix(&self) -> ReachabilityMatrix;
}

impl CfgSymbolBitMatrixExt for Cfg {
    fn empty_matrix(&self) -> SymbolBitMatrix {
        SymbolBitMatrix::new(self.num_syms())
    }

    fn direct_derivation_matrix(&self) -> DirectDerivationMatrix {
        let mut derivation = self.empty_matrix();

        for rule in self.rules() {
            for &sym in rule.rhs.iter() {
                derivation.set(rule.lhs, sym, true);
            }
        }

        DirectDerivationMatrix(derivation)
    }

    fn reachability_matrix(&self) -> ReachabilityMatrix {
        self.direct_derivation_matrix().reachability().reflexive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachability() {
        let mut cfg = Cfg::new();
        let [start, a, b, unreachable] = cfg.sym();
        let x = cfg.terminal("x");
        cfg.rule(start)
            .rhs([a])
            .rule(a)
            .rhs([b, x])
            .rule(unreachable)
            .rhs([start]);
        let reachable = cfg.reachability_matrix().reachable_from(start);
        assert_eq!(reachable.iter().collect::<Vec<_>>(), vec![start, a, b, x]);
        assert!(!reachable[unreachable]);
    }
}
