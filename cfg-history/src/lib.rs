//! Histories of grammar rules. Every normalization stage that rewrites rules records how each
//! rewritten rule relates to the rules of the stage before it. The records are only read in
//! reverse, to turn a derivation in the normalized grammar into a derivation in the grammar as
//! it was written.

#![deny(unsafe_code)]

use std::collections::BTreeMap;

use cfg_grammar::{CfgRule, SymbolBitSet};
use cfg_symbol::Symbol;

pub mod traceback;
mod tree;

pub use crate::traceback::{DerivationTracer, TraceError, TracePolicy};

/// A derivation, as a list of rules in pre-order: a node's own rule precedes the rules of its
/// left child, which precede the rules of its right child.
pub type Derivation = Vec<CfgRule>;

/// For every rule synthesized by nulling rule elimination, the expansion that justifies it.
pub type NullingMap = BTreeMap<CfgRule, NullingExpansion>;

/// For every rule synthesized by unit rule elimination, the chain of rules
/// `[A ::= B1, B1 ::= B2, …, Bk ::= γ]` it stands for.
pub type UnitMap = BTreeMap<CfgRule, Vec<CfgRule>>;

/// Records how a rule `A ::= α'` was obtained by deleting nullable symbols from `A ::= α`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NullingExpansion {
    /// The rule `A ::= α`, before deletion.
    pub origin: CfgRule,
    /// Deleted occurrences, ordered by position.
    pub nulled: Vec<NulledSymbol>,
}

/// One deleted occurrence of a nullable symbol.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NulledSymbol {
    /// Position on the RHS of the origin rule.
    pub position: usize,
    /// A derivation of the empty string from the deleted symbol, in pre-order.
    pub derivation: Derivation,
}

impl NullingExpansion {
    /// Returns the origin rule, followed by the ε-derivations of the deleted symbols.
    pub fn rules(&self) -> Vec<CfgRule> {
        let mut result = vec![self.origin.clone()];
        for nulled in &self.nulled {
            result.extend(nulled.derivation.iter().cloned());
        }
        result
    }
}

/// For every rule before conversion to Chomsky Normal Form, the rules it was split into.
#[derive(Clone, Debug, Default)]
pub struct SplitMap {
    splits: BTreeMap<CfgRule, Vec<CfgRule>>,
    introduced: SymbolBitSet,
}

impl SplitMap {
    /// Creates an empty split map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the rules a rule was split into, in pre-order of the split.
    pub fn insert(&mut self, rule: CfgRule, split: Vec<CfgRule>) {
        self.splits.insert(rule, split);
    }

    /// Records a variable that was introduced by the conversion.
    pub fn mark_introduced(&mut self, sym: Symbol) {
        self.introduced.set(sym, true);
    }

    /// Checks whether the variable was introduced by the conversion.
    pub fn is_introduced(&self, sym: Symbol) -> bool {
        self.introduced[sym]
    }

    /// Returns the rules the given rule was split into.
    pub fn get(&self, rule: &CfgRule) -> Option<&[CfgRule]> {
        self.splits.get(rule).map(|split| &split[..])
    }

    /// Iterates over rules and their splits.
    pub fn iter(&self) -> impl Iterator<Item = (&CfgRule, &[CfgRule])> {
        self.splits.iter().map(|(rule, split)| (rule, &split[..]))
    }

    /// Returns the number of split rules.
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    /// Checks whether no rule was split.
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// Checks whether every rule maps to itself alone.
    pub fn is_identity(&self) -> bool {
        self.splits
            .iter()
            .all(|(rule, split)| split.len() == 1 && &split[0] == rule)
    }
}

/// The histories of all normalization stages. A stage that changed nothing leaves no history.
#[derive(Clone, Debug, Default)]
pub struct History {
    nulling: Option<NullingMap>,
    unit: Option<UnitMap>,
    split: Option<SplitMap>,
}

impl History {
    /// Creates an empty history, as left by a grammar that needed no normalization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the history of nulling rule elimination. An empty map is not recorded.
    pub fn set_nulling(&mut self, nulling: NullingMap) {
        self.nulling = Some(nulling).filter(|map| !map.is_empty());
    }

    /// Assigns the history of unit rule elimination. An empty map is not recorded.
    pub fn set_unit(&mut self, unit: UnitMap) {
        self.unit = Some(unit).filter(|map| !map.is_empty());
    }

    /// Assigns the history of conversion to Chomsky Normal Form. A map that only maps rules to
    /// themselves is not recorded.
    pub fn set_split(&mut self, split: SplitMap) {
        self.split = Some(split).filter(|map| !map.is_identity());
    }

    /// Returns the history of nulling rule elimination, if it changed the grammar.
    pub fn nulling(&self) -> Option<&NullingMap> {
        self.nulling.as_ref()
    }

    /// Returns the history of unit rule elimination, if it changed the grammar.
    pub fn unit(&self) -> Option<&UnitMap> {
        self.unit.as_ref()
    }

    /// Returns the history of conversion to Chomsky Normal Form, if it changed the grammar.
    pub fn split(&self) -> Option<&SplitMap> {
        self.split.as_ref()
    }

    /// Checks whether no stage left a history.
    pub fn is_empty(&self) -> bool {
        self.nulling.is_none() && self.unit.is_none() && self.split.is_none()
    }
}
