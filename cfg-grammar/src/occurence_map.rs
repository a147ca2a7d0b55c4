use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::local_prelude::*;

type RuleIndex = usize;

/// Maps every symbol to the rules it occurs in.
pub struct OccurenceMap {
    occurences: BTreeMap<Symbol, Occurences>,
    empty_occurences: Occurences,
}

/// Indices of the rules a symbol occurs in, on the right-hand side.
#[derive(Clone, Default)]
pub struct Occurences {
    rhs: SmallVec<[RuleIndex; 4]>,
}

impl OccurenceMap {
    pub fn from_rules<'a>(rules: impl Iterator<Item = &'a CfgRule>) -> Self {
        let mut occurences: BTreeMap<Symbol, Occurences> = BTreeMap::new();
        for (i, rule) in rules.enumerate() {
            let mut rhs_syms = rule.rhs.to_vec();
            rhs_syms.sort();
            rhs_syms.dedup();
            for rhs_sym in rhs_syms {
                occurences.entry(rhs_sym).or_default().rhs.push(i);
            }
        }
        OccurenceMap {
            occurences,
            empty_occurences: Occurences::default(),
        }
    }

    pub fn get(&self, sym: Symbol) -> &Occurences {
        self.occurences.get(&sym).unwrap_or(&self.empty_occurences)
    }
}

impl Occurences {
    pub fn rhs(&self) -> &[RuleIndex] {
        &self.rhs[..]
    }
}
