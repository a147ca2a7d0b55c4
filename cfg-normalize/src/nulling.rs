//! Elimination of nulling rules, which have the form `A ::= ε`.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use cfg_grammar::{Cfg, CfgRule, SymbolBitSet};
use cfg_history::{Derivation, NulledSymbol, NullingExpansion, NullingMap};
use cfg_symbol::Symbol;

/// For every nullable variable, the first rule found to derive ε from it. Each witness only
/// mentions variables whose witnesses were found before.
struct Witnesses<'a> {
    rules: BTreeMap<Symbol, &'a CfgRule>,
}

impl<'a> Witnesses<'a> {
    fn new(cfg: &'a Cfg) -> Self {
        let mut rules = BTreeMap::new();
        for rule in cfg.rules().filter(|rule| rule.is_nulling()) {
            rules.entry(rule.lhs).or_insert(rule);
        }
        let mut changed = true;
        while changed {
            changed = false;
            for rule in cfg.rules() {
                if !rules.contains_key(&rule.lhs)
                    && rule.rhs.iter().all(|sym| rules.contains_key(sym))
                {
                    rules.insert(rule.lhs, rule);
                    changed = true;
                }
            }
        }
        Witnesses { rules }
    }

    fn nullable_set(&self) -> SymbolBitSet {
        self.rules.keys().copied().collect()
    }

    /// Writes a derivation of ε from the symbol, in pre-order.
    fn derive_empty(&self, sym: Symbol, out: &mut Derivation) {
        if let Some(&rule) = self.rules.get(&sym) {
            out.push(rule.clone());
            for &child in rule.rhs.iter() {
                self.derive_empty(child, out);
            }
        }
    }
}

/// Enumerates subsets of a fixed number of positions, in binary counting order, with the
/// first position as the lowest digit. The empty subset is skipped.
struct Subsets {
    digits: Vec<bool>,
}

impl Subsets {
    fn new(len: usize) -> Self {
        Subsets {
            digits: vec![false; len],
        }
    }

    fn advance(&mut self) -> Option<&[bool]> {
        for digit in self.digits.iter_mut() {
            if *digit {
                *digit = false;
            } else {
                *digit = true;
                return Some(&self.digits[..]);
            }
        }
        None
    }
}

/// Removes all nulling rules. Every rule with nullable symbols on its right-hand side is
/// extended with variants that delete any of their occurrences. The language does not change,
/// except that it loses the empty string.
///
/// Rules of the input are kept without a history entry. Among synthesized rules, the first
/// one generated wins. Rules that become unproductive are dropped.
pub fn eliminate_nulling(cfg: &Cfg) -> (Cfg, NullingMap) {
    let witnesses = Witnesses::new(cfg);
    let nullable = witnesses.nullable_set();
    let mut result = cfg.empty_like();
    let mut map = NullingMap::new();

    for rule in cfg.rules().filter(|rule| !rule.is_nulling()) {
        result.add_rule(rule.clone());
    }
    for rule in cfg.rules() {
        let positions: Vec<usize> = rule
            .rhs
            .iter()
            .enumerate()
            .filter(|&(_, &sym)| nullable[sym])
            .map(|(position, _)| position)
            .collect();
        let mut subsets = Subsets::new(positions.len());
        while let Some(deleted) = subsets.advance() {
            let nulled: Vec<usize> = positions
                .iter()
                .zip(deleted)
                .filter_map(|(&position, &is_deleted)| is_deleted.then_some(position))
                .collect();
            if nulled.len() == rule.rhs.len() {
                continue;
            }
            let rhs: Vec<Symbol> = rule
                .rhs
                .iter()
                .enumerate()
                .filter(|(position, _)| !nulled.contains(position))
                .map(|(_, &sym)| sym)
                .collect();
            let new_rule = CfgRule::new(rule.lhs, rhs);
            if !result.add_rule(new_rule.clone()) {
                continue;
            }
            trace!(
                "`{}` from `{}`",
                cfg.display_rule(&new_rule),
                cfg.display_rule(rule)
            );
            let nulled = nulled
                .into_iter()
                .map(|position| {
                    let mut derivation = vec![];
                    witnesses.derive_empty(rule.rhs[position], &mut derivation);
                    NulledSymbol {
                        position,
                        derivation,
                    }
                })
                .collect();
            map.insert(
                new_rule,
                NullingExpansion {
                    origin: rule.clone(),
                    nulled,
                },
            );
        }
    }

    // A variable whose only rules were nulling now has no rules.
    let productive = result.productive_symbols();
    result.retain(|rule| rule.rhs.iter().all(|&sym| productive[sym]));
    let kept: BTreeSet<&CfgRule> = result.rules().collect();
    map.retain(|rule, _| kept.contains(rule));

    debug!(
        "eliminated nulling rules: {} nullable symbols, {} rules synthesized, {} rules total",
        nullable.count(),
        map.len(),
        result.len()
    );
    (result, map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsets_order() {
        let mut subsets = Subsets::new(2);
        let mut all = vec![];
        while let Some(subset) = subsets.advance() {
            all.push(subset.to_vec());
        }
        assert_eq!(
            all,
            vec![vec![true, false], vec![false, true], vec![true, true]]
        );
        assert_eq!(Subsets::new(0).advance(), None);
    }

    #[test]
    fn test_chained_witness() {
        let mut cfg = Cfg::new();
        let [start, a, b] = cfg.sym();
        let x = cfg.terminal("x");
        cfg.rule(start)
            .rhs([x, a])
            .rule(a)
            .rhs([b, b])
            .rhs([x])
            .rule(b)
            .rhs([]);
        cfg.set_start(start);
        let (result, map) = eliminate_nulling(&cfg);
        assert!(result.rules().all(|rule| !rule.is_nulling()));
        let expansion = &map[&CfgRule::new(start, [x])];
        assert_eq!(expansion.origin, CfgRule::new(start, [x, a]));
        assert_eq!(
            expansion.nulled,
            vec![NulledSymbol {
                position: 1,
                derivation: vec![
                    CfgRule::new(a, [b, b]),
                    CfgRule::new(b, []),
                    CfgRule::new(b, []),
                ],
            }]
        );
        // `B` has no rules left, so `A ::= B B` and `A ::= B` are gone.
        assert!(!result.rules().any(|rule| rule.lhs == a && rule.rhs[0] == b));
    }
}
