//! Elimination of unit rules, which have the form `A ::= B`.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};

use cfg_grammar::{Cfg, CfgRule, SymbolBitSet};
use cfg_history::UnitMap;
use cfg_symbol::Symbol;

/// Removes all unit rules. For every variable `A` that derives `B` through unit rules, and
/// every other rule `B ::= γ`, the rule `A ::= γ` is added. The language does not change.
///
/// Chains are found breadth-first, following unit rules in grammar order, so every
/// synthesized rule is explained by a shortest chain. Rules of the input are kept without a
/// history entry.
pub fn eliminate_units(cfg: &Cfg) -> (Cfg, UnitMap) {
    let mut result = cfg.empty_like();
    let mut map = UnitMap::new();
    for rule in cfg.rules().filter(|rule| !cfg.is_unit_rule(rule)) {
        result.add_rule(rule.clone());
    }

    for lhs in cfg.variables() {
        let mut via: BTreeMap<Symbol, &CfgRule> = BTreeMap::new();
        let mut visited = SymbolBitSet::new();
        visited.set(lhs, true);
        let mut queue = VecDeque::from([lhs]);
        let mut order = vec![];
        while let Some(sym) = queue.pop_front() {
            for rule in cfg.rules_for(sym).filter(|rule| cfg.is_unit_rule(rule)) {
                let target = rule.rhs[0];
                if !visited[target] {
                    visited.set(target, true);
                    via.insert(target, rule);
                    queue.push_back(target);
                    order.push(target);
                }
            }
        }

        for target in order {
            let mut chain = vec![];
            let mut sym = target;
            while let Some(&rule) = via.get(&sym) {
                chain.push(rule.clone());
                sym = rule.lhs;
            }
            chain.reverse();
            for rule in cfg
                .rules_for(target)
                .filter(|rule| !cfg.is_unit_rule(rule))
            {
                let new_rule = CfgRule::new(lhs, &rule.rhs[..]);
                if result.add_rule(new_rule.clone()) {
                    trace!(
                        "`{}` through a chain of {} unit rules",
                        cfg.display_rule(&new_rule),
                        chain.len()
                    );
                    let mut steps = chain.clone();
                    steps.push(rule.clone());
                    map.insert(new_rule, steps);
                }
            }
        }
    }

    debug!(
        "eliminated unit rules: {} rules synthesized, {} rules total",
        map.len(),
        result.len()
    );
    (result, map)
}
