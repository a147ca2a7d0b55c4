#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use cfg::{Cfg, CfgRule, Symbol};

pub fn eq_rules<'a, 'b>(
    i: impl Iterator<Item = &'a CfgRule>,
    j: impl Iterator<Item = &'b CfgRule>,
) -> bool {
    let mut rules_i = i
        .map(|rule| (rule.lhs, rule.rhs.to_vec()))
        .collect::<Vec<_>>();
    let mut rules_j = j
        .map(|rule| (rule.lhs, rule.rhs.to_vec()))
        .collect::<Vec<_>>();

    rules_i.sort();
    rules_j.sort();

    if rules_i != rules_j {
        eprintln!("Left:");
        eprintln!("{:?}", rules_i);
        eprintln!("Right:");
        eprintln!("{:?}", rules_j);
    }

    rules_i == rules_j
}

pub fn assert_eq_rules<'a, 'b>(
    i: impl Iterator<Item = &'a CfgRule>,
    j: impl Iterator<Item = &'b CfgRule>,
) {
    assert!(eq_rules(i, j), "Rules expected to be equal");
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Looks up a symbol by its name.
pub fn sym(cfg: &Cfg, name: &str) -> Symbol {
    cfg.sym_source()
        .find(name)
        .unwrap_or_else(|| panic!("no symbol named {}", name))
}

/// Looks up a rule written in the loader's notation, such as `"S -> aSb"`.
pub fn rule(cfg: &Cfg, text: &str) -> CfgRule {
    let (lhs, rhs) = text.split_once("->").expect("rule needs an arrow");
    let lhs = sym(cfg, lhs.trim());
    let mut buf = [0; 4];
    let rhs: Vec<Symbol> = rhs
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != 'ε')
        .map(|ch| sym(cfg, ch.encode_utf8(&mut buf)))
        .collect();
    CfgRule::new(lhs, rhs)
}

pub fn tokens(cfg: &Cfg, input: &str) -> Vec<Symbol> {
    cfg.tokenize(input)
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .expect("every character names a terminal")
}

/// Every terminal string of length at most `max_len` that the grammar derives, found by
/// iterating the derivable strings of every variable up to a fixed point.
pub fn language(cfg: &Cfg, max_len: usize) -> BTreeSet<Vec<Symbol>> {
    let mut derived: BTreeMap<Symbol, BTreeSet<Vec<Symbol>>> = BTreeMap::new();
    let mut changed = true;
    while changed {
        changed = false;
        for rule in cfg.rules() {
            let mut partial: BTreeSet<Vec<Symbol>> = BTreeSet::new();
            partial.insert(vec![]);
            for &sym in rule.rhs.iter() {
                let options: Vec<Vec<Symbol>> = if cfg.is_terminal(sym) {
                    vec![vec![sym]]
                } else {
                    derived
                        .get(&sym)
                        .map(|strings| strings.iter().cloned().collect())
                        .unwrap_or_default()
                };
                let mut next = BTreeSet::new();
                for prefix in &partial {
                    for option in &options {
                        if prefix.len() + option.len() <= max_len {
                            let mut string = prefix.clone();
                            string.extend(option.iter().copied());
                            next.insert(string);
                        }
                    }
                }
                partial = next;
            }
            let strings = derived.entry(rule.lhs).or_default();
            for string in partial {
                changed |= strings.insert(string);
            }
        }
    }
    cfg.start()
        .and_then(|start| derived.remove(&start))
        .unwrap_or_default()
}

/// Every non-empty string of length at most `max_len` over the given terminals.
pub fn strings(terminals: &[Symbol], max_len: usize) -> Vec<Vec<Symbol>> {
    let mut result = vec![];
    let mut layer = vec![vec![]];
    for _ in 0..max_len {
        let mut next = vec![];
        for prefix in &layer {
            for &terminal in terminals {
                let mut string: Vec<Symbol> = prefix.clone();
                string.push(terminal);
                next.push(string);
            }
        }
        result.extend(next.iter().cloned());
        layer = next;
    }
    result
}

/// Applies the rules of a derivation to the leftmost variable, starting from the start
/// symbol. Returns the derived string, or `None` if a rule does not fit.
pub fn replay(cfg: &Cfg, derivation: &[CfgRule]) -> Option<Vec<Symbol>> {
    let mut form = vec![cfg.start()?];
    for rule in derivation {
        let position = form.iter().position(|&sym| !cfg.is_terminal(sym))?;
        if form[position] != rule.lhs {
            return None;
        }
        form.splice(position..position + 1, rule.rhs.iter().copied());
    }
    if form.iter().all(|&sym| cfg.is_terminal(sym)) {
        Some(form)
    } else {
        None
    }
}
