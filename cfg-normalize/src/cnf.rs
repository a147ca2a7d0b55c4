//! Conversion to Chomsky Normal Form.

use std::collections::BTreeMap;

use log::{debug, trace};

use cfg_grammar::{Cfg, CfgRule};
use cfg_history::SplitMap;
use cfg_symbol::Symbol;

use crate::NormalizeError;

/// One operand of a binary rule produced by the split.
#[derive(Clone, Copy)]
enum Operand {
    /// A variable of the input grammar.
    Sym(Symbol),
    /// The left-hand side of an earlier binary rule of the same split.
    Pair(usize),
    /// A wrapper variable standing for a terminal.
    Lift { var: Symbol, terminal: Symbol },
}

struct Pair {
    lhs: Symbol,
    rhs: [Operand; 2],
}

struct CnfConverter<'a> {
    source: &'a Cfg,
    result: Cfg,
    split: SplitMap,
    wrappers: BTreeMap<Symbol, Symbol>,
    last_name: usize,
}

/// Converts a grammar without nulling and unit rules into Chomsky Normal Form. The language
/// does not change.
///
/// A right-hand side longer than two symbols is split by repeatedly replacing its first two
/// symbols with a fresh variable. Terminals in binary rules are replaced with variables that
/// derive them, one per terminal. Fresh variables are named `X1`, `X2`, and so on, skipping
/// names that are already taken. Every rule maps to the rules it was split into, in pre-order
/// of the split. A rule that is already in normal form maps to itself.
pub fn to_cnf(cfg: &Cfg) -> Result<(Cfg, SplitMap), NormalizeError> {
    let start = cfg.start().ok_or(NormalizeError::MissingStart)?;
    if cfg.rules_for(start).next().is_none() {
        return Err(NormalizeError::NoStartRule { start });
    }
    for rule in cfg.rules() {
        if rule.is_nulling() {
            return Err(NormalizeError::NullingRule { lhs: rule.lhs });
        }
        if cfg.is_unit_rule(rule) {
            return Err(NormalizeError::UnitRule {
                lhs: rule.lhs,
                rhs: rule.rhs[0],
            });
        }
    }

    let mut converter = CnfConverter {
        source: cfg,
        result: cfg.empty_like(),
        split: SplitMap::new(),
        wrappers: BTreeMap::new(),
        last_name: 0,
    };
    for rule in cfg.rules() {
        converter.convert(rule);
    }
    debug!(
        "converted {} rules into {} rules in normal form",
        cfg.len(),
        converter.result.len()
    );
    Ok((converter.result, converter.split))
}

impl<'a> CnfConverter<'a> {
    fn convert(&mut self, rule: &CfgRule) {
        if self.source.is_cnf_rule(rule) {
            self.result.add_rule(rule.clone());
            self.split.insert(rule.clone(), vec![rule.clone()]);
            return;
        }
        let rhs = &rule.rhs[..];
        let last = rhs.len() - 1;
        let mut pairs: Vec<Pair> = Vec::with_capacity(last);
        let mut left = self.operand(rhs[0]);
        for &sym in &rhs[1..last] {
            let lhs = self.fresh_variable();
            let right = self.operand(sym);
            pairs.push(Pair {
                lhs,
                rhs: [left, right],
            });
            left = Operand::Pair(pairs.len() - 1);
        }
        let right = self.operand(rhs[last]);
        pairs.push(Pair {
            lhs: rule.lhs,
            rhs: [left, right],
        });

        let mut rules = vec![];
        let mut work = vec![Operand::Pair(pairs.len() - 1)];
        while let Some(operand) = work.pop() {
            match operand {
                Operand::Sym(_) => {}
                Operand::Pair(idx) => {
                    let pair = &pairs[idx];
                    let [l, r] = pair.rhs;
                    rules.push(CfgRule::new(pair.lhs, [symbol(&pairs, l), symbol(&pairs, r)]));
                    work.push(r);
                    work.push(l);
                }
                Operand::Lift { var, terminal } => rules.push(CfgRule::new(var, [terminal])),
            }
        }
        for new_rule in &rules {
            self.result.add_rule(new_rule.clone());
        }
        trace!(
            "`{}` split into {} rules",
            self.source.display_rule(rule),
            rules.len()
        );
        self.split.insert(rule.clone(), rules);
    }

    fn operand(&mut self, sym: Symbol) -> Operand {
        if self.source.is_terminal(sym) {
            let var = match self.wrappers.get(&sym) {
                Some(&var) => var,
                None => {
                    let var = self.fresh_variable();
                    self.wrappers.insert(sym, var);
                    var
                }
            };
            Operand::Lift { var, terminal: sym }
        } else {
            Operand::Sym(sym)
        }
    }

    fn fresh_variable(&mut self) -> Symbol {
        loop {
            self.last_name += 1;
            let name = format!("X{}", self.last_name);
            if !self.result.sym_source().is_name_taken(&name) {
                let sym = self.result.variable(&name);
                self.split.mark_introduced(sym);
                return sym;
            }
        }
    }
}

fn symbol(pairs: &[Pair], operand: Operand) -> Symbol {
    match operand {
        Operand::Sym(sym) => sym,
        Operand::Pair(idx) => pairs[idx].lhs,
        Operand::Lift { var, .. } => var,
    }
}
