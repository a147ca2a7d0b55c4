use std::collections::BTreeMap;

use log::{debug, trace};

use cfg_grammar::{Cfg, CfgRule};
use cfg_symbol::Symbol;

use crate::chart::{Chart, Justification, Rejection, Span};
use crate::CykError;

/// A recognizer for a grammar in Chomsky Normal Form. Holds no state between recognitions,
/// so one recognizer may serve many threads at once.
#[derive(Clone, Debug)]
pub struct CykRecognizer {
    start: Symbol,
    /// For every terminal, the variables that derive it, in grammar order.
    terminal_rules: BTreeMap<Symbol, Vec<Symbol>>,
    /// Rules of the form `A ::= B C`, in grammar order.
    binary_rules: Vec<CfgRule>,
}

impl CykRecognizer {
    /// Indexes the rules of a grammar in Chomsky Normal Form.
    pub fn new(grammar: &Cfg) -> Result<Self, CykError> {
        let start = grammar.start().ok_or(CykError::MissingStart)?;
        let mut terminal_rules: BTreeMap<Symbol, Vec<Symbol>> = BTreeMap::new();
        let mut binary_rules = vec![];
        for rule in grammar.rules() {
            if !grammar.is_cnf_rule(rule) {
                return Err(CykError::NotCnf { rule: rule.clone() });
            }
            if rule.rhs.len() == 1 {
                terminal_rules.entry(rule.rhs[0]).or_default().push(rule.lhs);
            } else {
                binary_rules.push(rule.clone());
            }
        }
        Ok(CykRecognizer {
            start,
            terminal_rules,
            binary_rules,
        })
    }

    /// Returns the start symbol.
    pub fn start(&self) -> Symbol {
        self.start
    }

    /// Fills a chart for the input. The empty input is not supported.
    pub fn recognize(&self, input: &[Symbol]) -> Result<Chart, CykError> {
        if input.is_empty() {
            return Err(CykError::EmptyInput);
        }
        let len = input.len();
        let mut chart = Chart::new(input, self.start);

        for (position, terminal) in input.iter().enumerate() {
            let vars = match self.terminal_rules.get(terminal) {
                Some(vars) => vars,
                None => {
                    debug!("rejected: no rule derives the symbol at {}", position);
                    chart.reject(Rejection::UnrecognizedSymbol { position });
                    return Ok(chart);
                }
            };
            let cell = chart.cell_mut(Span::new(position, position));
            for &var in vars {
                cell.entries.entry(var).or_default();
            }
        }

        for span_len in 2..=len {
            for x in 0..=len - span_len {
                let y = x + span_len - 1;
                for k in x..y {
                    let left = Span::new(x, k);
                    let right = Span::new(k + 1, y);
                    let found: Vec<Justification> = self
                        .binary_rules
                        .iter()
                        .filter(|rule| {
                            chart.cell(left).map_or(false, |cell| cell.contains(rule.rhs[0]))
                                && chart
                                    .cell(right)
                                    .map_or(false, |cell| cell.contains(rule.rhs[1]))
                        })
                        .map(|rule| Justification {
                            rule: rule.clone(),
                            left,
                            right,
                        })
                        .collect();
                    let cell = chart.cell_mut(Span::new(x, y));
                    for justification in found {
                        cell.entries
                            .entry(justification.rule.lhs)
                            .or_default()
                            .push(justification);
                    }
                }
                trace!(
                    "span {}..={} holds {} variables",
                    x,
                    y,
                    chart.cell(Span::new(x, y)).map_or(0, |cell| cell.len())
                );
            }
        }

        let accepted = chart
            .cell(chart.whole())
            .map_or(false, |cell| cell.contains(self.start));
        if !accepted {
            chart.reject(Rejection::NotDerived);
        }
        debug!(
            "{} input of {} symbols",
            if accepted { "accepted" } else { "rejected" },
            len
        );
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shareable() {
        assert_send_sync::<CykRecognizer>();
        assert_send_sync::<Chart>();
    }

    #[test]
    fn test_requires_cnf() {
        let mut cfg = Cfg::new();
        let [start, a] = cfg.sym();
        let x = cfg.terminal("x");
        cfg.rule(start).rhs([a]).rule(a).rhs([x]);
        assert_eq!(CykRecognizer::new(&cfg).err(), Some(CykError::MissingStart));
        cfg.set_start(start);
        assert_eq!(
            CykRecognizer::new(&cfg).err(),
            Some(CykError::NotCnf {
                rule: CfgRule::new(start, [a])
            })
        );
    }

    #[test]
    fn test_fail_fast() {
        let mut cfg = Cfg::new();
        let [start, a] = cfg.sym();
        let [x, y] = [cfg.terminal("x"), cfg.terminal("y")];
        cfg.rule(start).rhs([a, a]).rule(a).rhs([x]);
        cfg.set_start(start);
        let recognizer = CykRecognizer::new(&cfg).unwrap();
        let chart = recognizer.recognize(&[x, y, x]).unwrap();
        assert_eq!(
            chart.rejection(),
            Some(Rejection::UnrecognizedSymbol { position: 1 })
        );
        assert!(chart.cell(Span::new(0, 0)).unwrap().contains(a));
        assert!(chart.cell(Span::new(2, 2)).unwrap().is_empty());
        assert_eq!(chart.trace(), None);
        assert_eq!(recognizer.recognize(&[]).err(), Some(CykError::EmptyInput));
    }

    #[test]
    fn test_tie_break() {
        // S ::= S S | x, over `x x x`: the whole span splits at 0 or at 1.
        let mut cfg = Cfg::new();
        let start = cfg.variable("S");
        let x = cfg.terminal("x");
        cfg.rule(start).rhs([start, start]).rhs([x]);
        cfg.set_start(start);
        let recognizer = CykRecognizer::new(&cfg).unwrap();
        let chart = recognizer.recognize(&[x, x, x]).unwrap();
        assert!(chart.accepted());
        let whole = chart.justifications(Span::new(0, 2), start);
        assert_eq!(whole.len(), 2);
        assert_eq!(whole[0].right, Span::new(1, 2));
        assert_eq!(whole[1].right, Span::new(2, 2));

        let binary = CfgRule::new(start, [start, start]);
        let terminal = CfgRule::new(start, [x]);
        assert_eq!(
            chart.trace(),
            Some(vec![
                binary.clone(),
                terminal.clone(),
                binary,
                terminal.clone(),
                terminal,
            ])
        );
    }
}
