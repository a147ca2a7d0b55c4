//! Definitions of the context-free grammar type and its rules.

use std::fmt::Write;
use std::sync::Arc;

use crate::error::GrammarError;
use crate::local_prelude::*;
use crate::occurence_map::OccurenceMap;
use crate::rule_builder::RuleBuilder;

/// Context-free grammar type.
///
/// Holds an ordered list of rules, the alphabet of terminal symbols and the start symbol.
/// Every symbol the source generated and which is not a terminal is a variable.
#[derive(Clone, Debug, Default)]
pub struct Cfg {
    /// The symbol source.
    sym_source: SymbolSource,
    /// The set of terminal symbols.
    terminals: SymbolBitSet,
    /// The array of rules.
    rules: Vec<CfgRule>,
    /// The start symbol.
    start: Option<Symbol>,
}

/// Standard grammar rule representation.
///
/// Equality is structural, which lets rules serve as keys of history maps.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CfgRule {
    /// The rule's left-hand side symbol.
    pub lhs: Symbol,
    /// The rule's right-hand side symbols.
    pub rhs: Arc<[Symbol]>,
}

/// Used only for [`fn rhs_closure`].
///
/// [`fn rhs_closure`]: Cfg::rhs_closure
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum RhsPropertyMode {
    /// If **all** symbols on the RHS have the property,
    /// the LHS has it too.
    All,
    /// If **any** symbol on the RHS has the property,
    /// the LHS has it too.
    Any,
}

impl Cfg {
    /// Creates an empty context-free grammar.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty grammar sharing this grammar's symbols, terminals and start symbol.
    ///
    /// Transformations build their output on top of this, so symbols keep their identity
    /// across stages.
    pub fn empty_like(&self) -> Self {
        Cfg {
            sym_source: self.sym_source.clone(),
            terminals: self.terminals.clone(),
            rules: vec![],
            start: self.start,
        }
    }

    /// Returns `N` generated anonymous variables.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        self.sym_source.sym()
    }

    /// Generates a new unique variable.
    ///
    /// If a name is given, it will be recorded within the symbol
    /// source.
    pub fn next_sym(&mut self, name: Option<&str>) -> Symbol {
        self.sym_source.next_sym(name)
    }

    /// Generates a new named variable.
    pub fn variable(&mut self, name: &str) -> Symbol {
        self.next_sym(Some(name))
    }

    /// Generates a new named terminal.
    pub fn terminal(&mut self, name: &str) -> Symbol {
        let result = self.sym_source.next_sym(Some(name));
        self.terminals.set(result, true);
        result
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Assigns the start symbol.
    pub fn set_start(&mut self, start: Symbol) {
        self.start = Some(start);
    }

    /// Returns the start symbol, if one was assigned.
    pub fn start(&self) -> Option<Symbol> {
        self.start
    }

    /// Checks whether the symbol is a terminal.
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.terminals[sym]
    }

    /// Returns the terminal alphabet.
    pub fn terminal_set(&self) -> &SymbolBitSet {
        &self.terminals
    }

    /// Iterates over all variables, used or not.
    pub fn variables(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.sym_source
            .symbols()
            .filter(move |&sym| !self.is_terminal(sym))
    }

    /// Returns an iterator over the list of grammar rules.
    pub fn rules(&self) -> impl Iterator<Item = &CfgRule> {
        self.rules.iter()
    }

    /// Returns an iterator over the rules with the given left-hand side.
    pub fn rules_for(&self, lhs: Symbol) -> impl Iterator<Item = &CfgRule> {
        self.rules.iter().filter(move |rule| rule.lhs == lhs)
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Checks whether the grammar has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks whether the grammar contains the given rule.
    pub fn contains(&self, rule: &CfgRule) -> bool {
        self.rules.contains(rule)
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self).rule(lhs)
    }

    /// Adds a rule to this grammar, unless a structurally equal rule is already present.
    ///
    /// Returns `true` if the rule was added.
    pub fn add_rule(&mut self, rule: CfgRule) -> bool {
        if self.rules.contains(&rule) {
            false
        } else {
            self.rules.push(rule);
            true
        }
    }

    /// Retains only the rules specified by the predicate.
    ///
    /// In other words, removes all the rules for which `f(&rule)`
    /// returns false.
    pub fn retain(&mut self, f: impl FnMut(&CfgRule) -> bool) {
        self.rules.retain(f);
    }

    /// Empties the grammar.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Checks the grammar invariants: the start symbol is a variable, no terminal appears
    /// on a left-hand side, and every symbol belongs to this grammar.
    pub fn validate(&self) -> Result<(), GrammarError> {
        let start = self.start.ok_or(GrammarError::MissingStart)?;
        let num_syms = self.num_syms();
        let check_known = |sym: Symbol| {
            if sym.usize() < num_syms {
                Ok(())
            } else {
                Err(GrammarError::UnknownSymbol { sym })
            }
        };
        check_known(start)?;
        if self.is_terminal(start) {
            return Err(GrammarError::TerminalStart { start });
        }
        for rule in self.rules() {
            check_known(rule.lhs)?;
            if self.is_terminal(rule.lhs) {
                return Err(GrammarError::TerminalLhs { lhs: rule.lhs });
            }
            for &sym in &rule.rhs[..] {
                check_known(sym)?;
            }
        }
        Ok(())
    }

    /// Checks whether the rule has the form `A ::= B`, where `B` is a variable.
    pub fn is_unit_rule(&self, rule: &CfgRule) -> bool {
        rule.rhs.len() == 1 && !self.is_terminal(rule.rhs[0])
    }

    /// Checks whether the rule is in Chomsky Normal Form: either `A ::= a` with a
    /// terminal `a`, or `A ::= B C` with two variables.
    pub fn is_cnf_rule(&self, rule: &CfgRule) -> bool {
        match &rule.rhs[..] {
            &[a] => self.is_terminal(a),
            &[b, c] => !self.is_terminal(b) && !self.is_terminal(c),
            _ => false,
        }
    }

    /// Checks whether every rule is in Chomsky Normal Form.
    ///
    /// Computed from the current rules on every call.
    pub fn is_cnf(&self) -> bool {
        self.rules().all(|rule| self.is_cnf_rule(rule))
    }

    /// Returns the set of symbols that derive the empty string.
    pub fn nullable_symbols(&self) -> SymbolBitSet {
        let mut nullable = SymbolBitSet::new();
        nullable.reset(self.sym_source());
        nullable.nulling(self);
        self.rhs_closure_for_all(&mut nullable);
        nullable
    }

    /// Returns the set of symbols that derive some string of terminals.
    /// Terminals are trivially productive.
    pub fn productive_symbols(&self) -> SymbolBitSet {
        let mut productive = self.terminals.clone();
        productive.nulling(self);
        self.rhs_closure_for_all(&mut productive);
        productive
    }

    /// If **all** symbols on the RHS have the property, the LHS has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    pub fn rhs_closure_for_all(&self, property: &mut SymbolBitSet) {
        self.rhs_closure(property, RhsPropertyMode::All)
    }

    /// If **any** or **all** symbols on the RHS have the property, the LHS
    /// has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    pub fn rhs_closure(&self, property: &mut SymbolBitSet, property_mode: RhsPropertyMode) {
        let mut work_stack: Vec<Symbol> = property.iter().collect();

        let occurence_map = OccurenceMap::from_rules(self.rules());

        while let Some(work_sym) = work_stack.pop() {
            for &rule_id in occurence_map.get(work_sym).rhs() {
                let rule = &self.rules[rule_id];
                let mut rhs_iter = rule.rhs.iter();
                let get_property = |&sym: &Symbol| property[sym];
                let rhs_satisfies_property = match property_mode {
                    RhsPropertyMode::All => rhs_iter.all(get_property),
                    RhsPropertyMode::Any => rhs_iter.any(get_property),
                };
                if !property[rule.lhs] && rhs_satisfies_property {
                    property.set(rule.lhs, true);
                    work_stack.push(rule.lhs);
                }
            }
        }
    }

    /// Maps every character of the input to the terminal named by that character.
    /// Characters that name no terminal map to `None`.
    pub fn tokenize(&self, input: &str) -> Vec<Option<Symbol>> {
        let mut buf = [0; 4];
        input
            .chars()
            .map(|ch| {
                let name: &str = ch.encode_utf8(&mut buf);
                self.terminals
                    .iter()
                    .find(|&sym| self.sym_source.name(sym) == Some(name))
            })
            .collect()
    }

    /// Formats a single rule, such as `S -> A B`. Symbols with one-character names
    /// are printed without separators, such as `S -> aSb`. The empty right-hand side
    /// is printed as `ε`.
    pub fn display_rule(&self, rule: &CfgRule) -> String {
        let names: Vec<String> = rule
            .rhs
            .iter()
            .map(|&sym| self.sym_source.name_of(sym))
            .collect();
        let rhs = if names.is_empty() {
            "ε".to_string()
        } else if names.iter().all(|name| name.chars().count() == 1) {
            names.concat()
        } else {
            names.join(" ")
        };
        format!("{} -> {}", self.sym_source.name_of(rule.lhs), rhs)
    }

    /// Formats the grammar to a `String`, one rule per line. The output looks like this:
    ///
    /// ```ignore
    /// S -> AD;
    /// A -> a;
    /// ```
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for rule in self.rules() {
            writeln!(&mut result, "{};", self.display_rule(rule)).expect("writing to String failed");
        }
        result
    }
}

impl CfgRule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: impl AsRef<[Symbol]>) -> Self {
        CfgRule {
            lhs,
            rhs: rhs.as_ref().into(),
        }
    }

    /// Checks whether the rule has the form `A ::= ε`.
    pub fn is_nulling(&self) -> bool {
        self.rhs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_closure() {
        let mut cfg = Cfg::new();
        let [start, a, b] = cfg.sym();
        let x = cfg.terminal("x");
        cfg.rule(start)
            .rhs([a, b])
            .rule(a)
            .rhs([])
            .rule(b)
            .rhs([a, a])
            .rhs([x]);
        let nullable = cfg.nullable_symbols();
        assert_eq!(nullable.iter().collect::<Vec<_>>(), vec![start, a, b]);
    }

    #[test]
    fn test_cnf_predicate() {
        let mut cfg = Cfg::new();
        let [start, a] = cfg.sym();
        let x = cfg.terminal("x");
        cfg.rule(start).rhs([a, a]).rule(a).rhs([x]);
        assert!(cfg.is_cnf());
        cfg.rule(a).rhs([x, a]);
        assert!(!cfg.is_cnf());
    }

    #[test]
    fn test_add_rule_dedup() {
        let mut cfg = Cfg::new();
        let [start] = cfg.sym();
        let x = cfg.terminal("x");
        assert!(cfg.add_rule(CfgRule::new(start, [x])));
        assert!(!cfg.add_rule(CfgRule::new(start, [x])));
        assert_eq!(cfg.len(), 1);
    }

    #[test]
    fn test_validate() {
        let mut cfg = Cfg::new();
        let [start] = cfg.sym();
        let x = cfg.terminal("x");
        assert_eq!(cfg.validate(), Err(GrammarError::MissingStart));
        cfg.set_start(x);
        assert_eq!(cfg.validate(), Err(GrammarError::TerminalStart { start: x }));
        cfg.set_start(start);
        cfg.rule(x).rhs([start]);
        assert_eq!(cfg.validate(), Err(GrammarError::TerminalLhs { lhs: x }));
    }

    #[test]
    fn test_validate_error_is_copy() {
        let mut cfg = Cfg::new();
        let [start] = cfg.sym();
        let x = cfg.terminal("x");
        cfg.set_start(start);
        cfg.rule(x).rhs([start]);
        let error = cfg.validate().unwrap_err();
        let copied = error;
        assert_eq!(error, copied);
        assert_eq!(
            copied.to_string(),
            format!("terminal {} appears on a left-hand side", x.usize())
        );
    }

    #[test]
    fn test_rhs_closure_any() {
        let mut cfg = Cfg::new();
        let [start, a, b, c] = cfg.sym();
        let x = cfg.terminal("x");
        cfg.rule(start).rhs([a, b]).rule(a).rhs([x]).rule(c).rhs([b]);
        let mut property = SymbolBitSet::new();
        property.reset(cfg.sym_source());
        property.set(x, true);
        cfg.rhs_closure(&mut property, RhsPropertyMode::Any);
        assert_eq!(property.iter().collect::<Vec<_>>(), vec![start, a, x]);
    }

    #[test]
    fn test_display_rule() {
        let mut cfg = Cfg::new();
        let start = cfg.variable("S");
        let a = cfg.terminal("a");
        let b = cfg.terminal("b");
        let long = cfg.variable("Long");
        assert_eq!(cfg.display_rule(&CfgRule::new(start, [a, start, b])), "S -> aSb");
        assert_eq!(cfg.display_rule(&CfgRule::new(start, [])), "S -> ε");
        assert_eq!(cfg.display_rule(&CfgRule::new(start, [long, a])), "S -> Long a");
        assert_eq!(cfg.tokenize("ab?"), vec![Some(a), Some(b), None]);
    }
}
