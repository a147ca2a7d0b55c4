//! Tracing a derivation in the normalized grammar back to the grammar as it was written.
//!
//! The stages are undone in reverse: first the split into Chomsky Normal Form, then unit rule
//! elimination, then nulling rule elimination.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;

use log::{debug, warn};

use cfg_grammar::{Cfg, CfgRule};

use crate::tree::DerivationTree;
use crate::{Derivation, History, NullingMap, SplitMap, UnitMap};

/// What to do with a rule whose provenance cannot be recovered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TracePolicy {
    /// Fail with [`TraceError::UnresolvedProvenance`].
    #[default]
    Strict,
    /// Log a warning and keep the rule as it is.
    BestEffort,
}

/// An error that occurs while tracing a derivation back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TraceError {
    /// A rule cannot be grouped back into a single rule of the grammar before normalization.
    UnresolvedProvenance {
        /// The rule that was left over.
        rule: CfgRule,
    },
    /// The trace is not a leftmost derivation in pre-order.
    MalformedTrace {
        /// Index of the first rule that does not fit.
        position: usize,
    },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TraceError::UnresolvedProvenance { rule } => {
                write!(f, "cannot trace rule {:?} back to the original grammar", rule)
            }
            TraceError::MalformedTrace { position } => {
                write!(f, "malformed derivation at rule {}", position)
            }
        }
    }
}

impl Error for TraceError {}

/// Translates derivations over a normalized grammar into derivations over the original one.
pub struct DerivationTracer<'a> {
    original: &'a Cfg,
    history: &'a History,
    policy: TracePolicy,
}

enum Region {
    Visit(usize),
    Real(usize),
}

enum Restore<'n> {
    Node(usize),
    Rules(&'n [CfgRule]),
}

impl<'a> DerivationTracer<'a> {
    /// Creates a tracer for derivations over the grammar that `history` leads to.
    pub fn new(original: &'a Cfg, history: &'a History) -> Self {
        DerivationTracer {
            original,
            history,
            policy: TracePolicy::default(),
        }
    }

    /// Sets the policy for unresolved rules.
    pub fn policy(mut self, policy: TracePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Traces a derivation in pre-order back through every stage that left a history.
    pub fn trace_back(&self, trace: &[CfgRule]) -> Result<Derivation, TraceError> {
        let mut derivation = match self.history.split() {
            Some(split) => self.collapse_splits(split, trace)?,
            None => trace.to_vec(),
        };
        if let Some(unit) = self.history.unit() {
            derivation = expand_units(unit, derivation);
        }
        if let Some(nulling) = self.history.nulling() {
            derivation = self.restore_nulled(nulling, &derivation)?;
        }
        let known: BTreeSet<&CfgRule> = self.original.rules().collect();
        for rule in &derivation {
            if !known.contains(rule) {
                self.unresolved(rule)?;
            }
        }
        debug!(
            "traced {} rules back to {} rules",
            trace.len(),
            derivation.len()
        );
        Ok(derivation)
    }

    fn unresolved(&self, rule: &CfgRule) -> Result<(), TraceError> {
        match self.policy {
            TracePolicy::Strict => Err(TraceError::UnresolvedProvenance { rule: rule.clone() }),
            TracePolicy::BestEffort => {
                warn!(
                    "keeping rule `{}` of unknown provenance",
                    self.original.display_rule(rule)
                );
                Ok(())
            }
        }
    }

    /// Groups the rules of each binarized subtree into the rule it was split from.
    fn collapse_splits(&self, split: &SplitMap, trace: &[CfgRule]) -> Result<Derivation, TraceError> {
        let tops: BTreeMap<&CfgRule, (&CfgRule, &[CfgRule])> = split
            .iter()
            .filter_map(|(origin, rules)| rules.first().map(|top| (top, (origin, rules))))
            .collect();
        let tree = DerivationTree::parse(trace, |sym| self.original.is_terminal(sym))?;
        let mut result = Vec::with_capacity(trace.len());
        let mut work = vec![tree.root()];
        while let Some(idx) = work.pop() {
            let node = tree.node(idx);
            if let Some(&(origin, rules)) = tops.get(node.rule) {
                let mut region = vec![];
                let mut real = vec![];
                let mut stack = vec![Region::Visit(idx)];
                while let Some(item) = stack.pop() {
                    match item {
                        Region::Visit(i) => {
                            let inner = tree.node(i);
                            region.push(inner.rule);
                            for &child in inner.children.iter().rev() {
                                if split.is_introduced(tree.node(child).rule.lhs) {
                                    stack.push(Region::Visit(child));
                                } else {
                                    stack.push(Region::Real(child));
                                }
                            }
                        }
                        Region::Real(i) => real.push(i),
                    }
                }
                if region.iter().copied().eq(rules.iter()) {
                    result.push(origin.clone());
                    work.extend(real.into_iter().rev());
                    continue;
                }
            }
            self.unresolved(node.rule)?;
            result.push(node.rule.clone());
            work.extend(node.children.iter().rev().copied());
        }
        Ok(result)
    }

    /// Puts the deleted ε-derivations back where they were deleted from.
    fn restore_nulled(
        &self,
        nulling: &NullingMap,
        derivation: &[CfgRule],
    ) -> Result<Derivation, TraceError> {
        let is_terminal = |sym| self.original.is_terminal(sym);
        let tree = DerivationTree::parse(derivation, is_terminal)?;
        let mut result = Vec::with_capacity(derivation.len());
        let mut work = vec![Restore::Node(tree.root())];
        while let Some(step) = work.pop() {
            let idx = match step {
                Restore::Rules(rules) => {
                    result.extend(rules.iter().cloned());
                    continue;
                }
                Restore::Node(idx) => idx,
            };
            let node = tree.node(idx);
            let expansion = match nulling.get(node.rule) {
                Some(expansion) => expansion,
                None => {
                    result.push(node.rule.clone());
                    work.extend(node.children.iter().rev().map(|&c| Restore::Node(c)));
                    continue;
                }
            };
            result.push(expansion.origin.clone());
            let mut steps = Vec::with_capacity(expansion.origin.rhs.len());
            let mut children = node.children.iter();
            let mut nulled = expansion.nulled.iter().peekable();
            for (position, &sym) in expansion.origin.rhs.iter().enumerate() {
                if let Some(deleted) = nulled.next_if(|n| n.position == position) {
                    steps.push(Restore::Rules(&deleted.derivation[..]));
                } else if !is_terminal(sym) {
                    let &child = children
                        .next()
                        .ok_or(TraceError::MalformedTrace { position: idx })?;
                    steps.push(Restore::Node(child));
                }
            }
            work.extend(steps.into_iter().rev());
        }
        Ok(result)
    }
}

/// Replaces every rule synthesized by unit rule elimination with its chain.
fn expand_units(unit: &UnitMap, derivation: Derivation) -> Derivation {
    let mut result = Vec::with_capacity(derivation.len());
    for rule in derivation {
        match unit.get(&rule) {
            Some(chain) => result.extend(chain.iter().cloned()),
            None => result.push(rule),
        }
    }
    result
}

/// Traces a derivation back with the given policy.
pub fn trace_back(
    original: &Cfg,
    history: &History,
    trace: &[CfgRule],
    policy: TracePolicy,
) -> Result<Derivation, TraceError> {
    DerivationTracer::new(original, history)
        .policy(policy)
        .trace_back(trace)
}
