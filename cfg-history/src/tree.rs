//! Rebuilds the tree shape of a derivation given in pre-order.

use smallvec::SmallVec;

use cfg_grammar::CfgRule;
use cfg_symbol::Symbol;

use crate::traceback::TraceError;

/// A derivation tree. The root is the node at index 0.
pub(crate) struct DerivationTree<'r> {
    nodes: Vec<Node<'r>>,
}

pub(crate) struct Node<'r> {
    pub rule: &'r CfgRule,
    /// Nodes deriving the variables on the rule's RHS, in order.
    pub children: SmallVec<[usize; 2]>,
}

struct Open {
    node: usize,
    pending: SmallVec<[Symbol; 2]>,
    next: usize,
}

impl<'r> DerivationTree<'r> {
    /// Every rule must expand the leftmost variable not yet expanded, as in a leftmost
    /// derivation.
    pub fn parse(
        rules: &'r [CfgRule],
        is_terminal: impl Fn(Symbol) -> bool,
    ) -> Result<Self, TraceError> {
        let mut nodes: Vec<Node<'r>> = Vec::with_capacity(rules.len());
        let mut open: Vec<Open> = vec![];
        for (position, rule) in rules.iter().enumerate() {
            let idx = nodes.len();
            match open.last_mut() {
                Some(parent) => {
                    if parent.pending[parent.next] != rule.lhs {
                        return Err(TraceError::MalformedTrace { position });
                    }
                    parent.next += 1;
                    nodes[parent.node].children.push(idx);
                }
                None if idx != 0 => return Err(TraceError::MalformedTrace { position }),
                None => {}
            }
            nodes.push(Node {
                rule,
                children: SmallVec::new(),
            });
            let pending: SmallVec<[Symbol; 2]> = rule
                .rhs
                .iter()
                .copied()
                .filter(|&sym| !is_terminal(sym))
                .collect();
            if !pending.is_empty() {
                open.push(Open {
                    node: idx,
                    pending,
                    next: 0,
                });
            }
            while open
                .last()
                .map_or(false, |top| top.next == top.pending.len())
            {
                open.pop();
            }
        }
        if nodes.is_empty() || !open.is_empty() {
            return Err(TraceError::MalformedTrace {
                position: rules.len(),
            });
        }
        Ok(DerivationTree { nodes })
    }

    pub fn node(&self, idx: usize) -> &Node<'r> {
        &self.nodes[idx]
    }

    pub fn root(&self) -> usize {
        0
    }
}
