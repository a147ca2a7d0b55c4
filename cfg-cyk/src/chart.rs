//! The chart of a single recognition.

use std::collections::BTreeMap;

use cfg_grammar::CfgRule;
use cfg_symbol::Symbol;

/// A span of input positions. Both ends are inclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates the span from `start` to `end`, both inclusive.
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Returns the number of positions in the span.
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }
}

/// One reason for a variable to be in a chart cell: the binary rule, and the spans of its two
/// right-hand side variables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Justification {
    pub rule: CfgRule,
    pub left: Span,
    pub right: Span,
}

/// Why an input was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// No rule derives the terminal at this position. The rest of the chart was not filled.
    UnrecognizedSymbol { position: usize },
    /// The start symbol does not derive the whole input.
    NotDerived,
}

/// The variables that derive the input within one span, each with its justifications.
///
/// A variable in a cell of a single position has no justifications: it derives the terminal at
/// that position directly.
#[derive(Clone, Debug, Default)]
pub struct Cell {
    pub(crate) entries: BTreeMap<Symbol, Vec<Justification>>,
}

impl Cell {
    /// Checks whether the variable derives the span.
    pub fn contains(&self, var: Symbol) -> bool {
        self.entries.contains_key(&var)
    }

    /// Iterates over the variables that derive the span, in order of their symbols.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the justifications for the variable, in the order they were found.
    pub fn justifications(&self, var: Symbol) -> &[Justification] {
        self.entries
            .get(&var)
            .map(|justifications| &justifications[..])
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The table built by one recognition. Owns all its data and can outlive the recognizer.
#[derive(Clone, Debug)]
pub struct Chart {
    input: Vec<Symbol>,
    start: Symbol,
    /// Cells of spans `(i, j)` at index `i * len + j`.
    cells: Vec<Cell>,
    rejection: Option<Rejection>,
}

impl Chart {
    pub(crate) fn new(input: &[Symbol], start: Symbol) -> Self {
        let len = input.len();
        Chart {
            input: input.to_vec(),
            start,
            cells: vec![Cell::default(); len * len],
            rejection: None,
        }
    }

    fn index(&self, span: Span) -> Option<usize> {
        let len = self.input.len();
        if span.start <= span.end && span.end < len {
            Some(span.start * len + span.end)
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, span: Span) -> &mut Cell {
        let len = self.input.len();
        &mut self.cells[span.start * len + span.end]
    }

    pub(crate) fn reject(&mut self, rejection: Rejection) {
        self.rejection = Some(rejection);
    }

    /// Returns the input that was recognized.
    pub fn input(&self) -> &[Symbol] {
        &self.input[..]
    }

    /// Returns the number of input positions.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Returns the span of the whole input.
    pub fn whole(&self) -> Span {
        Span::new(0, self.input.len().saturating_sub(1))
    }

    /// Checks whether the start symbol derives the whole input.
    pub fn accepted(&self) -> bool {
        self.rejection.is_none()
    }

    /// Returns the reason for rejection, if the input was rejected.
    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    /// Returns the cell of a span, or `None` for a span outside of the input.
    pub fn cell(&self, span: Span) -> Option<&Cell> {
        self.index(span).map(|idx| &self.cells[idx])
    }

    /// Returns the justifications for a variable in a span.
    pub fn justifications(&self, span: Span, var: Symbol) -> &[Justification] {
        match self.cell(span) {
            Some(cell) => cell.justifications(var),
            None => &[],
        }
    }

    /// Extracts a derivation of the input, as a list of rules in pre-order. Among the
    /// justifications of a variable, the one with the leftmost left span is chosen, then the
    /// one with the leftmost right span, then the one found first.
    ///
    /// Returns `None` if the input was rejected.
    pub fn trace(&self) -> Option<Vec<CfgRule>> {
        if !self.accepted() {
            return None;
        }
        let mut result = vec![];
        let mut work = vec![(self.start, self.whole())];
        while let Some((var, span)) = work.pop() {
            let chosen = self
                .justifications(span, var)
                .iter()
                .min_by_key(|justification| (justification.left.start, justification.right.start));
            match chosen {
                Some(justification) => {
                    result.push(justification.rule.clone());
                    work.push((justification.rule.rhs[1], justification.right));
                    work.push((justification.rule.rhs[0], justification.left));
                }
                None => result.push(CfgRule::new(var, [self.input[span.start]])),
            }
        }
        Some(result)
    }
}
