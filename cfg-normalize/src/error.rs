use std::error::Error;
use std::fmt;

use cfg_grammar::GrammarError;
use cfg_symbol::Symbol;

/// An error that stops normalization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NormalizeError {
    /// No start symbol was assigned.
    MissingStart,
    /// The grammar violates its invariants.
    InvalidGrammar(GrammarError),
    /// No rule has the start symbol on its left-hand side, so the grammar cannot be brought
    /// into Chomsky Normal Form.
    NoStartRule {
        /// The start symbol.
        start: Symbol,
    },
    /// Conversion to Chomsky Normal Form was given a rule of the form `A ::= ε`.
    NullingRule {
        /// The rule's left-hand side.
        lhs: Symbol,
    },
    /// Conversion to Chomsky Normal Form was given a rule of the form `A ::= B`.
    UnitRule {
        /// The rule's left-hand side.
        lhs: Symbol,
        /// The variable on the rule's right-hand side.
        rhs: Symbol,
    },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalizeError::MissingStart => write!(f, "grammar has no start symbol"),
            NormalizeError::InvalidGrammar(error) => write!(f, "invalid grammar: {}", error),
            NormalizeError::NoStartRule { start } => write!(
                f,
                "no rule has the start symbol {} on its left-hand side",
                start.usize()
            ),
            NormalizeError::NullingRule { lhs } => {
                write!(f, "nulling rule for symbol {} is not allowed", lhs.usize())
            }
            NormalizeError::UnitRule { lhs, rhs } => write!(
                f,
                "unit rule from symbol {} to symbol {} is not allowed",
                lhs.usize(),
                rhs.usize()
            ),
        }
    }
}

impl Error for NormalizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NormalizeError::InvalidGrammar(error) => Some(error),
            _ => None,
        }
    }
}

impl From<GrammarError> for NormalizeError {
    fn from(error: GrammarError) -> Self {
        match error {
            GrammarError::MissingStart => NormalizeError::MissingStart,
            error => NormalizeError::InvalidGrammar(error),
        }
    }
}
