use std::fmt;

use cfg_symbol::Symbol;

/// A violation of the grammar invariants, found by [`Cfg::validate`].
///
/// [`Cfg::validate`]: crate::Cfg::validate
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GrammarError {
    /// No start symbol was assigned.
    MissingStart,
    /// The start symbol is a terminal.
    TerminalStart {
        /// The offending start symbol.
        start: Symbol,
    },
    /// A rule has a terminal on its left-hand side.
    TerminalLhs {
        /// The offending symbol.
        lhs: Symbol,
    },
    /// A rule mentions a symbol that was never generated by the grammar's symbol source.
    UnknownSymbol {
        /// The offending symbol.
        sym: Symbol,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::MissingStart => write!(f, "grammar has no start symbol"),
            GrammarError::TerminalStart { start } => {
                write!(f, "start symbol {} is a terminal", start.usize())
            }
            GrammarError::TerminalLhs { lhs } => {
                write!(f, "terminal {} appears on a left-hand side", lhs.usize())
            }
            GrammarError::UnknownSymbol { sym } => {
                write!(f, "symbol {} does not belong to this grammar", sym.usize())
            }
        }
    }
}

impl std::error::Error for GrammarError {}
