//! Recognition and parsing over an arbitrary context-free grammar.

use std::error::Error;
use std::fmt;

use log::debug;

use cfg_cyk::{Chart, CykError, CykRecognizer};
use cfg_grammar::{Cfg, CfgRule};
use cfg_history::{DerivationTracer, TraceError, TracePolicy};
use cfg_normalize::{NormalizeError, Normalized};
use cfg_symbol::Symbol;

/// Decides whether a grammar derives the empty string. The recognizer never sees the empty
/// input, which is routed here instead.
pub trait EmptyStringOracle {
    /// Checks whether the grammar derives the empty string.
    fn accepts_empty(&self, grammar: &Cfg) -> bool;
}

/// Accepts the empty string if and only if the start symbol is nullable.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullableStart;

impl EmptyStringOracle for NullableStart {
    fn accepts_empty(&self, grammar: &Cfg) -> bool {
        grammar
            .start()
            .map_or(false, |start| grammar.nullable_symbols()[start])
    }
}

/// Options for [`CykParser`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// What to do with rules whose provenance is lost while tracing a derivation back.
    pub trace_policy: TracePolicy,
}

impl ParseOptions {
    /// Creates the default options: tracing is strict.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy for rules of unknown provenance.
    pub fn trace_policy(mut self, trace_policy: TracePolicy) -> Self {
        self.trace_policy = trace_policy;
        self
    }
}

/// An error that occurs while preparing a parser or parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The grammar cannot be normalized.
    Normalize(NormalizeError),
    /// The recognizer refused the grammar or the input.
    Cyk(CykError),
    /// The derivation cannot be traced back.
    Trace(TraceError),
    /// A derivation of the empty input was requested.
    EmptyInput,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Normalize(error) => write!(f, "normalization failed: {}", error),
            ParseError::Cyk(error) => write!(f, "recognition failed: {}", error),
            ParseError::Trace(error) => write!(f, "tracing failed: {}", error),
            ParseError::EmptyInput => write!(f, "the empty input has no derivation to trace"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Normalize(error) => Some(error),
            ParseError::Cyk(error) => Some(error),
            ParseError::Trace(error) => Some(error),
            ParseError::EmptyInput => None,
        }
    }
}

impl From<NormalizeError> for ParseError {
    fn from(error: NormalizeError) -> Self {
        ParseError::Normalize(error)
    }
}

impl From<CykError> for ParseError {
    fn from(error: CykError) -> Self {
        ParseError::Cyk(error)
    }
}

impl From<TraceError> for ParseError {
    fn from(error: TraceError) -> Self {
        ParseError::Trace(error)
    }
}

/// A parser for any context-free grammar. The grammar is normalized once, when the parser is
/// created. Afterwards, the parser is immutable and may be shared between threads.
///
/// A grammar whose language is empty or holds only the empty string leaves no rule for the
/// start symbol after normalization, so creating a parser fails with
/// [`NormalizeError::NoStartRule`]. Ask an [`EmptyStringOracle`] such as [`NullableStart`]
/// directly for such a grammar.
#[derive(Clone, Debug)]
pub struct CykParser<O = NullableStart> {
    original: Cfg,
    normalized: Normalized,
    recognizer: CykRecognizer,
    options: ParseOptions,
    oracle: O,
}

impl CykParser {
    /// Creates a parser with default options.
    pub fn new(grammar: &Cfg) -> Result<Self, ParseError> {
        Self::with_options(grammar, ParseOptions::default())
    }

    /// Creates a parser with the given options.
    pub fn with_options(grammar: &Cfg, options: ParseOptions) -> Result<Self, ParseError> {
        let normalized = Normalized::new(grammar)?;
        let recognizer = CykRecognizer::new(normalized.grammar())?;
        debug!(
            "parser ready: {} rules, {} after normalization",
            grammar.len(),
            normalized.grammar().len()
        );
        Ok(CykParser {
            original: grammar.clone(),
            normalized,
            recognizer,
            options,
            oracle: NullableStart,
        })
    }
}

impl<O: EmptyStringOracle> CykParser<O> {
    /// Replaces the oracle for the empty input.
    pub fn with_oracle<P: EmptyStringOracle>(self, oracle: P) -> CykParser<P> {
        CykParser {
            original: self.original,
            normalized: self.normalized,
            recognizer: self.recognizer,
            options: self.options,
            oracle,
        }
    }

    /// Returns the grammar as it was given.
    pub fn grammar(&self) -> &Cfg {
        &self.original
    }

    /// Returns the normalized grammar and its history.
    pub fn normalized(&self) -> &Normalized {
        &self.normalized
    }

    /// Checks whether the grammar derives the input. The empty input is decided by the oracle.
    pub fn recognize(&self, input: &[Symbol]) -> Result<bool, ParseError> {
        if input.is_empty() {
            return Ok(self.oracle.accepts_empty(&self.original));
        }
        Ok(self.recognizer.recognize(input)?.accepted())
    }

    /// Checks whether the grammar derives the string, one terminal per character. A character
    /// that names no terminal rejects the string.
    pub fn recognize_str(&self, input: &str) -> Result<bool, ParseError> {
        match self.tokenize(input) {
            Some(tokens) => self.recognize(&tokens),
            None => Ok(false),
        }
    }

    /// Fills the chart for a non-empty input.
    pub fn chart(&self, input: &[Symbol]) -> Result<Chart, ParseError> {
        Ok(self.recognizer.recognize(input)?)
    }

    /// Finds a derivation of the input over the original grammar, as a list of rules in
    /// pre-order. Returns `None` if the input is rejected.
    pub fn parse(&self, input: &[Symbol]) -> Result<Option<Vec<CfgRule>>, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let chart = self.recognizer.recognize(input)?;
        let trace = match chart.trace() {
            Some(trace) => trace,
            None => return Ok(None),
        };
        let derivation = DerivationTracer::new(&self.original, self.normalized.history())
            .policy(self.options.trace_policy)
            .trace_back(&trace)?;
        Ok(Some(derivation))
    }

    /// Finds a derivation of the string, one terminal per character.
    pub fn parse_str(&self, input: &str) -> Result<Option<Vec<CfgRule>>, ParseError> {
        match self.tokenize(input) {
            Some(tokens) => self.parse(&tokens),
            None => Ok(None),
        }
    }

    fn tokenize(&self, input: &str) -> Option<Vec<Symbol>> {
        self.original.tokenize(input).into_iter().collect()
    }
}
