//! Normalization of context-free grammars into Chomsky Normal Form, CYK recognition, and
//! tracing of derivations back to the grammar as it was written.
//!
//! [`CykParser`] puts the pieces together.

pub use cfg_cyk as cyk;
pub use cfg_grammar::*;
pub use cfg_history as history;
pub use cfg_load as load;
pub use cfg_normalize as normalize;
pub use cfg_symbol::*;
pub use cfg_symbol_bit_matrix as symbol_bit_matrix;

mod parser;

pub use crate::parser::{CykParser, EmptyStringOracle, NullableStart, ParseError, ParseOptions};
