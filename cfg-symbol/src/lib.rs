//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! IDs. Names are optional and only used for display and for looking up terminals by their
//! textual form.

#![deny(unsafe_code)]

mod source;
mod symbol;

pub use self::source::{SymbolName, SymbolSource};
pub use self::symbol::{Symbol, SymbolRepr};
