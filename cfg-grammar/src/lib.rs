//! Library for manipulations on context-free grammars. This crate holds the grammar model
//! shared by the normalization stages and the recognizer.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod cfg;
mod error;
mod occurence_map;
pub mod rule_builder;
pub mod symbol_bit_set;

pub use crate::cfg::{Cfg, CfgRule, RhsPropertyMode};
pub use crate::error::GrammarError;
pub use crate::rule_builder::RuleBuilder;
pub use crate::symbol_bit_set::SymbolBitSet;
pub use cfg_symbol::{Symbol, SymbolSource};

pub(crate) mod local_prelude {
    pub use crate::cfg::{Cfg, CfgRule};
    pub use crate::symbol_bit_set::SymbolBitSet;
    pub use cfg_symbol::{Symbol, SymbolSource};
}
