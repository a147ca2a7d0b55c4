//! Rewrites of context-free grammars that preserve the language. Applied in order, they bring
//! a grammar into Chomsky Normal Form:
//!
//! 1. [`remove_useless`] drops rules that take part in no derivation of a terminal string.
//! 2. [`eliminate_nulling`] removes rules of the form `A ::= ε`.
//! 3. [`eliminate_units`] removes rules of the form `A ::= B`.
//! 4. [`to_cnf`] splits long right-hand sides and moves terminals out of binary rules.
//!
//! Every stage except the first records the history of the rules it synthesizes.
//! [`Normalized`] runs the whole chain.

#![deny(unsafe_code)]

mod cnf;
mod error;
mod nulling;
mod pipeline;
mod unit;
mod useful;

pub use crate::cnf::to_cnf;
pub use crate::error::NormalizeError;
pub use crate::nulling::eliminate_nulling;
pub use crate::pipeline::Normalized;
pub use crate::unit::eliminate_units;
pub use crate::useful::remove_useless;
