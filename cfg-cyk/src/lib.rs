//! A CYK recognizer. Works with grammars in Chomsky Normal Form, over inputs where every
//! position holds exactly one terminal.
//!
//! The recognizer fills a chart of spans bottom-up. Each variable in a chart cell keeps every
//! justification for its presence, so that a derivation can be chosen deterministically
//! afterwards.

#![deny(unsafe_code)]

mod chart;
mod error;
mod recognizer;

pub use crate::chart::{Cell, Chart, Justification, Rejection, Span};
pub use crate::error::CykError;
pub use crate::recognizer::CykRecognizer;
