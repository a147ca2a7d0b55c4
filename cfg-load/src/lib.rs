//! Allows us to load context-free grammars from
//! a compact textual notation.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod basic;

use std::fmt;

pub use crate::basic::CfgLoadExt;

/// Represents an error when loading a grammar.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoadError {
    /// Human-readable reason for the error.
    pub reason: String,
    /// Line where the error happened.
    ///
    /// One-indexed.
    pub line: u32,
    /// Column where the error happened.
    ///
    /// One-indexed.
    pub col: u32,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Parse error at line {} column {}: reason: {}",
            self.line, self.col, self.reason
        )
    }
}

impl std::error::Error for LoadError {}
