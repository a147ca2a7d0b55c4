//! Matrices of relations between grammar symbols.

#![deny(unsafe_code)]

mod symbol_bit_matrix;

pub use crate::symbol_bit_matrix::{
    CfgSymbolBitMatrixExt, DirectDerivationMatrix, ReachabilityMatrix, SymbolBitMatrix,
};
