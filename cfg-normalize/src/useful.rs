//! Removal of useless rules.

use log::debug;

use cfg_grammar::Cfg;
use cfg_symbol_bit_matrix::CfgSymbolBitMatrixExt;

use crate::NormalizeError;

/// Removes every rule that takes part in no derivation of a terminal string from the start
/// symbol. The language does not change.
///
/// Unproductive symbols are found first. Reachability is computed afterwards, on the rules
/// that remain, so that a symbol reachable only through unproductive rules is removed too.
pub fn remove_useless(cfg: &Cfg) -> Result<Cfg, NormalizeError> {
    cfg.validate()?;
    let start = cfg.start().ok_or(NormalizeError::MissingStart)?;

    let productive = cfg.productive_symbols();
    let mut result = cfg.clone();
    result.retain(|rule| productive[rule.lhs] && rule.rhs.iter().all(|&sym| productive[sym]));

    let reachable = result.reachability_matrix().reachable_from(start);
    result.retain(|rule| reachable[rule.lhs]);

    debug!(
        "removed {} useless rules out of {}",
        cfg.len() - result.len(),
        cfg.len()
    );
    Ok(result)
}
