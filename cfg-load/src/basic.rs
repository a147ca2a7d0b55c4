//! The compact notation used by teaching tools:
//!
//! ```text
//! S -> aSb | ε
//! # comments and blank lines are skipped
//! A -> B | λ
//! ```
//!
//! Each symbol is one character. Uppercase ASCII letters are variables, every other
//! non-whitespace character is a terminal. `ε`, `λ` or an empty alternative stand for the
//! empty right-hand side. The first left-hand side is the start symbol.

use std::collections::BTreeMap;

use cfg_grammar::{Cfg, CfgRule};
use cfg_symbol::Symbol;
use log::debug;

use crate::LoadError;

const ARROWS: [&str; 2] = ["->", "→"];
const EMPTY: [char; 2] = ['ε', 'λ'];

/// Extension trait for loading grammars.
pub trait CfgLoadExt: Sized {
    /// Loads a grammar from the compact notation.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first malformed line.
    fn load(notation: &str) -> Result<Self, LoadError>;
}

impl CfgLoadExt for Cfg {
    fn load(notation: &str) -> Result<Self, LoadError> {
        let mut loader = Loader::default();
        for (line_idx, line) in notation.lines().enumerate() {
            loader.line(line_idx as u32 + 1, line)?;
        }
        let cfg = loader.finish()?;
        debug!("loaded {} rules over {} symbols", cfg.len(), cfg.num_syms());
        Ok(cfg)
    }
}

#[derive(Default)]
struct Loader {
    cfg: Cfg,
    symbols: BTreeMap<char, Symbol>,
    start: Option<Symbol>,
}

impl Loader {
    fn symbol(&mut self, ch: char) -> Symbol {
        if let Some(&sym) = self.symbols.get(&ch) {
            return sym;
        }
        let mut buf = [0; 4];
        let name: &str = ch.encode_utf8(&mut buf);
        let sym = if ch.is_ascii_uppercase() {
            self.cfg.variable(name)
        } else {
            self.cfg.terminal(name)
        };
        self.symbols.insert(ch, sym);
        sym
    }

    fn line(&mut self, line_no: u32, line: &str) -> Result<(), LoadError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        // Columns count characters. Offsets into `line` are in bytes.
        let error = |reason: &str, offset: usize| LoadError {
            reason: reason.to_string(),
            line: line_no,
            col: line[..offset].chars().count() as u32 + 1,
        };
        let (arrow_at, arrow) = ARROWS
            .iter()
            .filter_map(|arrow| line.find(arrow).map(|at| (at, *arrow)))
            .min()
            .ok_or_else(|| error("expected `->`", line.len()))?;
        let lhs_text = &line[..arrow_at];
        let mut lhs_chars = lhs_text.char_indices().filter(|(_, ch)| !ch.is_whitespace());
        let (lhs_offset, lhs_char) = lhs_chars
            .next()
            .ok_or_else(|| error("missing left-hand side", 0))?;
        if let Some((offset, _)) = lhs_chars.next() {
            return Err(error("left-hand side must be a single symbol", offset));
        }
        if !lhs_char.is_ascii_uppercase() {
            return Err(error(
                "left-hand side must be a variable (an uppercase letter)",
                lhs_offset,
            ));
        }
        let lhs = self.symbol(lhs_char);
        self.start.get_or_insert(lhs);

        let rhs_offset = arrow_at + arrow.len();
        for alternative in line[rhs_offset..].split('|') {
            let mut rhs = vec![];
            for ch in alternative.chars().filter(|ch| !ch.is_whitespace()) {
                if !EMPTY.contains(&ch) {
                    rhs.push(self.symbol(ch));
                }
            }
            self.cfg.add_rule(CfgRule::new(lhs, rhs));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Cfg, LoadError> {
        let start = self.start.ok_or_else(|| LoadError {
            reason: "grammar has no rules".to_string(),
            line: 1,
            col: 1,
        })?;
        self.cfg.set_start(start);
        Ok(self.cfg)
    }
}
