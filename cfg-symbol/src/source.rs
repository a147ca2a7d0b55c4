//! Source

use std::sync::Arc;

use crate::symbol::{Symbol, SymbolRepr};

/// A symbol name. Cheap to clone and safe to share between threads.
pub type SymbolName = Arc<str>;

/// A source of numeric symbols, together with their optional names.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    names: Vec<Option<SymbolName>>,
}

impl SymbolSource {
    /// Creates a source of numeric symbols with an empty symbol space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `N` generated, unnamed symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for dest in &mut result {
            *dest = self.next_sym(None);
        }
        result
    }

    /// Returns generated symbols with the given names.
    pub fn with_names<const N: usize>(&mut self, names: [Option<&str>; N]) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for (dest, name) in result.iter_mut().zip(names) {
            *dest = self.next_sym(name);
        }
        result
    }

    /// Generates a new unique symbol.
    ///
    /// If a name is given, it will be recorded within the symbol source.
    pub fn next_sym(&mut self, name: Option<&str>) -> Symbol {
        let ret = Symbol::from(self.names.len() as SymbolRepr);
        self.names.push(name.map(SymbolName::from));
        ret
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }

    /// Returns the name of a symbol, if it has one.
    pub fn name(&self, sym: Symbol) -> Option<&str> {
        self.names.get(sym.usize()).and_then(|name| name.as_deref())
    }

    /// Returns the name of a symbol, or a generated `g{id}` name for anonymous symbols.
    pub fn name_of(&self, sym: Symbol) -> String {
        match self.name(sym) {
            Some(name) => name.to_string(),
            None => format!("g{}", sym.usize()),
        }
    }

    /// Finds the first symbol with the given name.
    pub fn find(&self, name: &str) -> Option<Symbol> {
        self.names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .map(Symbol::from)
    }

    /// Checks whether any symbol carries the given name.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns an iterator over all symbols generated so far.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> {
        (0..self.num_syms()).map(Symbol::from)
    }

    /// Returns an infinite iterator over the symbols a fresh source would generate,
    /// in order. Useful for zipping with per-symbol tables.
    pub fn generate_fresh() -> impl Iterator<Item = Symbol> {
        (0 as SymbolRepr..).map(Symbol::from)
    }
}
