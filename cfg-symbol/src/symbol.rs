use std::fmt;
use std::num::NonZeroU32;

pub type SymbolRepr = u32;

/// A common grammar symbol type.
///
/// The symbol is an interned token. One symbol occupies exactly one position of
/// a recognized input.
#[derive(Clone, Copy, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol(NonZeroU32);

impl Symbol {
    /// Returns the first symbol a fresh source hands out.
    pub fn first() -> Self {
        Symbol::from(0 as SymbolRepr)
    }

    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::first()
    }
}

impl From<SymbolRepr> for Symbol {
    #[inline]
    fn from(id: SymbolRepr) -> Self {
        match NonZeroU32::new(id.wrapping_add(1)) {
            Some(n) => Symbol(n),
            None => panic!("invalid conversion from a null id to non-null Symbol"),
        }
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        Symbol::from(id as SymbolRepr)
    }
}

impl From<Symbol> for SymbolRepr {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.0.get() - 1
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.usize()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.usize())
    }
}
