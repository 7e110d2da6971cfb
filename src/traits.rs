use std::collections::HashMap;

use crate::compound::Compound;
use crate::element::Element;

/// Source of element reference data consulted while parsing.
///
/// A `None` answer is not an error: the parser substitutes a placeholder
/// element carrying only the symbol.
pub trait ElementLookup {
    fn lookup(&self, symbol: &str) -> Option<Element>;
}

/// Source of named compounds keyed by canonical formula string.
pub trait CompoundLookup {
    fn lookup_compound(&self, canonical: &str) -> Option<&Compound>;
}

impl ElementLookup for HashMap<String, Element> {
    fn lookup(&self, symbol: &str) -> Option<Element> {
        self.get(symbol).cloned()
    }
}

impl CompoundLookup for HashMap<String, Compound> {
    fn lookup_compound(&self, canonical: &str) -> Option<&Compound> {
        self.get(canonical)
    }
}

impl<T: ElementLookup + ?Sized> ElementLookup for &T {
    fn lookup(&self, symbol: &str) -> Option<Element> {
        (**self).lookup(symbol)
    }
}
