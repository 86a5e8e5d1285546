//! Element symbol lookup used by the Molfile codec.
//!
//! The codec never reaches for a global table: it is handed an
//! [`ElementResolver`] at construction, [`PeriodicTable`] by default.

use super::types::Element;

/// Bidirectional mapping between chemical symbols and [`Element`]s.
pub trait ElementResolver {
    /// Looks up a normalized symbol (`"C"`, `"Cl"`).
    fn resolve(&self, symbol: &str) -> Option<Element>;

    /// The symbol written for `element`.
    fn symbol(&self, element: Element) -> &str;
}

impl<T: ElementResolver + ?Sized> ElementResolver for &T {
    fn resolve(&self, symbol: &str) -> Option<Element> {
        (**self).resolve(symbol)
    }

    fn symbol(&self, element: Element) -> &str {
        (**self).symbol(element)
    }
}

/// The standard periodic table, H through Og.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodicTable;

impl ElementResolver for PeriodicTable {
    fn resolve(&self, symbol: &str) -> Option<Element> {
        symbol.parse().ok()
    }

    fn symbol(&self, element: Element) -> &str {
        element.symbol()
    }
}

/// Strips every space and rewrites the symbol as upper-case first letter,
/// lower-case remainder (`" CL"` → `"Cl"`).
pub fn normalize_symbol(raw: &str) -> String {
    let mut chars = raw.chars().filter(|c| *c != ' ');
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
