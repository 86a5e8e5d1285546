use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::ops::Index;

use super::atom::Atom;
use super::bonds::BondOrderCollection;
use super::types::Element;

/// Ordered atoms; the 0-based position of an atom is its bond index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomCollection {
    atoms: Vec<Atom>,
}

impl AtomCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atoms: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.atoms.iter().map(|a| a.element)
    }

    pub fn positions(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.atoms.iter().map(|a| a.position)
    }
}

impl From<Vec<Atom>> for AtomCollection {
    fn from(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }
}

impl FromIterator<Atom> for AtomCollection {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AtomCollection {
    type Item = Atom;
    type IntoIter = std::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}

impl<'a> IntoIterator for &'a AtomCollection {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl Index<usize> for AtomCollection {
    type Output = Atom;

    fn index(&self, index: usize) -> &Atom {
        &self.atoms[index]
    }
}

/// A structure as read from one Molfile record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    /// Contents of the header name line, trimmed.
    pub name: String,
    pub atoms: AtomCollection,
    pub bonds: BondOrderCollection,
}

impl Molecule {
    pub fn new(atoms: AtomCollection, bonds: BondOrderCollection) -> Self {
        Self {
            name: String::new(),
            atoms,
            bonds,
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn into_parts(self) -> (AtomCollection, BondOrderCollection) {
        (self.atoms, self.bonds)
    }

    /// Molecular formula in Hill order: C, then H, then alphabetical.
    /// Without carbon every element is alphabetical.
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for element in self.atoms.elements() {
            *counts.entry(element.symbol()).or_insert(0) += 1;
        }

        let mut ordered = Vec::with_capacity(counts.len());
        if let Some(c) = counts.remove("C") {
            ordered.push(("C", c));
            if let Some(h) = counts.remove("H") {
                ordered.push(("H", h));
            }
        }
        ordered.extend(counts);

        let mut out = String::new();
        for (symbol, count) in ordered {
            out.push_str(symbol);
            if count > 1 {
                let _ = write!(out, "{count}");
            }
        }
        out
    }

    /// Sum of standard atomic weights in g/mol.
    pub fn molecular_mass(&self) -> f64 {
        self.atoms.elements().map(|e| e.atomic_mass()).sum()
    }
}
