use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BondIndexError {
    #[error("atom {0} cannot be bonded to itself")]
    SelfBond(usize),
    #[error("atom index {index} is out of range for {atom_count} atoms")]
    OutOfRange { index: usize, atom_count: usize },
}

/// Symmetric, sparse bond orders between pairs of atoms.
///
/// Pairs are stored once with the lower index first. A missing pair has
/// order `0.0`, and assigning `0.0` removes the pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondOrderCollection {
    atom_count: usize,
    orders: BTreeMap<(usize, usize), f64>,
}

impl BondOrderCollection {
    pub fn new(atom_count: usize) -> Self {
        Self {
            atom_count,
            orders: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// Changes the number of atoms, dropping pairs that no longer fit.
    pub fn resize(&mut self, atom_count: usize) {
        self.atom_count = atom_count;
        self.orders.retain(|&(_, j), _| j < atom_count);
    }

    pub fn set_order(&mut self, i: usize, j: usize, order: f64) -> Result<(), BondIndexError> {
        let key = self.key(i, j)?;
        if order == 0.0 {
            self.orders.remove(&key);
        } else {
            self.orders.insert(key, order);
        }
        Ok(())
    }

    pub fn order(&self, i: usize, j: usize) -> f64 {
        self.key(i, j)
            .ok()
            .and_then(|key| self.orders.get(&key).copied())
            .unwrap_or(0.0)
    }

    /// Number of stored (non-zero) pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Stored pairs as `(i, j, order)` with `i < j`, sorted by `(i, j)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.orders.iter().map(|(&(i, j), &order)| (i, j, order))
    }

    fn key(&self, i: usize, j: usize) -> Result<(usize, usize), BondIndexError> {
        if i == j {
            return Err(BondIndexError::SelfBond(i));
        }
        for index in [i, j] {
            if index >= self.atom_count {
                return Err(BondIndexError::OutOfRange {
                    index,
                    atom_count: self.atom_count,
                });
            }
        }
        Ok((i.min(j), i.max(j)))
    }
}
