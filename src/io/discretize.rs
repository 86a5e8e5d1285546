//! Mapping between continuous bond orders and Molfile bond-type codes.
//!
//! Writing uses two separate tests. A bond line is emitted when the order
//! rounds to 1, 2 or 3 ([`bond_type`]). The atom-block valence field and the
//! counts-line bond total count orders in `[0.5, 3.5)`
//! ([`counts_toward_valence`]). Reading maps codes 1..=3 straight back to
//! orders and drops everything else ([`order_from_code`]).

use crate::model::bonds::BondOrderCollection;
use crate::model::types::BondType;

const VALENCE_MIN: f64 = 0.5;
const VALENCE_MAX: f64 = 3.5;

/// Nearest bond type, rounding half away from zero; `None` outside {1, 2, 3}.
pub fn bond_type(order: f64) -> Option<BondType> {
    let rounded = order.round();
    if (1.0..=3.0).contains(&rounded) {
        BondType::from_code(rounded as u32)
    } else {
        None
    }
}

pub fn counts_toward_valence(order: f64) -> bool {
    (VALENCE_MIN..VALENCE_MAX).contains(&order)
}

/// Continuous order for a bond-type code read from a file.
pub fn order_from_code(code: u32) -> Option<f64> {
    BondType::from_code(code).map(|t| t.value())
}

/// Per-atom number of bonds passing [`counts_toward_valence`].
pub fn valences(atom_count: usize, bonds: Option<&BondOrderCollection>) -> Vec<usize> {
    let mut valences = vec![0usize; atom_count];
    let Some(bonds) = bonds else {
        return valences;
    };
    for (i, j, order) in bonds.iter() {
        if i < atom_count && j < atom_count && counts_toward_valence(order) {
            valences[i] += 1;
            valences[j] += 1;
        }
    }
    valences
}
