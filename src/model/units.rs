//! Length units at the file boundary.
//!
//! Positions are held in bohr everywhere inside the crate; Molfile atom blocks
//! are written in angstrom. These factors are applied by the codec only.

/// Angstrom per bohr (CODATA 2018).
pub const ANGSTROM_PER_BOHR: f64 = 0.529_177_210_903;

/// Bohr per angstrom.
pub const BOHR_PER_ANGSTROM: f64 = 1.0 / ANGSTROM_PER_BOHR;

#[inline]
pub fn bohr_to_angstrom(position: [f64; 3]) -> [f64; 3] {
    position.map(|c| c * ANGSTROM_PER_BOHR)
}

#[inline]
pub fn angstrom_to_bohr(position: [f64; 3]) -> [f64; 3] {
    position.map(|c| c * BOHR_PER_ANGSTROM)
}
