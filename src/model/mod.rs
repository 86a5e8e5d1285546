//! In-memory molecular structure.
//!
//! - [`types`] – Periodic table elements and the discrete Molfile bond types.
//! - [`atom`] – An element at a position in bohr.
//! - [`system`] – Ordered atom collections and the [`Molecule`](system::Molecule) read result.
//! - [`bonds`] – Continuous, symmetric pairwise bond orders.
//! - [`resolver`] – Element symbol lookup injected into the codec.
//! - [`units`] – The bohr/angstrom factors applied at the file boundary.

pub mod atom;
pub mod bonds;
pub mod resolver;
pub mod system;
pub mod types;
pub mod units;
