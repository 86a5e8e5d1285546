//! A pure Rust reader and writer for MDL Molfiles in the V2000 connection-table format.
//!
//! Atoms are held with Cartesian positions in bohr and converted to angstrom
//! only at the file boundary. Bonds are stored as continuous orders between
//! atom pairs and discretized to single, double or triple bonds when written.
//!
//! # Features
//!
//! - **Fixed-column codec** for the header, counts line, atom block and bond block
//! - **Header recovery** that skips stray lines until a plausible counts line
//! - **Pluggable element resolution** through the [`ElementResolver`] trait
//! - **Explicit numeric formatting** via [`NumericFormat`] instead of process-wide locale state
//! - **Validated output**: non-finite coordinates and overflowing fields are errors,
//!   and nothing is written when validation fails
//!
//! # Quick Start
//!
//! ```
//! use mol_forge::{Atom, AtomCollection, BondOrderCollection, Element, MolReader, MolWriter};
//!
//! // Carbon monoxide, positions in bohr
//! let atoms: AtomCollection = [
//!     Atom::new(Element::C, [0.0, 0.0, 0.0]),
//!     Atom::new(Element::O, [2.132, 0.0, 0.0]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut bonds = BondOrderCollection::new(atoms.len());
//! bonds.set_order(0, 1, 2.6)?;
//!
//! let mut buffer = Vec::new();
//! MolWriter::new()
//!     .name("carbon monoxide")
//!     .write(&mut buffer, &atoms, Some(&bonds), "V2000")?;
//!
//! let molecule = MolReader::new().read(buffer.as_slice())?;
//! assert_eq!(molecule.atom_count(), 2);
//! assert_eq!(molecule.bonds.order(0, 1), 3.0);
//! assert_eq!(molecule.formula(), "CO");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] – Format dispatch, the Molfile codec and shared column helpers
//!
//! # Data Types
//!
//! - [`Atom`] – Element and position in bohr
//! - [`AtomCollection`] – Ordered atoms of one molecule
//! - [`BondOrderCollection`] – Sparse continuous bond orders keyed by atom pair
//! - [`Molecule`] – Name, atoms and bond orders read from one record
//! - [`Element`] – Chemical element (H through Og)
//! - [`BondType`] – Discrete bond type written to the bond block

mod model;

pub mod io;

pub use model::atom::Atom;
pub use model::bonds::{BondIndexError, BondOrderCollection};
pub use model::resolver::{ElementResolver, PeriodicTable, normalize_symbol};
pub use model::system::{AtomCollection, Molecule};
pub use model::types::{BondType, Element, ParseBondTypeError, ParseElementError};
pub use model::units::{
    ANGSTROM_PER_BOHR, BOHR_PER_ANGSTROM, angstrom_to_bohr, bohr_to_angstrom,
};

pub use io::columns::NumericFormat;
pub use io::mol::{MolReader, MolWriter, WriteOptions};
pub use io::{Error as IoError, Format, SupportType};
