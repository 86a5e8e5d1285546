//! MDL Molfile (V2000) reader and writer.
//!
//! Coordinates are angstrom in the file and bohr in memory. Atom indices are
//! 1-based in the file and 0-based in memory. Both conversions happen here
//! and nowhere else.

pub mod reader;
pub mod writer;

pub use reader::{MolReader, read};
pub use writer::{MolWriter, WriteOptions, write};

pub const V2000: &str = "V2000";
pub const V3000: &str = "V3000";

/// Eleven 3-column count fields plus at least five characters of version tag.
const COUNTS_LINE_MIN_LEN: usize = 38;

/// 0-based column where the version tag of the counts line starts.
const VERSION_COLUMN: usize = 33;

/// Program identifier written into the header when none is configured.
pub const DEFAULT_PROGRAM: &str = "mforge";

/// Molecule name written when none is configured.
pub const DEFAULT_NAME: &str = "Unnamed Molecule";

/// Terminator line of a record.
pub const END_LINE: &str = "M END";
