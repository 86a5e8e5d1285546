//! Chemical file I/O.
//!
//! The MDL Molfile (V2000) codec lives in [`mol`]. The free functions in this
//! module dispatch on a format name, so callers that only know a file type by
//! its short name can read and write without naming the codec directly.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::model::{bonds::BondOrderCollection, system::AtomCollection};

pub mod columns;
pub mod discretize;
pub mod error;
pub mod mol;

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Mol,
}

impl Format {
    pub const ALL: &'static [Format] = &[Format::Mol];

    /// Short lowercase name, also the usual file extension.
    pub fn name(self) -> &'static str {
        match self {
            Format::Mol => "mol",
        }
    }

    pub fn support(self) -> SupportType {
        match self {
            Format::Mol => SupportType::ReadWrite,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Mol => write!(f, "MOL"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .iter()
            .copied()
            .find(|format| format.name() == s)
            .ok_or_else(|| Error::FormatUnsupported(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportType {
    Read,
    Write,
    ReadWrite,
}

impl SupportType {
    pub fn can_read(self) -> bool {
        matches!(self, SupportType::Read | SupportType::ReadWrite)
    }

    pub fn can_write(self) -> bool {
        matches!(self, SupportType::Write | SupportType::ReadWrite)
    }
}

/// Every format this crate handles, with its direction of support.
pub fn formats() -> Vec<(Format, SupportType)> {
    Format::ALL
        .iter()
        .map(|&format| (format, format.support()))
        .collect()
}

pub fn supports(name: &str) -> bool {
    name.parse::<Format>().is_ok()
}

/// Reads atoms and bond orders from `reader` in the named format.
///
/// # Errors
///
/// [`Error::FormatUnsupported`] for unknown names, checked before the stream
/// is touched; otherwise whatever the codec reports.
pub fn read<R: BufRead>(
    reader: R,
    name: &str,
) -> Result<(AtomCollection, BondOrderCollection), Error> {
    let format: Format = name.parse()?;
    if !format.support().can_read() {
        return Err(Error::FormatUnsupported(name.to_string()));
    }
    match format {
        Format::Mol => mol::read(reader).map(|molecule| molecule.into_parts()),
    }
}

/// Writes atoms and optional bond orders to `writer` in the named format.
///
/// Molfiles are always written as V2000.
pub fn write<W: Write>(
    writer: W,
    name: &str,
    atoms: &AtomCollection,
    bonds: Option<&BondOrderCollection>,
) -> Result<(), Error> {
    let format: Format = name.parse()?;
    if !format.support().can_write() {
        return Err(Error::FormatUnsupported(name.to_string()));
    }
    match format {
        Format::Mol => mol::write(writer, atoms, bonds, mol::V2000),
    }
}
