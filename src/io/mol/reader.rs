use std::io::BufRead;

use log::{debug, trace};

use super::{COUNTS_LINE_MIN_LEN, V2000, V3000, VERSION_COLUMN};
use crate::io::columns::{NumericFormat, field, parse_count, parse_real};
use crate::io::discretize::order_from_code;
use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    bonds::BondOrderCollection,
    resolver::{ElementResolver, PeriodicTable, normalize_symbol},
    system::{AtomCollection, Molecule},
    units::angstrom_to_bohr,
};

const SYMBOL_WIDTH: usize = 3;
const BOND_FIELDS: usize = 3;

/// Reads the first Molfile record from `reader` with the standard periodic table.
pub fn read<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    MolReader::new().read(reader)
}

/// V2000 Molfile reader.
///
/// Parsing is fail-fast: the first structural problem after the counts line
/// aborts the whole read. Only the lines between the header and the counts
/// line are allowed to be garbage; they are skipped until a line with a valid
/// atom and bond count appears.
#[derive(Debug, Clone)]
pub struct MolReader<E = PeriodicTable> {
    resolver: E,
    numeric: NumericFormat,
}

impl MolReader<PeriodicTable> {
    pub fn new() -> Self {
        Self::with_resolver(PeriodicTable)
    }
}

impl Default for MolReader<PeriodicTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ElementResolver> MolReader<E> {
    pub fn with_resolver(resolver: E) -> Self {
        Self {
            resolver,
            numeric: NumericFormat::V2000,
        }
    }

    pub fn read<R: BufRead>(&self, reader: R) -> Result<Molecule, Error> {
        let mut lines = NumberedLines::new(reader);

        let name = lines
            .next_raw()?
            .map(|(_, bytes)| String::from_utf8_lossy(bytes).trim().to_string())
            .unwrap_or_default();
        lines.next_raw()?;
        lines.next_raw()?;

        let counts = self.scan_counts(&mut lines)?;
        match counts.version.as_str() {
            V2000 => {}
            V3000 => return Err(Error::unsupported_version(V3000)),
            other => {
                debug!(
                    "counts line {} carries unrecognized version tag '{}'",
                    counts.line, other
                );
                return Err(Error::unsupported_version(other));
            }
        }

        let atoms = self.parse_atoms(&mut lines, counts.atoms)?;
        let mut bonds = BondOrderCollection::new(atoms.len());
        if counts.bonds > 0 {
            self.parse_bonds(&mut lines, counts.bonds, &mut bonds)?;
        }

        debug!(
            "read MOL record '{}': {} atoms, {} bonds",
            name,
            atoms.len(),
            bonds.len()
        );

        Ok(Molecule { name, atoms, bonds })
    }

    fn scan_counts<R: BufRead>(&self, lines: &mut NumberedLines<R>) -> Result<CountsLine, Error> {
        let width = self.numeric.count_width;
        while let Some((ln, bytes)) = lines.next_raw()? {
            let Ok(line) = std::str::from_utf8(bytes) else {
                debug!("skipping line {ln}: not valid UTF-8");
                continue;
            };
            if line.len() < COUNTS_LINE_MIN_LEN {
                debug!("skipping line {ln}: too short for a counts line");
                continue;
            }
            let atoms = field(line, 0, width).and_then(parse_count);
            let bonds = field(line, width, width).and_then(parse_count);
            let (Some(atoms), Some(bonds)) = (atoms, bonds) else {
                debug!("skipping line {ln}: no atom/bond counts in the leading columns");
                continue;
            };

            let version = line
                .get(VERSION_COLUMN..)
                .unwrap_or_default()
                .replace(' ', "");
            trace!("counts line {ln}: {atoms} atoms, {bonds} bonds, version '{version}'");

            return Ok(CountsLine {
                line: ln,
                atoms,
                bonds,
                version,
            });
        }

        Err(Error::mismatch(
            lines.consumed() + 1,
            "reached end of input without finding a counts line",
        ))
    }

    fn parse_atoms<R: BufRead>(
        &self,
        lines: &mut NumberedLines<R>,
        count: usize,
    ) -> Result<AtomCollection, Error> {
        let w = self.numeric.coordinate_width;
        let symbol_start = 3 * w + 1;
        let min_len = symbol_start + SYMBOL_WIDTH;

        let mut atoms = AtomCollection::with_capacity(count);
        for _ in 0..count {
            let (ln, line) = lines.require("atom block ended early")?;
            if line.len() < min_len {
                return Err(Error::mismatch(
                    ln,
                    format!("atom line must be at least {min_len} characters"),
                ));
            }

            let mut position = [0.0; 3];
            for (axis, (slot, name)) in position.iter_mut().zip(['x', 'y', 'z']).enumerate() {
                *slot = field(&line, axis * w, w)
                    .and_then(parse_real)
                    .ok_or_else(|| {
                        Error::mismatch(ln, format!("invalid {name} coordinate in atom line"))
                    })?;
            }

            let raw_symbol = field(&line, symbol_start, SYMBOL_WIDTH)
                .ok_or_else(|| Error::mismatch(ln, "unreadable element symbol column"))?;
            let symbol = normalize_symbol(raw_symbol);
            let element = self.resolver.resolve(&symbol).ok_or_else(|| {
                Error::mismatch(ln, format!("unknown element symbol '{symbol}'"))
            })?;

            trace!("atom line {ln}: {element} at {position:?} Å");
            atoms.push(Atom::new(element, angstrom_to_bohr(position)));
        }
        Ok(atoms)
    }

    fn parse_bonds<R: BufRead>(
        &self,
        lines: &mut NumberedLines<R>,
        count: usize,
        bonds: &mut BondOrderCollection,
    ) -> Result<(), Error> {
        let w = self.numeric.count_width;
        let atom_count = bonds.atom_count();

        for _ in 0..count {
            let (ln, line) = lines.require("bond block ended early")?;
            if line.len() < BOND_FIELDS * w {
                return Err(Error::mismatch(
                    ln,
                    format!("bond line must be at least {} characters", BOND_FIELDS * w),
                ));
            }

            let mut values = [0usize; BOND_FIELDS];
            for (k, (slot, name)) in values
                .iter_mut()
                .zip(["first atom index", "second atom index", "bond type"])
                .enumerate()
            {
                *slot = field(&line, k * w, w)
                    .and_then(parse_count)
                    .ok_or_else(|| Error::mismatch(ln, format!("invalid {name} in bond line")))?;
            }
            let [a, b, specifier] = values;

            let (i, j) = match (a.checked_sub(1), b.checked_sub(1)) {
                (Some(i), Some(j)) if i < atom_count && j < atom_count && i != j => (i, j),
                _ => {
                    return Err(Error::mismatch(
                        ln,
                        format!("bond {a}-{b} does not connect two distinct atoms in 1..={atom_count}"),
                    ));
                }
            };

            match u32::try_from(specifier).ok().and_then(order_from_code) {
                Some(order) => {
                    trace!("bond line {ln}: {a}-{b} order {order}");
                    bonds
                        .set_order(i, j, order)
                        .map_err(|e| Error::mismatch(ln, e.to_string()))?;
                }
                None => debug!("bond line {ln}: ignoring bond type {specifier}"),
            }
        }
        Ok(())
    }
}

struct CountsLine {
    line: usize,
    atoms: usize,
    bonds: usize,
    version: String,
}

/// Byte-line reader that remembers how many lines it has handed out.
///
/// Lines come back without their `\n` or `\r\n` terminator. Decoding is
/// left to the caller so header and pre-counts lines never need to be UTF-8.
struct NumberedLines<R> {
    inner: R,
    buf: Vec<u8>,
    consumed: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: reader,
            buf: Vec::new(),
            consumed: 0,
        }
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn next_raw(&mut self) -> Result<Option<(usize, &[u8])>, Error> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        self.consumed += 1;
        Ok(Some((self.consumed, &self.buf)))
    }

    /// Next line as text; invalid UTF-8 is a format error on that line.
    fn next_line(&mut self) -> Result<Option<(usize, String)>, Error> {
        match self.next_raw()? {
            Some((ln, bytes)) => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(Some((ln, text.to_string()))),
                Err(_) => Err(Error::mismatch(ln, "line is not valid UTF-8")),
            },
            None => Ok(None),
        }
    }

    fn require(&mut self, missing: &str) -> Result<(usize, String), Error> {
        self.next_line()?
            .ok_or_else(|| Error::mismatch(self.consumed + 1, missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;
    use crate::model::units::BOHR_PER_ANGSTROM;
    use std::io::Cursor;

    const HEADER: &str = "Water\n  mforge10182614303D\n\n";

    fn molfile(counts: &str, body: &[&str]) -> String {
        let mut text = String::from(HEADER);
        text.push_str(counts);
        text.push('\n');
        for line in body {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str("M END\n");
        text
    }

    fn water() -> String {
        molfile(
            "  3  2  0  0  0  0  0  0  0  0999 V2000",
            &[
                "    0.0000    0.0000    0.1173 O   0  0  0  0  0  2  0  0  0  0  0  0",
                "    0.0000    0.7572   -0.4692 H   0  0  0  0  0  1  0  0  0  0  0  0",
                "    0.0000   -0.7572   -0.4692 H   0  0  0  0  0  1  0  0  0  0  0  0",
                "  1  2  1  0  0  0  0",
                "  1  3  1  0  0  0  0",
            ],
        )
    }

    fn read_str(text: &str) -> Result<Molecule, Error> {
        read(Cursor::new(text.as_bytes()))
    }

    #[test]
    fn reads_atoms_and_bonds() {
        let molecule = read_str(&water()).expect("read water");
        assert_eq!(molecule.name, "Water");
        assert_eq!(
            molecule.atoms.elements().collect::<Vec<_>>(),
            vec![Element::O, Element::H, Element::H]
        );
        let h = molecule.atoms[1].position;
        assert!((h[1] - 0.7572 * BOHR_PER_ANGSTROM).abs() < 1e-12);
        assert!((h[2] + 0.4692 * BOHR_PER_ANGSTROM).abs() < 1e-12);
        assert_eq!(molecule.bonds.atom_count(), 3);
        assert_eq!(molecule.bonds.order(0, 1), 1.0);
        assert_eq!(molecule.bonds.order(2, 0), 1.0);
        assert_eq!(molecule.bonds.order(1, 2), 0.0);
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let text = water().replace('\n', "\r\n");
        let molecule = read_str(&text).expect("read CRLF water");
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.bond_count(), 2);
    }

    #[test]
    fn normalizes_symbol_case() {
        let text = molfile(
            "  1  0  0  0  0  0  0  0  0  0999 V2000",
            &["    1.0000    2.0000    3.0000 CL  0  0  0  0  0  0  0  0  0  0  0  0"],
        );
        let molecule = read_str(&text).unwrap();
        assert_eq!(molecule.atoms[0].element, Element::Cl);
    }

    #[test]
    fn recovery_scan_skips_invalid_candidate() {
        let text = format!(
            "{HEADER}abc  1  0  0  0  0  0  0  0  0999 V2000\n  1  0  0  0  0  0  0  0  0  0999 V2000\n{}\nM END\n",
            "    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0"
        );
        let molecule = read_str(&text).expect("scan past garbage");
        assert_eq!(molecule.atom_count(), 1);
        assert_eq!(molecule.atoms[0].element, Element::C);
    }

    #[test]
    fn recovery_scan_skips_short_and_left_justified_lines() {
        let text = format!(
            "{HEADER}short\n1    0  0  0  0  0  0  0  0  0999 V2000\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM END\n"
        );
        let molecule = read_str(&text).expect("scan past garbage");
        assert_eq!(molecule.atom_count(), 0);
        assert!(molecule.bonds.is_empty());
    }

    #[test]
    fn missing_counts_line_is_a_mismatch() {
        let err = read_str("name\nprogram\ncomment\nnot a counts line\n").unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { line: 5, .. }));

        let err = read_str("").unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { .. }));
    }

    #[test]
    fn v3000_is_rejected_before_atom_parsing() {
        let text = molfile(
            "  0  0  0     0  0            999 V3000",
            &["M  V30 BEGIN CTAB", "garbage that would never parse"],
        );
        let err = read_str(&text).unwrap_err();
        match err {
            Error::UnsupportedVersion { version } => assert_eq!(version, "V3000"),
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_version_is_rejected() {
        let text = molfile(
            "  1  0  0  0  0  0  0  0  0  0999 V9999",
            &["    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0"],
        );
        let err = read_str(&text).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { ref version } if version == "V9999"));
    }

    #[test]
    fn unknown_element_is_a_mismatch() {
        let text = molfile(
            "  1  0  0  0  0  0  0  0  0  0999 V2000",
            &["    0.0000    0.0000    0.0000 Xx  0  0  0  0  0  0  0  0  0  0  0  0"],
        );
        let err = read_str(&text).unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { line: 5, .. }));
    }

    #[test]
    fn short_atom_line_is_a_mismatch() {
        let text = molfile(
            "  1  0  0  0  0  0  0  0  0  0999 V2000",
            &["    0.0000    0.0000    0.0000 C"],
        );
        assert!(matches!(
            read_str(&text).unwrap_err(),
            Error::FormatMismatch { line: 5, .. }
        ));
    }

    #[test]
    fn comma_decimal_is_a_mismatch() {
        let text = molfile(
            "  1  0  0  0  0  0  0  0  0  0999 V2000",
            &["    0,0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0"],
        );
        let err = read_str(&text).unwrap_err();
        assert!(err.to_string().contains("invalid x coordinate"));
    }

    #[test]
    fn truncated_atom_block_is_a_mismatch() {
        let text = format!(
            "{HEADER}  2  0  0  0  0  0  0  0  0  0999 V2000\n{}\n",
            "    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0"
        );
        assert!(matches!(
            read_str(&text).unwrap_err(),
            Error::FormatMismatch { line: 6, .. }
        ));
    }

    #[test]
    fn truncated_bond_block_is_a_mismatch() {
        let text = format!(
            "{HEADER}  2  2  0  0  0  0  0  0  0  0999 V2000\n{}\n{}\n{}\n",
            "    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0",
            "    1.2000    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0",
            "  1  2  2  0  0  0  0"
        );
        match read_str(&text).unwrap_err() {
            Error::FormatMismatch { line, details } => {
                assert_eq!(line, 8);
                assert_eq!(details, "bond block ended early");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn read_bytes(bytes: &[u8]) -> Result<Molecule, Error> {
        MolReader::new().read(Cursor::new(bytes))
    }

    const CARBON_BODY: &str = concat!(
        "  1  0  0  0  0  0  0  0  0  0999 V2000\n",
        "    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0\n",
        "M END\n",
    );

    #[test]
    fn latin1_name_line_is_decoded_lossily() {
        let mut text = b"Caf\xe9ine\n  mforge10182614303D\n\n".to_vec();
        text.extend_from_slice(CARBON_BODY.as_bytes());
        let molecule = read_bytes(&text).unwrap();
        assert_eq!(molecule.atom_count(), 1);
        assert!(molecule.name.starts_with("Caf"));
        assert!(molecule.name.ends_with("ine"));
    }

    #[test]
    fn latin1_comment_line_is_skipped() {
        let mut text = b"Water\n  mforge10182614303D\n25\xb0C sample\n".to_vec();
        text.extend_from_slice(CARBON_BODY.as_bytes());
        let molecule = read_bytes(&text).unwrap();
        assert_eq!(molecule.name, "Water");
        assert_eq!(molecule.atom_count(), 1);
    }

    #[test]
    fn recovery_scan_skips_non_utf8_lines() {
        let mut text = HEADER.as_bytes().to_vec();
        text.extend_from_slice(b"\xff\xfe  1  0  0  0  0  0  0  0  0  0999 V2000 \xff\n");
        text.extend_from_slice(CARBON_BODY.as_bytes());
        let molecule = read_bytes(&text).unwrap();
        assert_eq!(molecule.atom_count(), 1);
        assert_eq!(molecule.atoms[0].element, Element::C);
    }

    #[test]
    fn non_utf8_atom_line_is_a_mismatch() {
        let mut text = HEADER.as_bytes().to_vec();
        text.extend_from_slice(b"  1  0  0  0  0  0  0  0  0  0999 V2000\n");
        text.extend_from_slice(b"    0.0000    0.0000    0.0000 \xc7   0  0  0\n");
        assert!(matches!(
            read_bytes(&text).unwrap_err(),
            Error::FormatMismatch { line: 5, .. }
        ));
    }

    #[test]
    fn bond_specifiers_outside_one_to_three_are_ignored() {
        let text = molfile(
            "  3  2  0  0  0  0  0  0  0  0999 V2000",
            &[
                "    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0",
                "    1.4000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0",
                "    2.8000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0",
                "  1  2  4  0  0  0  0",
                "  2  3  2  0  0  0  0",
            ],
        );
        let molecule = read_str(&text).unwrap();
        assert_eq!(molecule.bonds.order(0, 1), 0.0);
        assert_eq!(molecule.bonds.order(1, 2), 2.0);
        assert_eq!(molecule.bond_count(), 1);
    }

    #[test]
    fn malformed_bond_lines_are_mismatches() {
        let atoms = [
            "    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0",
            "    1.4000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0",
        ];
        for bond in ["  1  2", "  1  x  1", "  0  2  1", "  1  3  1", "  2  2  1"] {
            let text = molfile(
                "  2  1  0  0  0  0  0  0  0  0999 V2000",
                &[atoms[0], atoms[1], bond],
            );
            assert!(
                matches!(read_str(&text), Err(Error::FormatMismatch { line: 7, .. })),
                "bond line {bond:?} should be rejected"
            );
        }
    }

    #[test]
    fn custom_resolver_is_consulted() {
        struct CarbonOnly;
        impl ElementResolver for CarbonOnly {
            fn resolve(&self, symbol: &str) -> Option<Element> {
                (symbol == "C").then_some(Element::C)
            }
            fn symbol(&self, _element: Element) -> &str {
                "C"
            }
        }

        let reader = MolReader::with_resolver(CarbonOnly);
        let err = reader.read(Cursor::new(water().into_bytes())).unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { line: 5, .. }));
    }
}
