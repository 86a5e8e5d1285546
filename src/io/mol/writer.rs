use std::fmt::Write as _;
use std::io::Write;

use chrono::{Local, NaiveDateTime};
use log::debug;

use super::{DEFAULT_NAME, DEFAULT_PROGRAM, END_LINE, V2000};
use crate::io::columns::NumericFormat;
use crate::io::discretize::{bond_type, valences};
use crate::io::error::Error;
use crate::model::{
    bonds::BondOrderCollection,
    resolver::{ElementResolver, PeriodicTable},
    system::AtomCollection,
    units::bohr_to_angstrom,
};

const INITIALS_WIDTH: usize = 2;
const PROGRAM_WIDTH: usize = 8;
const SYMBOL_WIDTH: usize = 3;
const TIMESTAMP_FORMAT: &str = "%m%d%y%H%M";
const DIMENSIONALITY: &str = "3D";

/// Writes one V2000 record with the default header and periodic table.
///
/// `version` must be `"V2000"`.
pub fn write<W: Write>(
    writer: W,
    atoms: &AtomCollection,
    bonds: Option<&BondOrderCollection>,
    version: &str,
) -> Result<(), Error> {
    MolWriter::new().write(writer, atoms, bonds, version)
}

/// Header fields of a written record.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Molecule name line.
    pub name: String,
    /// User initials, at most two ASCII characters.
    pub initials: String,
    /// Program identifier, at most eight ASCII characters.
    pub program: String,
    /// Header timestamp; the local clock at write time when `None`.
    pub timestamp: Option<NaiveDateTime>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            initials: String::new(),
            program: DEFAULT_PROGRAM.to_string(),
            timestamp: None,
        }
    }
}

/// V2000 Molfile writer.
///
/// The whole record is validated and rendered before anything reaches the
/// output, so a failed write never leaves a truncated record behind.
#[derive(Debug, Clone)]
pub struct MolWriter<E = PeriodicTable> {
    resolver: E,
    numeric: NumericFormat,
    options: WriteOptions,
}

impl MolWriter<PeriodicTable> {
    pub fn new() -> Self {
        Self::with_resolver(PeriodicTable)
    }
}

impl Default for MolWriter<PeriodicTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ElementResolver> MolWriter<E> {
    pub fn with_resolver(resolver: E) -> Self {
        Self {
            resolver,
            numeric: NumericFormat::V2000,
            options: WriteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = name.into();
        self
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.options.program = program.into();
        self
    }

    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.options.timestamp = Some(timestamp);
        self
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    pub fn write<W: Write>(
        &self,
        mut writer: W,
        atoms: &AtomCollection,
        bonds: Option<&BondOrderCollection>,
        version: &str,
    ) -> Result<(), Error> {
        let record = self.render(atoms, bonds, version)?;
        writer.write_all(record.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Renders the record as text without writing it anywhere.
    pub fn render(
        &self,
        atoms: &AtomCollection,
        bonds: Option<&BondOrderCollection>,
        version: &str,
    ) -> Result<String, Error> {
        if version != V2000 {
            return Err(Error::unsupported_version(version));
        }

        let n = atoms.len();
        let valences = valences(n, bonds);
        let bond_total = valences.iter().sum::<usize>() / 2;

        let atom_count = self
            .numeric
            .format_count(n)
            .ok_or_else(|| Error::overflow("atom count", n, self.numeric.count_width))?;
        let bond_count = self
            .numeric
            .format_count(bond_total)
            .ok_or_else(|| Error::overflow("bond count", bond_total, self.numeric.count_width))?;

        // fmt::Write for String is infallible; the `let _ = write!` results below are always Ok.
        let mut out = String::new();
        self.render_header(&mut out)?;

        let _ = write!(out, "{atom_count}{bond_count}");
        for _ in 0..8 {
            let _ = write!(out, "{:>3}", 0);
        }
        let _ = writeln!(out, "{:>3}{:>6}", 999, version);

        for (index, atom) in atoms.iter().enumerate() {
            let angstrom = bohr_to_angstrom(atom.position);
            for (value, axis) in angstrom.into_iter().zip(['x', 'y', 'z']) {
                if !value.is_finite() {
                    return Err(Error::NonFiniteCoordinate { atom: index, axis });
                }
                let text = self.numeric.format_coordinate(value).ok_or_else(|| {
                    Error::overflow("coordinate", value, self.numeric.coordinate_width)
                })?;
                out.push_str(&text);
            }

            let symbol = self.resolver.symbol(atom.element);
            if symbol.is_empty() || symbol.len() > SYMBOL_WIDTH {
                return Err(Error::overflow("element symbol", symbol, SYMBOL_WIDTH));
            }
            // dd ccc sss hhh bbb vvv HHH rrr iii mmm nnn eee
            let _ = writeln!(
                out,
                " {:<3}{:>2}{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}",
                symbol, 0, 0, 0, 0, 0, valences[index], 0, 0, 0, 0, 0, 0
            );
        }

        let mut bond_lines = 0usize;
        if let Some(bonds) = bonds {
            for (i, j, order) in bonds.iter() {
                if j >= n {
                    continue;
                }
                let Some(kind) = bond_type(order) else {
                    continue;
                };
                let _ = writeln!(
                    out,
                    "{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}{:>3}",
                    i + 1,
                    j + 1,
                    kind.code(),
                    0,
                    0,
                    0,
                    0
                );
                bond_lines += 1;
            }
        }

        let _ = writeln!(out, "{END_LINE}");

        debug!(
            "rendered MOL record '{}': {} atoms, {} bonds ({} bond lines)",
            self.options.name, n, bond_total, bond_lines
        );
        Ok(out)
    }

    fn render_header(&self, out: &mut String) -> Result<(), Error> {
        let WriteOptions {
            name,
            initials,
            program,
            timestamp,
        } = &self.options;

        if name.contains(['\n', '\r']) {
            return Err(Error::InvalidHeader(
                "molecule name must be a single line".to_string(),
            ));
        }
        for (label, value, width) in [
            ("initials", initials, INITIALS_WIDTH),
            ("program name", program, PROGRAM_WIDTH),
        ] {
            if !value.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
                return Err(Error::InvalidHeader(format!(
                    "{label} must be printable ASCII"
                )));
            }
            if value.len() > width {
                return Err(Error::overflow(label, value, width));
            }
        }

        let stamp = timestamp
            .unwrap_or_else(|| Local::now().naive_local())
            .format(TIMESTAMP_FORMAT);

        let _ = writeln!(out, "{name}");
        let _ = writeln!(out, "{initials:>2}{program:>8}{stamp}{DIMENSIONALITY}");
        let _ = writeln!(out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::mol::{V3000, reader};
    use crate::model::{atom::Atom, types::Element, units::BOHR_PER_ANGSTROM};
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .expect("valid date")
    }

    fn writer() -> MolWriter {
        MolWriter::new().timestamp(fixed_time())
    }

    fn render(atoms: &AtomCollection, bonds: Option<&BondOrderCollection>) -> String {
        writer().render(atoms, bonds, V2000).expect("render")
    }

    fn chain(orders: &[f64]) -> (AtomCollection, BondOrderCollection) {
        let atoms: AtomCollection = (0..=orders.len())
            .map(|k| Atom::new(Element::C, [2.9 * k as f64, 0.0, 0.0]))
            .collect();
        let mut bonds = BondOrderCollection::new(atoms.len());
        for (k, &order) in orders.iter().enumerate() {
            bonds.set_order(k, k + 1, order).unwrap();
        }
        (atoms, bonds)
    }

    fn counts_of(text: &str) -> (usize, usize) {
        let counts = text.lines().nth(3).expect("counts line");
        (
            counts[0..3].trim().parse().unwrap(),
            counts[3..6].trim().parse().unwrap(),
        )
    }

    fn valence_field(atom_line: &str) -> usize {
        atom_line[48..51].trim().parse().unwrap()
    }

    #[test]
    fn empty_molecule_is_header_counts_and_terminator() {
        let text = render(&AtomCollection::new(), None);
        assert_eq!(
            text,
            "Unnamed Molecule\n    mforge10182614303D\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM END\n"
        );
    }

    #[test]
    fn single_carbon_at_origin() {
        let atoms: AtomCollection = [Atom::new(Element::C, [0.0; 3])].into_iter().collect();
        let text = render(&atoms, None);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "  1  0  0  0  0  0  0  0  0  0999 V2000");
        assert_eq!(
            lines[4],
            "    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0"
        );
        assert_eq!(&lines[4][31..33], "C ");
        assert_eq!(valence_field(lines[4]), 0);
        assert_eq!(lines[5], "M END");
    }

    #[test]
    fn header_uses_configured_fields() {
        let text = writer()
            .name("Ethanol")
            .program("tool")
            .render(&AtomCollection::new(), None, V2000)
            .unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Ethanol"));
        assert_eq!(lines.next(), Some("      tool10182614303D"));
        assert_eq!(lines.next(), Some(""));
    }

    #[test]
    fn bond_at_three_and_a_half_is_dropped() {
        let (atoms, bonds) = chain(&[3.5]);
        let text = render(&atoms, Some(&bonds));
        assert_eq!(counts_of(&text), (2, 0));
        assert_eq!(text.lines().count(), 4 + 2 + 1);
        let atom_line = text.lines().nth(4).unwrap();
        assert_eq!(valence_field(atom_line), 0);
    }

    #[test]
    fn bond_just_below_three_and_a_half_is_triple() {
        let (atoms, bonds) = chain(&[3.49999]);
        let text = render(&atoms, Some(&bonds));
        assert_eq!(counts_of(&text), (2, 1));
        assert_eq!(text.lines().nth(6), Some("  1  2  3  0  0  0  0"));
        assert_eq!(valence_field(text.lines().nth(4).unwrap()), 1);
    }

    #[test]
    fn bond_just_below_one_half_counts_nowhere() {
        let (atoms, bonds) = chain(&[0.49999]);
        let text = render(&atoms, Some(&bonds));
        assert_eq!(counts_of(&text), (2, 0));
        assert_eq!(valence_field(text.lines().nth(4).unwrap()), 0);
        assert_eq!(valence_field(text.lines().nth(5).unwrap()), 0);
        assert_eq!(text.lines().nth(6), Some("M END"));
    }

    #[test]
    fn bond_at_one_half_counts_for_valence_and_rounds_to_single() {
        let (atoms, bonds) = chain(&[0.5]);
        let text = render(&atoms, Some(&bonds));
        assert_eq!(counts_of(&text), (2, 1));
        assert_eq!(valence_field(text.lines().nth(4).unwrap()), 1);
        assert_eq!(text.lines().nth(6), Some("  1  2  1  0  0  0  0"));
    }

    #[test]
    fn valence_counts_every_incident_bond() {
        let (atoms, mut bonds) = chain(&[1.0, 2.0]);
        bonds.set_order(0, 2, 1.2).unwrap();
        let text = render(&atoms, Some(&bonds));
        assert_eq!(counts_of(&text), (3, 3));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(valence_field(lines[4]), 2);
        assert_eq!(valence_field(lines[5]), 2);
        assert_eq!(valence_field(lines[6]), 2);
        assert_eq!(lines[7], "  1  2  1  0  0  0  0");
        assert_eq!(lines[8], "  1  3  1  0  0  0  0");
        assert_eq!(lines[9], "  2  3  2  0  0  0  0");
    }

    #[test]
    fn round_trip_preserves_elements_orders_and_positions() {
        let at = |element, xyz: [f64; 3]| Atom::new(element, xyz.map(|v| v * BOHR_PER_ANGSTROM));
        let atoms: AtomCollection = [
            at(Element::C, [0.0, 0.0, 0.0]),
            at(Element::O, [1.2013, 0.0688, -0.2117]),
            at(Element::N, [-0.7938, 1.0054, 0.4233]),
            at(Element::Cl, [0.1588, -1.6404, 0.5821]),
        ]
        .into_iter()
        .collect();
        let mut bonds = BondOrderCollection::new(4);
        bonds.set_order(0, 1, 1.87).unwrap();
        bonds.set_order(0, 2, 2.9).unwrap();
        bonds.set_order(0, 3, 1.02).unwrap();
        bonds.set_order(1, 2, 0.2).unwrap();

        let mut buf = Vec::new();
        writer()
            .write(&mut buf, &atoms, Some(&bonds), V2000)
            .expect("write mol");
        let parsed = reader::read(Cursor::new(buf)).expect("read mol");

        assert_eq!(
            parsed.atoms.elements().collect::<Vec<_>>(),
            atoms.elements().collect::<Vec<_>>()
        );
        for (a, b) in atoms.iter().zip(parsed.atoms.iter()) {
            for k in 0..3 {
                assert!((a.position[k] - b.position[k]).abs() < 5e-5);
            }
        }
        for i in 0..4 {
            for j in (i + 1)..4 {
                let expected = bond_type(bonds.order(i, j)).map_or(0.0, |t| t.value());
                assert_eq!(parsed.bonds.order(i, j), expected, "pair {i}-{j}");
            }
        }
    }

    #[test]
    fn rejects_other_versions() {
        let atoms = AtomCollection::new();
        for tag in [V3000, "V2001", ""] {
            let err = writer().render(&atoms, None, tag).unwrap_err();
            assert!(matches!(err, Error::UnsupportedVersion { ref version } if version == tag));
        }
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let atoms: AtomCollection = [
            Atom::new(Element::H, [0.0; 3]),
            Atom::new(Element::H, [0.0, f64::NAN, 0.0]),
        ]
        .into_iter()
        .collect();
        let mut buf = Vec::new();
        let err = writer().write(&mut buf, &atoms, None, V2000).unwrap_err();
        assert!(matches!(err, Error::NonFiniteCoordinate { atom: 1, axis: 'y' }));
        assert!(buf.is_empty());
    }

    #[test]
    fn rejects_coordinates_wider_than_the_field() {
        let x = -20000.0 * BOHR_PER_ANGSTROM;
        let atoms: AtomCollection = [Atom::new(Element::H, [x, 0.0, 0.0])].into_iter().collect();
        let err = writer().render(&atoms, None, V2000).unwrap_err();
        assert!(matches!(err, Error::FieldOverflow { field: "coordinate", width: 10, .. }));
    }

    #[test]
    fn rejects_more_than_999_atoms() {
        let atoms: AtomCollection = (0..1000)
            .map(|k| Atom::new(Element::He, [k as f64, 0.0, 0.0]))
            .collect();
        let err = writer().render(&atoms, None, V2000).unwrap_err();
        assert!(matches!(err, Error::FieldOverflow { field: "atom count", width: 3, .. }));
    }

    #[test]
    fn rejects_bad_header_fields() {
        let atoms = AtomCollection::new();
        let err = writer().name("two\nlines").render(&atoms, None, V2000).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));

        let err = writer()
            .program("much-too-long")
            .render(&atoms, None, V2000)
            .unwrap_err();
        assert!(matches!(err, Error::FieldOverflow { field: "program name", .. }));
    }

    #[test]
    fn does_not_modify_inputs() {
        let (atoms, bonds) = chain(&[1.0, 2.6]);
        let before = (atoms.clone(), bonds.clone());
        render(&atoms, Some(&bonds));
        assert_eq!((atoms, bonds), before);
    }
}
