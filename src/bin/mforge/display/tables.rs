use std::collections::BTreeMap;
use std::io::Write;

use mol_forge::{BondType, Element, Molecule, bohr_to_angstrom};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_ROWS: usize = 15;

pub fn print_molecule_summary(out: &mut impl Write, molecule: &Molecule) {
    let name = if molecule.name.is_empty() {
        "(unnamed)".to_string()
    } else {
        molecule.name.clone()
    };

    let mut rows = vec![
        ("Name", name),
        ("Total Atoms", molecule.atom_count().to_string()),
        ("Total Bonds", molecule.bond_count().to_string()),
        ("Formula", molecule.formula()),
        ("Mass (g/mol)", format!("{:.3}", molecule.molecular_mass())),
    ];

    if let Some(extent) = extent_angstrom(molecule) {
        rows.push((
            "Extent (Å)",
            format!("{:.2} × {:.2} × {:.2}", extent[0], extent[1], extent[2]),
        ));
    }

    print_kv_table(out, "Molecule Summary", &rows);
}

pub fn print_element_distribution(out: &mut impl Write, molecule: &Molecule) {
    let mut counts: BTreeMap<Element, usize> = BTreeMap::new();
    for element in molecule.atoms.elements() {
        *counts.entry(element).or_insert(0) += 1;
    }

    let mut sorted: Vec<_> = counts
        .into_iter()
        .map(|(e, c)| (e.symbol().to_string(), c))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    print_distribution_table(
        out,
        "Element Distribution",
        "Element",
        &sorted,
        molecule.atom_count(),
    );
}

pub fn print_bond_types(out: &mut impl Write, molecule: &Molecule) {
    if molecule.bonds.is_empty() {
        return;
    }

    let mut counts: BTreeMap<Option<BondType>, usize> = BTreeMap::new();
    for (_, _, order) in molecule.bonds.iter() {
        *counts.entry(mol_forge::io::discretize::bond_type(order)).or_insert(0) += 1;
    }

    let rows: Vec<_> = counts
        .into_iter()
        .map(|(kind, c)| {
            let label = kind.map_or_else(|| "Other".to_string(), |k| k.to_string());
            (label, c)
        })
        .collect();

    print_distribution_table(
        out,
        "Bond Types",
        "Type",
        &rows,
        molecule.bond_count(),
    );
}

fn extent_angstrom(molecule: &Molecule) -> Option<[f64; 3]> {
    let mut positions = molecule.atoms.positions().map(bohr_to_angstrom);
    let first = positions.next()?;
    let (min, max) = positions.fold((first, first), |(mut lo, mut hi), p| {
        for k in 0..3 {
            lo[k] = lo[k].min(p[k]);
            hi[k] = hi[k].max(p[k]);
        }
        (lo, hi)
    });
    Some([max[0] - min[0], max[1] - min[1], max[2] - min[2]])
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    label: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let name_line = "─".repeat(name_w + 2);
    let count_line = "─".repeat(count_w + 2);
    let dist_line = "─".repeat(dist_w + 2);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{INDENT}┌{name_line}┬{count_line}┬{dist_line}┐");
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT, label, "Count", "Distribution",
    );
    let _ = writeln!(out, "{INDENT}├{name_line}┼{count_line}┼{dist_line}┤");

    for (name, count) in data.iter().take(MAX_ROWS) {
        let pct = if total == 0 {
            0.0
        } else {
            (*count as f64 / total as f64) * 100.0
        };
        let bar = make_bar(pct, max_bar_width);
        let dist_cell = format!("{}  {:>5.1}%", bar, pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell,
        );
    }

    if data.len() > MAX_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more)", data.len() - MAX_ROWS),
        );
    }

    let _ = writeln!(out, "{INDENT}└{name_line}┴{count_line}┴{dist_line}┘");
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let k_line = "─".repeat(key_w + 2);
    let v_line = "─".repeat(val_w + 2);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{INDENT}┌{k_line}┬{v_line}┐");
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value",
    );
    let _ = writeln!(out, "{INDENT}├{k_line}┼{v_line}┤");

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(out, "{INDENT}└{k_line}┴{v_line}┘");
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = (((pct / 100.0) * max_width as f64).round() as usize).min(max_width);
    let empty = max_width - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
