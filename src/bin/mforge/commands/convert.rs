use anyhow::{Context, Result, bail};
use log::info;

use mol_forge::io::mol::V2000;
use mol_forge::{Format, MolWriter};

use super::{display_path, read_molecule, resolve_format};
use crate::cli::ConvertArgs;
use crate::config::build_write_options;
use crate::display::{Context as DisplayContext, Progress};
use crate::io::write_output;

const TOTAL_STEPS: u8 = 2;

pub fn run_convert(args: ConvertArgs, ctx: DisplayContext) -> Result<()> {
    let output_format = resolve_format(
        args.io.output_format.map(Into::into),
        args.io.output.as_deref(),
        "--outfmt",
    )?;
    if !output_format.support().can_write() {
        bail!("{} files cannot be written", output_format);
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let molecule = read_molecule(&args.io.common)?;
    let source = display_path(args.io.common.input.as_deref(), "stdin");
    progress.complete_step(
        "Reading structure",
        &[
            format!("Parse MOL file ← {}", source),
            format!(
                "{} atoms, {} bonds",
                molecule.atom_count(),
                molecule.bond_count()
            ),
        ],
    );

    progress.step("Writing output");
    let options = build_write_options(&args.header, &molecule.name);
    let bonds = (!args.no_bonds).then_some(&molecule.bonds);

    let record = match output_format {
        Format::Mol => MolWriter::new()
            .with_options(options)
            .render(&molecule.atoms, bonds, V2000)
            .context("Failed to write structure")?,
    };

    write_output(args.io.output.as_deref(), record.as_bytes())?;

    let target = display_path(args.io.output.as_deref(), "stdout");
    info!(
        "wrote {} atoms to {} ({} bond block)",
        molecule.atom_count(),
        target,
        if args.no_bonds { "without" } else { "with" }
    );

    let mut write_substeps = vec![format!("Write {} {} → {}", output_format, V2000, target)];
    if args.no_bonds {
        write_substeps.push("Bond block omitted".to_string());
    }
    progress.complete_step("Writing output", &write_substeps);

    progress.finish("Conversion complete");

    Ok(())
}
