use std::io::{self, Write};

use anyhow::{Context, Result};

use super::{display_path, read_molecule};
use crate::cli::InfoArgs;
use crate::display::{
    Context as DisplayContext, Progress, print_bond_types, print_element_distribution,
    print_molecule_summary,
};

const TOTAL_STEPS: u8 = 1;

pub fn run_info(args: InfoArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let molecule = read_molecule(&args.common)?;
    let source = display_path(args.common.input.as_deref(), "stdin");
    progress.complete_step("Reading structure", &[format!("Parse MOL file ← {}", source)]);
    progress.finish("Read complete");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    print_molecule_summary(&mut out, &molecule);
    print_element_distribution(&mut out, &molecule);
    print_bond_types(&mut out, &molecule);

    out.flush().context("Failed to write summary")?;

    Ok(())
}
