mod convert;
mod info;

use convert::run_convert;
use info::run_info;

use std::path::Path;

use anyhow::{Context, Result, bail};

use mol_forge::{Format, MolReader, Molecule};

use crate::cli::{Command, CommonOptions};
use crate::display::Context as DisplayContext;
use crate::io::{format_from_path, open_input};

pub fn dispatch(command: Command, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Convert(args) => run_convert(args, ctx),
        Command::Info(args) => run_info(args, ctx),
    }
}

/// Explicit format, then the file extension. Streams default to Molfile.
fn resolve_format(explicit: Option<Format>, path: Option<&Path>, flag: &str) -> Result<Format> {
    if let Some(format) = explicit {
        return Ok(format);
    }

    match path {
        Some(path) => format_from_path(path).with_context(|| {
            format!(
                "Cannot infer format from '{}'. Use {} to specify.",
                path.display(),
                flag
            )
        }),
        None => Ok(Format::Mol),
    }
}

fn read_molecule(common: &CommonOptions) -> Result<Molecule> {
    let format = resolve_format(
        common.input_format.map(Into::into),
        common.input.as_deref(),
        "--infmt",
    )?;
    if !format.support().can_read() {
        bail!("{} files cannot be read", format);
    }

    let input = open_input(common.input.as_deref())?;
    match format {
        Format::Mol => MolReader::new()
            .read(input)
            .context("Failed to read structure"),
    }
}

fn display_path(path: Option<&Path>, fallback: &str) -> String {
    path.and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}
