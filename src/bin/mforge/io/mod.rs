mod infer;

pub use infer::format_from_path;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Opens the Molfile source: the named file, or stdin when no path is given.
/// Stdin attached to a terminal is refused.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open input file: {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None if io::stdin().is_terminal() => bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mforge <COMMAND> -i <INPUT> or pipe data via stdin."
        ),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Writes an already rendered record to the named file, or stdout.
/// The file is not created until the record exists.
pub fn write_output(path: Option<&Path>, record: &[u8]) -> Result<()> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?;
            write_record(BufWriter::new(file), record)
                .with_context(|| format!("Failed to write output file: {}", p.display()))
        }
        None => write_record(io::stdout().lock(), record).context("Failed to write to stdout"),
    }
}

fn write_record(mut writer: impl Write, record: &[u8]) -> io::Result<()> {
    writer.write_all(record)?;
    writer.flush()
}
