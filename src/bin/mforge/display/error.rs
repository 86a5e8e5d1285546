use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = collect_hints(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Vec<String> {
    use mol_forge::IoError;

    let mut hints = Vec::new();

    match err.downcast_ref::<IoError>() {
        Some(IoError::Io { source }) => std_io_hints(source, &mut hints),

        Some(IoError::FormatUnsupported(name)) => {
            hints.push(format!("'{}' is not a supported format", name));
            hints.push("Only MDL Molfiles (mol) can be read and written".into());
        }

        Some(IoError::FormatMismatch { line, .. }) => {
            hints.push(format!("Inspect the input around line {}", line));
            hints.push(
                "Atom lines need x, y and z in 10-column fields followed by an element symbol"
                    .into(),
            );
            hints.push("Bond lines need two 1-based atom indices and a bond type".into());
        }

        Some(IoError::UnsupportedVersion { version }) => {
            hints.push(format!("The counts line declares '{}'", version));
            hints.push("Only V2000 connection tables are handled".into());
            if version == "V3000" {
                hints.push("Convert the file to V2000 with another tool first".into());
            }
        }

        Some(IoError::NonFiniteCoordinate { atom, .. }) => {
            hints.push(format!("Atom {} has a NaN or infinite position", atom + 1));
        }

        Some(IoError::FieldOverflow { field, width, .. }) => {
            hints.push(format!(
                "The {} does not fit the {}-column V2000 field",
                field, width
            ));
            if *field == "program name" || *field == "initials" {
                hints.push("Shorten --program or --initials".into());
            } else {
                hints.push("V2000 allows at most 999 atoms and bonds".into());
            }
        }

        Some(IoError::InvalidHeader(_)) => {
            hints.push("Header fields must be single-line printable text".into());
        }

        None => fallback_hints(err, &mut hints),
    }

    hints
}

fn std_io_hints(source: &io::Error, hints: &mut Vec<String>) {
    use std::io::ErrorKind;

    let (first, second) = match source.kind() {
        ErrorKind::NotFound => (
            "File or directory not found",
            "Check the path spelling and ensure the file exists",
        ),
        ErrorKind::PermissionDenied => (
            "Permission denied accessing the file",
            "Check file permissions with `ls -la`",
        ),
        ErrorKind::InvalidData => (
            "File contains invalid or non-UTF-8 data",
            "Molfiles are plain ASCII text",
        ),
        ErrorKind::BrokenPipe => (
            "Output consumer terminated early",
            "This may occur when piping to commands like `head`",
        ),
        _ => (
            "I/O operation failed",
            "Check file path, permissions, and disk space",
        ),
    };

    hints.push(first.into());
    hints.push(second.into());
}

fn fallback_hints(err: &Error, hints: &mut Vec<String>) {
    let msg = error_chain_text(err);

    if msg.contains("terminal") || msg.contains("stdin") {
        hints.push("Provide input via -i/--input or pipe data to stdin".into());
    } else if msg.contains("infer format") {
        hints.push("Use a .mol extension or pass --infmt/--outfmt".into());
    } else if msg.contains("no such file") || msg.contains("not found") {
        hints.push("Check that the file path is correct".into());
    } else if msg.contains("permission denied") {
        hints.push("Ensure you have the required access rights".into());
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
