use mol_forge::WriteOptions;

use crate::cli::HeaderOptions;

/// Header for the output record. Without `--name` the input's name line is
/// carried over, and an empty one falls back to the library default.
pub fn build_write_options(opts: &HeaderOptions, input_name: &str) -> WriteOptions {
    let defaults = WriteOptions::default();

    let name = match &opts.name {
        Some(name) => name.clone(),
        None if !input_name.trim().is_empty() => input_name.trim().to_string(),
        None => defaults.name,
    };

    WriteOptions {
        name,
        initials: opts.initials.clone(),
        program: opts.program.clone(),
        timestamp: None,
    }
}
