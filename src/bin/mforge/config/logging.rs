use log::LevelFilter;

const CRATES: &[&str] = &["mol_forge", "mforge"];

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn filter_string(level: LevelFilter) -> String {
    let level = level.as_str().to_lowercase();
    CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the stderr logger. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbosity: u8) {
    let filter = filter_string(level_for(verbosity));
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .try_init();
}
