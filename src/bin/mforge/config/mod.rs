mod header;
mod logging;

pub use header::build_write_options;
pub use logging::init_logging;
