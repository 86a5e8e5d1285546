mod banner;
mod error;
mod progress;
mod tables;

use std::io::{self, IsTerminal};

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_bond_types, print_element_distribution, print_molecule_summary};

/// Whether spinners and the banner are drawn on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn for_stderr(quiet: bool) -> Self {
        Self::resolve(quiet, io::stderr().is_terminal())
    }

    fn resolve(quiet: bool, terminal: bool) -> Self {
        Self {
            interactive: terminal && !quiet,
        }
    }
}
