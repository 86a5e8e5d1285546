use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use mol_forge::Format;

#[derive(Parser)]
#[command(
    name = "mforge",
    about = "Read, normalize and inspect MDL Molfiles (V2000)",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Re-emit a Molfile as normalized V2000
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Print a summary of a Molfile
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

impl Command {
    pub fn common(&self) -> &CommonOptions {
        match self {
            Command::Convert(args) => &args.io.common,
            Command::Info(args) => &args.common,
        }
    }
}

/// Options shared by all commands.
#[derive(Args)]
pub struct CommonOptions {
    /// Input file (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input format (inferred from extension if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<FileFormat>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args)]
pub struct ConvertIoOptions {
    #[command(flatten)]
    pub common: CommonOptions,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (inferred from extension if not specified)
    #[arg(long = "outfmt", value_name = "FORMAT")]
    pub output_format: Option<FileFormat>,
}

/// Header fields written to the output record.
#[derive(Args)]
#[command(next_help_heading = "Header")]
pub struct HeaderOptions {
    /// Molecule name (defaults to the input's name line)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// User initials (at most 2 characters)
    #[arg(long, value_name = "XX", default_value = "")]
    pub initials: String,

    /// Program name (at most 8 characters)
    #[arg(long, value_name = "PROGRAM", default_value = mol_forge::io::mol::DEFAULT_PROGRAM)]
    pub program: String,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub io: ConvertIoOptions,

    #[command(flatten)]
    pub header: HeaderOptions,

    /// Drop the bond block from the output
    #[arg(long)]
    pub no_bonds: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FileFormat {
    /// MDL Molfile (V2000)
    Mol,
}

impl From<FileFormat> for Format {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Mol => Format::Mol,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
