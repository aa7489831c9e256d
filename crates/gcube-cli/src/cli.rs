use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "gcube - inspect and rewrite Gaussian Cube volumetric data files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a reader configuration file in TOML format
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the header, composition and per-grid statistics of a cube file.
    Info(InfoArgs),
    /// Read a cube file and write one of its grids back out in canonical layout.
    Convert(ConvertArgs),
}

/// Reader overrides shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ReadArgs {
    /// Override `reader.max-voxels`: the largest grid (nx * ny * nz) accepted.
    #[arg(long, value_name = "INT")]
    pub max_voxels: Option<usize>,

    /// Skip bond perception, overriding `reader.perceive-bonds`.
    #[arg(long)]
    pub no_bonds: bool,

    /// Override `bonding.tolerance` (Angstrom added to the sum of covalent radii).
    #[arg(long, value_name = "FLOAT")]
    pub bond_tolerance: Option<f64>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the input cube file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input cube file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output cube file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Zero-based index of the grid to write. Defaults to the first grid.
    #[arg(short, long, value_name = "INT")]
    pub grid: Option<usize>,

    #[command(flatten)]
    pub read: ReadArgs,
}
