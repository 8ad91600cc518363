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
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "trpscan - Finds side-chain hydrogen-bond donors near tryptophan indole nitrogens in protein structure files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to scan files in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan every structure file in a directory and append the contacts to one table.
    Scan(ScanArgs),
    /// Scan a single structure file.
    File(FileArgs),
    /// Extract secondary-structure and accessibility columns from annotation listings.
    Annotations(AnnotationArgs),
}

/// Scan parameters shared by `scan` and `file`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanOverrides {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Neighbour search radius in Angstroms (inclusive).
    #[arg(short, long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Residue name of the query atoms.
    #[arg(long, value_name = "NAME")]
    pub query_residue: Option<String>,

    /// Atom name of the query atoms.
    #[arg(long, value_name = "NAME")]
    pub query_atom: Option<String>,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory containing the structure files.
    #[arg(value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Result table the contacts are appended to.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Extension of the structure files to scan.
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Also write each model of a multi-model entry to its own file.
    /// `--write-models=false` overrides a configuration file that enables it.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub write_models: Option<bool>,

    /// Start a fresh result table instead of appending.
    #[arg(long)]
    pub truncate: bool,

    #[command(flatten)]
    pub scan: ScanOverrides,
}

/// Arguments for the `file` subcommand.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Path to the structure file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Append the contacts to this table instead of printing them.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write each model of a multi-model entry to its own file.
    /// `--write-models=false` overrides a configuration file that enables it.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub write_models: Option<bool>,

    #[command(flatten)]
    pub scan: ScanOverrides,
}

/// Arguments for the `annotations` subcommand.
#[derive(Args, Debug)]
pub struct AnnotationArgs {
    /// Base path of the first structure (`<FIRST>.ssm` and `<FIRST>.psa` are read).
    #[arg(value_name = "FIRST")]
    pub first: PathBuf,

    /// Base path of the second structure.
    #[arg(value_name = "SECOND")]
    pub second: PathBuf,
}
