use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod run;
pub mod show;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive one command cycle against a configured stim.
    Run(RunArgs),
    /// Print the parsed configuration tables.
    Show(ShowArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args, format),
        Command::Show(args) => show::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration files (.stim, .meas, .flist), one per category.
    #[arg(required = true)]
    pub configs: Vec<PathBuf>,
    /// Name of the stim to drive.
    #[arg(long, short = 's')]
    pub stim: String,
    /// Override the frequency-list index before executing.
    #[arg(long)]
    pub freq_index: Option<usize>,
    /// Override the output power (dBm) before executing.
    #[arg(long, allow_negative_numbers = true)]
    pub power: Option<f64>,
    /// Override the repeat count before executing.
    #[arg(long)]
    pub repeat: Option<usize>,
    /// Skip the connect step (stage parameters only).
    #[arg(long)]
    pub no_connect: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration files (.stim, .meas, .flist), one per category.
    #[arg(required = true)]
    pub configs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
