/// CLI argument definitions for the `todocheck` command.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::report::Format;

#[derive(Parser)]
#[command(
    name = "todocheck",
    version,
    about = "Checks that TODO comments reference open issues in your issue tracker",
    long_about = "\
Checks that TODO comments reference open issues in your issue tracker.

Every comment containing a TODO must reference an issue, as in
`// TODO 123: message`. A TODO without a reference is reported as malformed;
one whose issue is closed or doesn't exist is reported too.

Exit status: 0 when clean, 1 on errors or invalid configuration, 2 when TODO
findings were reported, 3 on an internal error."
)]
pub struct Cli {
    /// Root directory to scan
    #[arg(long, default_value = ".")]
    pub basepath: PathBuf,

    /// Configuration file (default: <basepath>/.todocheck.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Standard)]
    pub format: Format,

    /// Log skipped paths, files read and issue lookups to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a shell completion script to stdout
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
