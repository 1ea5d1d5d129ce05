//! Global command-line interface for dbjack.
//!
//! Only the global flags are parsed here. The first positional token ends
//! global parsing; it and everything after it (hyphenated or not) is
//! captured verbatim and handed to the command runner, so each command
//! parses its own arguments.

use clap::Parser;

/// Global options parsed from the raw process arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dbjack",
    about = "A jackknife of command-line tools for MySQL database administration",
    disable_version_flag = true
)]
pub struct GlobalOptions {
    /// Print the dbjack version and exit.
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Suppress all log output, including error reports.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// Command to run, followed by its arguments.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl GlobalOptions {
    /// Parses global options from the process arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
