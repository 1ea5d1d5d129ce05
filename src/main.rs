//! dbjack: a jackknife of command-line tools for MySQL database
//! administration.
//!
//! This is the main entry point for the `dbjack` CLI. It parses the global
//! flags and hands everything else to the dispatcher, which configures
//! logging, discovers the available commands, runs the selected one, and
//! resolves its outcome to a process exit code.

mod cli;
pub mod cmd;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod exit_codes;
pub mod interrupt;
pub mod logging;
pub mod runner;

use cli::GlobalOptions;
use std::process::ExitCode;

fn main() -> ExitCode {
    let opts = GlobalOptions::parse_args();
    ExitCode::from(dispatch::run(opts) as u8)
}
