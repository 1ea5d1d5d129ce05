//! Split a mysqldump stream into per-table files.
//!
//! Reads the dump on stdin and writes one file per table (or view,
//! routines, events section) under the target directory, one
//! subdirectory per database. Every output file starts with the dump
//! header, so it can be replayed on its own.

mod parser;
mod writer;


use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::cmd::util::units;
use crate::error::{DbjackError, Result};
use crate::interrupt;
use crate::runner::{Command, CommandContext, CommandRegistry};

use writer::{SplitWriter, TableFilter};

/// Registration hook.
pub fn register(registry: &mut CommandRegistry) -> anyhow::Result<()> {
    registry.register(Box::new(Sieve));
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "sieve")]
struct SieveArgs {
    /// Directory to write table files into.
    #[arg(short = 'C', long = "directory", value_name = "PATH", default_value = ".")]
    directory: PathBuf,

    /// Only split out sections matching this db.table glob. Repeatable.
    #[arg(short = 't', long = "table", value_name = "GLOB")]
    tables: Vec<String>,

    /// Skip sections matching this db.table glob. Repeatable.
    #[arg(short = 'T', long = "exclude-table", value_name = "GLOB")]
    exclude_tables: Vec<String>,

    /// Pipe each output file through this compression command.
    #[arg(short = 'z', long = "compress-command", value_name = "COMMAND")]
    compress_command: Option<String>,
}

struct Sieve;

impl Command for Sieve {
    fn name(&self) -> &'static str {
        "sieve"
    }

    fn about(&self) -> &'static str {
        "Split a mysqldump stream from stdin into per-table files"
    }

    fn synopsis(&self) -> &'static str {
        "[options] < dump.sql"
    }

    fn options(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "-C, --directory <PATH>",
                "directory to write table files into (default: .)",
            ),
            (
                "-t, --table <GLOB>",
                "only split out sections matching this db.table glob",
            ),
            (
                "-T, --exclude-table <GLOB>",
                "skip sections matching this db.table glob",
            ),
            (
                "-z, --compress-command <COMMAND>",
                "pipe each output file through this command",
            ),
        ]
    }

    fn run(&self, ctx: &CommandContext) -> Result<()> {
        let argv = std::iter::once(self.name().to_string()).chain(ctx.args.iter().cloned());
        let args =
            SieveArgs::try_parse_from(argv).map_err(|err| DbjackError::failed(err.to_string()))?;

        let filter = TableFilter::new(&args.tables, &args.exclude_tables)
            .map_err(|err| DbjackError::failed(format!("invalid table pattern: {err}")))?;

        let compress = match &args.compress_command {
            Some(command) => {
                let argv = shell_words::split(command).map_err(|err| {
                    DbjackError::failed(format!("invalid compress command: {err}"))
                })?;
                if argv.is_empty() {
                    return Err(DbjackError::failed("empty compress command"));
                }
                Some(argv)
            }
            None => None,
        };

        let mut writer = SplitWriter::new(args.directory.clone(), filter, compress);
        let stdin = io::stdin();
        split(&mut stdin.lock(), &mut writer)?;
        let summary = writer.finish()?;

        info!(
            "wrote {} files ({}) under {}",
            summary.files,
            units::format_bytes(summary.bytes),
            args.directory.display()
        );
        Ok(())
    }
}

/// Pumps `input` through the writer, checking for interruption between
/// lines.
fn split<R: BufRead>(input: &mut R, writer: &mut SplitWriter) -> Result<()> {
    let mut buf: Vec<u8> = Vec::with_capacity(8 * 1024);
    loop {
        interrupt::check()?;
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .map_err(|err| DbjackError::Unexpected(err.into()))?;
        if read == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        writer.line(&buf)?;
    }
}
