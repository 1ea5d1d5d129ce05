//! Report OS page cache residency for files.
//!
//! InnoDB warmup and backup tooling cares which parts of a datadir are
//! cached; this is the read-only half (see `uncache` for eviction).

pub mod mincore;

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::cmd::util::units;
use crate::error::{DbjackError, Result};
use crate::interrupt;
use crate::runner::{Command, CommandContext, CommandRegistry};

/// Registration hook.
pub fn register(registry: &mut CommandRegistry) -> anyhow::Result<()> {
    registry.register(Box::new(Fincore));
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "fincore")]
struct FincoreArgs {
    /// Emit one JSON object per file instead of the text report.
    #[arg(short, long)]
    json: bool,

    /// Files to inspect.
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a str,
    page_size: usize,
    total_pages: usize,
    resident_pages: usize,
    resident_bytes: u64,
    percent: f64,
}

struct Fincore;

impl Command for Fincore {
    fn name(&self) -> &'static str {
        "fincore"
    }

    fn about(&self) -> &'static str {
        "Report which pages of a file are in the OS page cache"
    }

    fn synopsis(&self) -> &'static str {
        "[options] <path>..."
    }

    fn options(&self) -> &'static [(&'static str, &'static str)] {
        &[("-j, --json", "emit one JSON object per file")]
    }

    fn run(&self, ctx: &CommandContext) -> Result<()> {
        let argv = std::iter::once(self.name().to_string()).chain(ctx.args.iter().cloned());
        let args =
            FincoreArgs::try_parse_from(argv).map_err(|err| DbjackError::failed(err.to_string()))?;

        for path in &args.paths {
            interrupt::check()?;
            let shown = path.display().to_string();
            let residency = mincore::residency(path)
                .map_err(|err| DbjackError::failed(format!("{shown}: {err}")))?;

            if args.json {
                let report = Report {
                    path: &shown,
                    page_size: residency.page_size,
                    total_pages: residency.total_pages,
                    resident_pages: residency.resident_pages,
                    resident_bytes: residency.resident_bytes(),
                    percent: residency.percent(),
                };
                let line = serde_json::to_string(&report)
                    .map_err(|err| DbjackError::Unexpected(err.into()))?;
                println!("{line}");
            } else {
                println!(
                    "{shown}: {} of {} pages resident ({}, {:.1}%)",
                    residency.resident_pages,
                    residency.total_pages,
                    units::format_bytes(residency.resident_bytes()),
                    residency.percent()
                );
            }
        }
        Ok(())
    }
}
