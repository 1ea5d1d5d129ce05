//! Conversion between MySQL table names and their on-disk file names.
//!
//! One package, two commands: `filename-to-tablename` decodes the `@XXXX`
//! escapes MySQL uses on disk, `tablename-to-filename` produces them.

pub mod codec;

use clap::Parser;

use crate::error::{DbjackError, Result};
use crate::runner::{Command, CommandContext, CommandRegistry};

/// Adds both conversion commands.
pub fn register(registry: &mut CommandRegistry) -> anyhow::Result<()> {
    registry.register(Box::new(FilenameToTablename));
    registry.register(Box::new(TablenameToFilename));
    Ok(())
}

#[derive(Parser, Debug)]
struct NameArgs {
    /// Names to convert, one result per line.
    #[arg(value_name = "NAME", required = true, allow_hyphen_values = true)]
    names: Vec<String>,
}

fn parse_names(command: &'static str, ctx: &CommandContext) -> Result<Vec<String>> {
    let argv = std::iter::once(command.to_string()).chain(ctx.args.iter().cloned());
    let args = NameArgs::try_parse_from(argv)
        .map_err(|err| DbjackError::failed(err.to_string()))?;
    Ok(args.names)
}

struct FilenameToTablename;

impl Command for FilenameToTablename {
    fn name(&self) -> &'static str {
        "filename-to-tablename"
    }

    fn about(&self) -> &'static str {
        "Decode MySQL filesystem-encoded names"
    }

    fn synopsis(&self) -> &'static str {
        "<name>..."
    }

    fn run(&self, ctx: &CommandContext) -> Result<()> {
        for name in parse_names(self.name(), ctx)? {
            println!("{}", codec::decode(&name));
        }
        Ok(())
    }
}

struct TablenameToFilename;

impl Command for TablenameToFilename {
    fn name(&self) -> &'static str {
        "tablename-to-filename"
    }

    fn about(&self) -> &'static str {
        "Encode table names the way MySQL names files on disk"
    }

    fn synopsis(&self) -> &'static str {
        "<name>..."
    }

    fn run(&self, ctx: &CommandContext) -> Result<()> {
        for name in parse_names(self.name(), ctx)? {
            let encoded =
                codec::encode(&name).map_err(|err| DbjackError::failed(err.to_string()))?;
            println!("{encoded}");
        }
        Ok(())
    }
}
