//! Evict files from the OS page cache.
//!
//! The write half of the page cache pair (see `fincore` for inspection).
//! Useful before benchmarks, or after a backup run has polluted the cache
//! with pages the server will never touch again.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use crate::error::{DbjackError, Result};
use crate::interrupt;
use crate::runner::{Command, CommandContext, CommandRegistry};

/// Registration hook.
pub fn register(registry: &mut CommandRegistry) -> anyhow::Result<()> {
    registry.register(Box::new(Uncache));
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "uncache")]
struct UncacheArgs {
    /// Files to drop from the page cache.
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,
}

#[cfg(target_os = "linux")]
fn evict(path: &Path) -> io::Result<()> {
    use std::fs::File;
    use std::os::fd::AsRawFd;

    let file = File::open(path)?;
    // posix_fadvise reports failure through its return value, not errno.
    let rc = unsafe { libc::posix_fadvise(file.as_raw_fd(), 0, 0, libc::POSIX_FADV_DONTNEED) };
    if rc != 0 {
        return Err(io::Error::from_raw_os_error(rc));
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn evict(_path: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "page cache eviction requires Linux",
    ))
}

struct Uncache;

impl Command for Uncache {
    fn name(&self) -> &'static str {
        "uncache"
    }

    fn about(&self) -> &'static str {
        "Drop files from the OS page cache"
    }

    fn synopsis(&self) -> &'static str {
        "<path>..."
    }

    fn run(&self, ctx: &CommandContext) -> Result<()> {
        let argv = std::iter::once(self.name().to_string()).chain(ctx.args.iter().cloned());
        let args =
            UncacheArgs::try_parse_from(argv).map_err(|err| DbjackError::failed(err.to_string()))?;

        for path in &args.paths {
            interrupt::check()?;
            evict(path).map_err(|err| DbjackError::failed(format!("{}: {err}", path.display())))?;
            info!("uncached {}", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(args: &[&str]) -> CommandContext {
        CommandContext {
            prog: "dbjack".to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn missing_paths_fail() {
        assert!(matches!(
            Uncache.run(&ctx(&[])),
            Err(DbjackError::CommandFailed(_))
        ));
    }

    #[test]
    fn nonexistent_file_is_an_expected_failure() {
        let err = Uncache.run(&ctx(&["/no/such/datafile"])).unwrap_err();
        match err {
            DbjackError::CommandFailed(msg) => assert!(msg.starts_with("/no/such/datafile: ")),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn evicts_a_real_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 4096]).unwrap();
        file.flush().unwrap();

        assert!(evict(file.path()).is_ok());
    }
}
