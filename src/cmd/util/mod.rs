//! Shared helpers for command packages.
//!
//! Not a command package: the `util` marker keeps this namespace out of
//! discovery.

pub mod units;

use crate::runner::CommandRegistry;

/// Registration hook; this package defines no commands.
pub fn register(_registry: &mut CommandRegistry) -> anyhow::Result<()> {
    Ok(())
}
