//! Startup command discovery.
//!
//! Walks the package manifest under `dbjack::cmd`, skips bare modules and
//! the support namespaces, and runs each surviving package's registration
//! hook against the registry. After a pass the registry holds exactly the
//! commands defined by the non-excluded packages; repeating a pass leaves
//! it unchanged.

use tracing::debug;

use crate::cmd::{self, CommandPackage};
use crate::runner::CommandRegistry;

/// Marker for vendored third-party code.
pub const VENDOR_MARKER: &str = "thirdparty";

/// Marker for shared helper code.
pub const UTIL_MARKER: &str = "util";

/// Populates the registry from the built-in package manifest.
///
/// The first failing registration hook aborts the pass and propagates.
pub fn discover(registry: &mut CommandRegistry) -> anyhow::Result<()> {
    discover_packages(cmd::PACKAGES, registry)
}

/// Substring test on the qualified path. Blunt on purpose: a command
/// package must never carry either marker anywhere in its name.
fn excluded(name: &str) -> bool {
    name.contains(VENDOR_MARKER) || name.contains(UTIL_MARKER)
}

fn discover_packages(
    packages: &[CommandPackage],
    registry: &mut CommandRegistry,
) -> anyhow::Result<()> {
    for package in packages {
        if !package.is_pkg {
            continue;
        }
        if excluded(package.name) {
            continue;
        }
        debug!("loading commands from '{}'", package.name);
        (package.register)(registry)?;
    }
    Ok(())
}
