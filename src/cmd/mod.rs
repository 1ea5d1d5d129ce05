//! Command packages.
//!
//! Every module under `dbjack::cmd` is enumerated in [`PACKAGES`], the
//! manifest the discovery pass walks at startup. Command packages expose a
//! `register` hook that adds their commands to the registry; support
//! packages (`util`, `thirdparty`) expose the same hook shape but register
//! nothing, and discovery filters them out by name anyway.

pub mod filename;
pub mod fincore;
pub mod sieve;
pub mod thirdparty;
pub mod uncache;
pub mod util;

use crate::runner::CommandRegistry;

/// Registration hook exposed by a package.
pub type RegisterFn = fn(&mut CommandRegistry) -> anyhow::Result<()>;

/// One entry in the package manifest.
pub struct CommandPackage {
    /// Fully qualified module path.
    pub name: &'static str,
    /// True for packages (directories of modules), false for the bare
    /// modules nested inside them.
    pub is_pkg: bool,
    pub register: RegisterFn,
}

impl CommandPackage {
    pub const fn new(name: &'static str, is_pkg: bool, register: RegisterFn) -> Self {
        Self {
            name,
            is_pkg,
            register,
        }
    }
}

fn register_nothing(_registry: &mut CommandRegistry) -> anyhow::Result<()> {
    Ok(())
}

/// Every module reachable under `dbjack::cmd`, in path order.
pub static PACKAGES: &[CommandPackage] = &[
    CommandPackage::new("dbjack::cmd::filename", true, filename::register),
    CommandPackage::new("dbjack::cmd::filename::codec", false, register_nothing),
    CommandPackage::new("dbjack::cmd::fincore", true, fincore::register),
    CommandPackage::new("dbjack::cmd::fincore::mincore", false, register_nothing),
    CommandPackage::new("dbjack::cmd::sieve", true, sieve::register),
    CommandPackage::new("dbjack::cmd::sieve::parser", false, register_nothing),
    CommandPackage::new("dbjack::cmd::sieve::writer", false, register_nothing),
    CommandPackage::new("dbjack::cmd::thirdparty", true, thirdparty::register),
    CommandPackage::new("dbjack::cmd::thirdparty::subrun", false, register_nothing),
    CommandPackage::new("dbjack::cmd::uncache", true, uncache::register),
    CommandPackage::new("dbjack::cmd::util", true, util::register),
    CommandPackage::new("dbjack::cmd::util::units", false, register_nothing),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn manifest_paths_are_unique_and_qualified() {
        let mut seen = BTreeSet::new();
        for package in PACKAGES {
            assert!(
                package.name.starts_with("dbjack::cmd::"),
                "unqualified manifest entry: {}",
                package.name
            );
            assert!(seen.insert(package.name), "duplicate entry: {}", package.name);
        }
    }

    #[test]
    fn command_packages_are_marked_as_packages() {
        for name in [
            "dbjack::cmd::filename",
            "dbjack::cmd::fincore",
            "dbjack::cmd::sieve",
            "dbjack::cmd::uncache",
        ] {
            let entry = PACKAGES
                .iter()
                .find(|p| p.name == name)
                .unwrap_or_else(|| panic!("missing manifest entry: {name}"));
            assert!(entry.is_pkg, "{name} must be a package");
        }
    }

    #[test]
    fn support_packages_register_nothing() {
        for name in ["dbjack::cmd::thirdparty", "dbjack::cmd::util"] {
            let entry = PACKAGES.iter().find(|p| p.name == name).unwrap();
            let mut registry = CommandRegistry::new();
            (entry.register)(&mut registry).unwrap();
            assert!(registry.is_empty());
        }
    }
}
