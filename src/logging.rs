//! Process-wide logging configuration.
//!
//! All dbjack chatter goes through `tracing` as bare message text on
//! stderr; command payload (reports, usage text) goes to stdout and is
//! never affected by verbosity. The filter policy lives in a pure function
//! so it can be tested without installing a global subscriber.

use tracing_subscriber::EnvFilter;

/// Log target of the embedded subprocess helper. Whatever the global
/// verbosity, this target is pinned to error-only so compression pipelines
/// do not flood the output.
pub const SUBPROCESS_TARGET: &str = "dbjack::cmd::thirdparty::subrun";

/// Builds the filter directive string for the given flags.
///
/// Quiet wins over debug and turns logging off entirely, error reports
/// included.
pub fn directives(quiet: bool, debug: bool) -> String {
    if quiet {
        "off".to_string()
    } else {
        let level = if debug { "debug" } else { "info" };
        format!("{level},{SUBPROCESS_TARGET}=error")
    }
}

/// Installs the process-global subscriber. Must be called once, before any
/// command runs.
pub fn init(quiet: bool, debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives(quiet, debug)))
        .with_writer(std::io::stderr)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_turns_everything_off() {
        assert_eq!(directives(true, false), "off");
        assert_eq!(directives(true, true), "off");
    }

    #[test]
    fn normal_verbosity_is_info() {
        let spec = directives(false, false);
        assert!(spec.starts_with("info,"));
        assert!(spec.contains("dbjack::cmd::thirdparty::subrun=error"));
    }

    #[test]
    fn debug_flag_raises_verbosity() {
        let spec = directives(false, true);
        assert!(spec.starts_with("debug,"));
        assert!(spec.contains("dbjack::cmd::thirdparty::subrun=error"));
    }

    #[test]
    fn directive_strings_are_well_formed() {
        for quiet in [false, true] {
            for debug in [false, true] {
                let spec = directives(quiet, debug);
                assert!(
                    EnvFilter::try_new(&spec).is_ok(),
                    "invalid filter spec: {spec}"
                );
            }
        }
    }
}
