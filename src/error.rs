//! Error types for the dbjack CLI.
//!
//! Uses thiserror for derive macros. Every outcome of running a command,
//! other than plain success, is one of these variants; the dispatcher is
//! the only place that turns them into exit codes and output.

use crate::exit_codes;
use thiserror::Error;

/// The closed set of non-success outcomes a dispatch can produce.
///
/// Help requests are modeled as errors so a single exhaustive match in the
/// dispatcher covers every way a run can end.
#[derive(Error, Debug)]
pub enum DbjackError {
    /// Top-level help was requested, or no command was given.
    #[error("help requested")]
    TopHelp,

    /// Help was requested for one specific command.
    #[error("help requested for '{0}'")]
    CommandHelp(String),

    /// A command detected a problem it knows how to describe.
    #[error("{0}")]
    CommandFailed(String),

    /// The user interrupted execution (SIGINT).
    #[error("Interrupted")]
    Interrupted,

    /// Anything that should never happen: a bug.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl DbjackError {
    /// Returns the process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            DbjackError::TopHelp => exit_codes::USAGE,
            DbjackError::CommandHelp(_) => exit_codes::USAGE,
            DbjackError::CommandFailed(_) => exit_codes::SOFTWARE,
            DbjackError::Interrupted => exit_codes::SOFTWARE,
            DbjackError::Unexpected(_) => exit_codes::SOFTWARE,
        }
    }

    /// Wraps a failure message from a command.
    pub fn failed(msg: impl Into<String>) -> Self {
        DbjackError::CommandFailed(msg.into())
    }
}

/// Result type alias for dbjack operations.
pub type Result<T> = std::result::Result<T, DbjackError>;
