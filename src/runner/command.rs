//! The interface every dbjack command implements.

use crate::error::Result;

/// Execution context handed to a command.
pub struct CommandContext {
    /// Program name as shown in usage and error text.
    pub prog: String,
    /// The command's own arguments (everything after its name).
    pub args: Vec<String>,
}

/// A single runnable command.
///
/// Commands parse their own `args`; the runner only resolves names and
/// intercepts help requests. `synopsis` and `options` feed the scoped
/// usage text, so they describe the surface `run` actually parses.
pub trait Command {
    /// Name as typed on the command line.
    fn name(&self) -> &'static str;

    /// One-line description for the top-level command table.
    fn about(&self) -> &'static str;

    /// Argument summary for the usage line, e.g. `[options] <path>...`.
    fn synopsis(&self) -> &'static str {
        ""
    }

    /// Flag/description rows for the scoped usage text.
    fn options(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn run(&self, ctx: &CommandContext) -> Result<()>;
}
