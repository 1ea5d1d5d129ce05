//! Command runner: resolves an argument vector against the registry,
//! intercepts help requests, and renders usage text.
//!
//! The runner never prints and never exits. Every way a run can end other
//! than success comes back as an error variant, and the dispatcher turns
//! those into output and an exit code.

pub mod command;
pub mod registry;

pub use command::{Command, CommandContext};
pub use registry::CommandRegistry;

use crate::error::{DbjackError, Result};

/// Executes commands out of a populated registry.
pub struct Runner {
    registry: CommandRegistry,
}

impl Runner {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// Resolves and runs the command named by `argv`.
    ///
    /// `argv[0]` is the program name used in usage and error text. The
    /// first argument selects the command; `help [command]` and a literal
    /// `-h`/`--help` among a command's arguments are intercepted before
    /// the command runs.
    pub fn run(&self, argv: &[String]) -> Result<()> {
        let prog = argv.first().map(String::as_str).unwrap_or("dbjack");
        let args = argv.get(1..).unwrap_or(&[]);

        let Some(name) = args.first() else {
            return Err(DbjackError::TopHelp);
        };

        if name == "help" {
            return match args.get(1) {
                Some(topic) if self.registry.contains(topic) => {
                    Err(DbjackError::CommandHelp(topic.clone()))
                }
                _ => Err(DbjackError::TopHelp),
            };
        }

        let Some(command) = self.registry.get(name) else {
            return Err(DbjackError::failed(format!("unknown command '{name}'")));
        };

        let rest = &args[1..];
        if rest.iter().any(|arg| arg == "-h" || arg == "--help") {
            return Err(DbjackError::CommandHelp(name.clone()));
        }

        let ctx = CommandContext {
            prog: prog.to_string(),
            args: rest.to_vec(),
        };
        command.run(&ctx)
    }

    /// Top-level usage: the usage line plus the table of every registered
    /// command.
    pub fn usage(&self, prog: &str) -> String {
        let mut text = format!("Usage: {prog} [options] <command> [args...]\n");
        text.push_str("\nAvailable commands:\n");
        let width = self.registry.names().map(str::len).max().unwrap_or(0);
        for command in self.registry.commands() {
            let name = command.name();
            text.push_str(&format!("  {name:width$}  {}\n", command.about()));
        }
        text
    }

    /// Usage scoped to a single command, or None if the name is not
    /// registered.
    pub fn command_usage(&self, prog: &str, name: &str) -> Option<String> {
        let command = self.registry.get(name)?;

        let mut text = if command.synopsis().is_empty() {
            format!("Usage: {prog} {name}\n")
        } else {
            format!("Usage: {prog} {name} {}\n", command.synopsis())
        };
        text.push_str(&format!("\n{}\n", command.about()));

        let options = command.options();
        if !options.is_empty() {
            text.push_str("\nOptions:\n");
            let width = options.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);
            for (flag, help) in options {
                text.push_str(&format!("  {flag:width$}  {help}\n"));
            }
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Option<(String, Vec<String>)>>>;

    struct RecordingCommand {
        seen: Seen,
    }

    impl RecordingCommand {
        fn new() -> Self {
            Self {
                seen: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl Command for RecordingCommand {
        fn name(&self) -> &'static str {
            "record"
        }

        fn about(&self) -> &'static str {
            "records the context it was run with"
        }

        fn synopsis(&self) -> &'static str {
            "[options] <path>..."
        }

        fn options(&self) -> &'static [(&'static str, &'static str)] {
            &[("-j, --json", "report in JSON")]
        }

        fn run(&self, ctx: &CommandContext) -> Result<()> {
            *self.seen.lock().unwrap() = Some((ctx.prog.clone(), ctx.args.clone()));
            Ok(())
        }
    }

    struct FailingCommand;

    impl Command for FailingCommand {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn about(&self) -> &'static str {
            "always reports a failure"
        }

        fn run(&self, _ctx: &CommandContext) -> Result<()> {
            Err(DbjackError::failed("bad input"))
        }
    }

    fn runner() -> Runner {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(RecordingCommand::new()));
        registry.register(Box::new(FailingCommand));
        Runner::new(registry)
    }

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("dbjack")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn no_command_requests_top_help() {
        let result = runner().run(&argv(&[]));
        assert!(matches!(result, Err(DbjackError::TopHelp)));
    }

    #[test]
    fn bare_help_requests_top_help() {
        let result = runner().run(&argv(&["help"]));
        assert!(matches!(result, Err(DbjackError::TopHelp)));
    }

    #[test]
    fn help_with_known_command_scopes_to_it() {
        let result = runner().run(&argv(&["help", "record"]));
        match result {
            Err(DbjackError::CommandHelp(name)) => assert_eq!(name, "record"),
            other => panic!("expected CommandHelp, got {other:?}"),
        }
    }

    #[test]
    fn help_with_unknown_command_falls_back_to_top_help() {
        let result = runner().run(&argv(&["help", "nonesuch"]));
        assert!(matches!(result, Err(DbjackError::TopHelp)));
    }

    #[test]
    fn unknown_command_is_a_failure() {
        let result = runner().run(&argv(&["nonesuch"]));
        match result {
            Err(DbjackError::CommandFailed(msg)) => {
                assert_eq!(msg, "unknown command 'nonesuch'");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn help_flag_in_command_args_is_intercepted() {
        for flag in ["-h", "--help"] {
            let result = runner().run(&argv(&["record", "ibdata1", flag]));
            match result {
                Err(DbjackError::CommandHelp(name)) => assert_eq!(name, "record"),
                other => panic!("expected CommandHelp, got {other:?}"),
            }
        }
    }

    #[test]
    fn command_receives_its_own_arguments() {
        let command = RecordingCommand::new();
        let seen = command.seen.clone();
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(command));
        let runner = Runner::new(registry);

        runner.run(&argv(&["record", "-j", "ibdata1"])).unwrap();

        let (prog, args) = seen.lock().unwrap().take().expect("command never ran");
        assert_eq!(prog, "dbjack");
        assert_eq!(args, vec!["-j", "ibdata1"]);
    }

    #[test]
    fn command_failure_passes_through() {
        let result = runner().run(&argv(&["fail"]));
        match result {
            Err(DbjackError::CommandFailed(msg)) => assert_eq!(msg, "bad input"),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn usage_lists_all_commands() {
        let usage = runner().usage("dbjack");
        assert!(usage.starts_with("Usage: dbjack [options] <command> [args...]\n"));
        assert!(usage.contains("Available commands:"));
        assert!(usage.contains("fail"));
        assert!(usage.contains("records the context it was run with"));
    }

    #[test]
    fn command_usage_is_scoped() {
        let runner = runner();
        let usage = runner.command_usage("dbjack", "record").unwrap();
        assert!(usage.starts_with("Usage: dbjack record [options] <path>...\n"));
        assert!(usage.contains("-j, --json"));
        assert!(!usage.contains("fail"));

        assert!(runner.command_usage("dbjack", "nonesuch").is_none());
    }
}
