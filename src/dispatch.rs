//! The dispatcher: everything between flag parsing and process exit.
//!
//! One pass, in order: version short-circuit, logging configuration,
//! panic hook and interrupt handler installation, command discovery, then
//! a single runner invocation whose outcome is resolved to an exit code.
//! No other module prints failure text or decides exit codes.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{error, info};

use crate::cli::GlobalOptions;
use crate::discovery;
use crate::error::DbjackError;
use crate::exit_codes;
use crate::interrupt;
use crate::logging;
use crate::runner::{CommandRegistry, Runner};

const BUG_REPORT_URL: &str = "https://github.com/dbjack/dbjack/issues";

/// Runs the whole program and returns its exit code.
pub fn run(opts: GlobalOptions) -> i32 {
    if opts.version {
        println!("dbjack v{}", env!("CARGO_PKG_VERSION"));
        return exit_codes::SUCCESS;
    }

    logging::init(opts.quiet, opts.debug);
    install_panic_hook();
    interrupt::install();

    trap(|| dispatch(&opts.rest))
}

/// Runs `body`, converting an unwinding panic into the software failure
/// code. The hook has already reported the crash by the time the unwind
/// lands here.
fn trap(body: impl FnOnce() -> i32) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(code) => code,
        Err(_) => exit_codes::SOFTWARE,
    }
}

fn dispatch(rest: &[String]) -> i32 {
    let mut registry = CommandRegistry::new();
    if let Err(err) = discovery::discover(&mut registry) {
        report_uncaught(&format!("{err:?}"));
        return exit_codes::SOFTWARE;
    }
    let runner = Runner::new(registry);

    let prog = program_name();
    let argv: Vec<String> = std::iter::once(prog.clone())
        .chain(rest.iter().cloned())
        .collect();

    resolve(&runner, &prog, runner.run(&argv))
}

/// Maps a run outcome to output and an exit code. Usage text goes to
/// stdout; failure text goes through the log so `--quiet` silences it.
fn resolve(runner: &Runner, prog: &str, outcome: Result<(), DbjackError>) -> i32 {
    let err = match outcome {
        Ok(()) => return exit_codes::SUCCESS,
        Err(err) => err,
    };
    let code = err.exit_code();
    match err {
        DbjackError::TopHelp => print!("{}", runner.usage(prog)),
        DbjackError::CommandHelp(name) => {
            let text = runner
                .command_usage(prog, &name)
                .unwrap_or_else(|| runner.usage(prog));
            print!("{text}");
        }
        DbjackError::CommandFailed(message) => info!("{message}"),
        DbjackError::Interrupted => info!("Interrupted"),
        DbjackError::Unexpected(err) => report_uncaught(&format!("{err:?}")),
    }
    code
}

/// The crash report. Logged at ERROR, the one level only `--quiet` can
/// silence.
fn report_uncaught(details: &str) {
    error!("Uncaught error! (╯°□°)╯ ︵ ┻━┻");
    error!("It's okay. ┬─┬ノ( º_ ºノ)");
    error!("Consider filing a bug report at {BUG_REPORT_URL}");
    error!("{details}");
}

fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        report_uncaught(&info.to_string());
    }));
}

/// Base name of the invoked binary, as shown in usage lines.
fn program_name() -> String {
    let argv0 = std::env::args().next().unwrap_or_default();
    Path::new(&argv0)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "dbjack".to_string())
}
