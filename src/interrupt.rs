//! Cooperative interrupt handling.
//!
//! SIGINT sets a process-global flag; long-running commands poll it at
//! their loop boundaries and bail out with `Interrupted`, which the
//! dispatcher reports as a first-class outcome rather than a crash. The
//! flag is monotonic for the life of the process.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{DbjackError, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Marks the process as interrupted. Called from the signal handler.
pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Returns true once an interrupt has been observed.
pub fn pending() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Fails with `Interrupted` once an interrupt has been observed.
pub fn check() -> Result<()> {
    if pending() {
        Err(DbjackError::Interrupted)
    } else {
        Ok(())
    }
}

/// Installs the SIGINT handler. Install once, at startup; a failed
/// install is logged and ignored.
pub fn install() {
    if let Err(err) = ctrlc::set_handler(mark_interrupted) {
        tracing::debug!("could not install interrupt handler: {err}");
    }
}

#[cfg(test)]
fn clear() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the global flag is never observed mid-flight by a
    // sibling test thread.
    #[test]
    fn flag_lifecycle() {
        assert!(!pending());
        assert!(check().is_ok());

        mark_interrupted();
        assert!(pending());
        match check() {
            Err(DbjackError::Interrupted) => {}
            other => panic!("expected Interrupted, got {other:?}"),
        }

        clear();
        assert!(check().is_ok());
    }
}
