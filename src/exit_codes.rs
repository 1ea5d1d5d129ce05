//! Exit code constants for the dbjack CLI.
//!
//! These follow the BSD sysexits convention used by the tool since its
//! first release:
//! - 0: Success
//! - 64: Usage error (no command, or help requested)
//! - 70: Software error (command failure, interruption, or crash)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Usage error: no command given, or help was requested (EX_USAGE).
pub const USAGE: i32 = 64;

/// Software error: command failure, interruption, or an uncaught error
/// (EX_SOFTWARE).
pub const SOFTWARE: i32 = 70;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USAGE, SOFTWARE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_match_sysexits() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USAGE, 64);
        assert_eq!(SOFTWARE, 70);
    }

    #[test]
    fn exit_codes_fit_in_u8() {
        for code in [SUCCESS, USAGE, SOFTWARE] {
            assert!(code >= 0 && code <= 255);
        }
    }
}
