// Exit handling for the one-shot front end

use std::process;
use crate::error::YarrError;

/// Exit code for invalid input
pub const EXIT_USER_ERROR: i32 = 1;

/// Exit code for storage and other system failures
pub const EXIT_INTERNAL_ERROR: i32 = 2;

/// Exit with a user error (exit code 1)
/// User errors are for unrecognized commands, bad indices, bad dates, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(EXIT_USER_ERROR);
}

/// Exit with an internal error (exit code 2)
/// Internal errors are for unreadable or unwritable task ledgers
pub fn internal_error(message: &str) -> ! {
    eprintln!("Internal error: {}", message);
    process::exit(EXIT_INTERNAL_ERROR);
}

/// Exit code matching a command failure
pub fn exit_code_for(err: &YarrError) -> i32 {
    if err.is_internal() {
        EXIT_INTERNAL_ERROR
    } else {
        EXIT_USER_ERROR
    }
}

/// Report a command failure and exit with the matching code
pub fn exit_with(err: &YarrError) -> ! {
    match exit_code_for(err) {
        EXIT_INTERNAL_ERROR => internal_error(&err.to_string()),
        _ => user_error(&err.to_string()),
    }
}
