//! Errors reported by the command dispatcher

use core::fmt;

/// Status returned to the shell on success.
pub const STATUS_OK: i32 = 0;

/// Status returned to the shell on any failure.
pub const STATUS_ERROR: i32 = -1;

/// Why a debug command was rejected or aborted.
///
/// Every variant except [`Output`](Self::Output) is a validation failure of
/// the command line. Tokens are borrowed from the argument vector so the
/// message can echo them.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommandError<'a> {
    /// `monitor` was given more than three arguments.
    TooManyMonitorArgs,
    /// `once` was given more than one argument.
    TooManyOnceArgs,
    /// A token expected to name a view did not resolve.
    UnknownView(&'a str),
    /// The first argument is neither a mode nor a view.
    UnknownCommand(&'a str),
    /// `monitor` got a fourth token after its third was already a view.
    InvalidMonitorArgs,
    /// `time_ms` or `interval_ms` was not strictly positive.
    NonPositiveDuration,
    /// The output channel refused a write.
    Output,
}

impl CommandError<'_> {
    /// The integer status reported to the shell for this error.
    pub const fn status(&self) -> i32 {
        STATUS_ERROR
    }
}

impl fmt::Display for CommandError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::TooManyMonitorArgs => f.write_str("Too many arguments for monitor."),
            CommandError::TooManyOnceArgs => f.write_str("Too many arguments for once."),
            CommandError::UnknownView(token) => write!(f, "Unknown view '{}'.", token),
            CommandError::UnknownCommand(token) => write!(f, "Unknown command '{}'.", token),
            CommandError::InvalidMonitorArgs => f.write_str(
                "Invalid monitor args. Use monitor <time_ms> [interval_ms] [view].",
            ),
            CommandError::NonPositiveDuration => {
                f.write_str("time_ms and interval_ms must be > 0.")
            }
            CommandError::Output => f.write_str("Output write failed."),
        }
    }
}

impl From<fmt::Error> for CommandError<'_> {
    fn from(_: fmt::Error) -> Self {
        CommandError::Output
    }
}

/// Map a command outcome to the shell status convention: 0 or -1.
pub fn status(result: &Result<(), CommandError<'_>>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => e.status(),
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandError<'_> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            CommandError::TooManyMonitorArgs => defmt::write!(f, "TooManyMonitorArgs"),
            CommandError::TooManyOnceArgs => defmt::write!(f, "TooManyOnceArgs"),
            CommandError::UnknownView(token) => defmt::write!(f, "UnknownView({=str})", *token),
            CommandError::UnknownCommand(token) => {
                defmt::write!(f, "UnknownCommand({=str})", *token)
            }
            CommandError::InvalidMonitorArgs => defmt::write!(f, "InvalidMonitorArgs"),
            CommandError::NonPositiveDuration => defmt::write!(f, "NonPositiveDuration"),
            CommandError::Output => defmt::write!(f, "Output"),
        }
    }
}
