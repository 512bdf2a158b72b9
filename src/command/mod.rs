//! Command-line dispatch shared by every debug command.
//!
//! A debug command accepts the same small grammar regardless of the module it
//! inspects. `argv[0]` is the command's own name, as for any shell handler.
//!
//! ```text
//! <cmd>                                       usage text
//! <cmd> monitor                               one print, full view
//! <cmd> monitor <time_ms>                     repeat for time_ms, every 1000 ms
//! <cmd> monitor <time_ms> <interval_ms>       repeat with a custom interval
//! <cmd> monitor <time_ms> <view>              repeat a named view
//! <cmd> monitor <time_ms> <interval_ms> <view>
//! <cmd> once [view]                           one print
//! <cmd> <view>                                shorthand for `once <view>`
//! ```
//!
//! Parsing is separated from execution: [`Invocation::parse`] turns the
//! argument vector into an [`Invocation`] (or a [`CommandError`]), and
//! [`run_command`] executes it by calling a caller-supplied "print once"
//! operation as many times as the mode requires. The dispatcher keeps no
//! state between calls.
//!
//! `monitor` blocks the caller: it sleeps through [`Platform::sleep_ms`]
//! after every print and accumulates the *nominal* interval, not the measured
//! time, so a sleep that overshoots stretches the total run.

use core::fmt::{self, Write};

use crate::config::Config;
use crate::platform::Platform;
use crate::view::{ViewId, ViewTable};

pub mod error;


pub use error::{status, CommandError, STATUS_ERROR, STATUS_OK};

/// Keyword selecting repeated printing.
pub const MONITOR: &str = "monitor";

/// Keyword selecting a single print.
pub const ONCE: &str = "once";

/// Largest argument count accepted by `monitor`, command name included.
pub const MAX_MONITOR_ARGC: usize = 5;

/// Largest argument count accepted by `once`, command name included.
pub const MAX_ONCE_ARGC: usize = 3;

/// What a command line asks for, after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Invocation {
    /// No arguments: print the usage text.
    Usage,
    /// Print `view` repeatedly until `time_ms` of nominal time has passed.
    Monitor {
        /// Total duration, strictly positive.
        time_ms: u32,
        /// Sleep after each print, strictly positive.
        interval_ms: u32,
        /// View to render.
        view: ViewId,
    },
    /// `once [view]`, or a bare `monitor`: print a single time.
    Once {
        /// View to render.
        view: ViewId,
    },
    /// A lone view name: print that view once.
    Direct {
        /// View to render.
        view: ViewId,
    },
}

impl Invocation {
    /// Validate an argument vector.
    ///
    /// `argv[0]` is ignored. Tokens expected to name views are resolved
    /// against `views`; the full view is used when none is given.
    pub fn parse<'a>(
        argv: &[&'a str],
        views: &ViewTable,
        full_view: ViewId,
        config: &Config,
    ) -> Result<Self, CommandError<'a>> {
        let argc = argv.len();
        if argc <= 1 {
            return Ok(Invocation::Usage);
        }

        let mode = argv[1];

        if mode == MONITOR {
            // Without a duration, monitor degenerates to a single print.
            if argc == 2 {
                return Ok(Invocation::Once { view: full_view });
            }
            if argc > MAX_MONITOR_ARGC {
                return Err(CommandError::TooManyMonitorArgs);
            }

            let time_ms = i64::from(parse_int(argv[2]));
            let mut interval_ms = i64::from(config.default_interval_ms);
            let mut view = full_view;
            let mut third_is_view = false;

            if let Some(&token) = argv.get(3) {
                match views.resolve(token) {
                    Some(parsed) => {
                        view = parsed;
                        third_is_view = true;
                    }
                    None => interval_ms = i64::from(parse_int(token)),
                }
            }

            if let Some(&token) = argv.get(4) {
                if third_is_view {
                    return Err(CommandError::InvalidMonitorArgs);
                }
                view = views.resolve(token).ok_or(CommandError::UnknownView(token))?;
            }

            if time_ms <= 0 || interval_ms <= 0 {
                return Err(CommandError::NonPositiveDuration);
            }

            return Ok(Invocation::Monitor {
                time_ms: u32::try_from(time_ms).map_err(|_| CommandError::NonPositiveDuration)?,
                interval_ms: u32::try_from(interval_ms)
                    .map_err(|_| CommandError::NonPositiveDuration)?,
                view,
            });
        }

        if mode == ONCE {
            if argc > MAX_ONCE_ARGC {
                return Err(CommandError::TooManyOnceArgs);
            }
            let view = match argv.get(2) {
                Some(&token) => views.resolve(token).ok_or(CommandError::UnknownView(token))?,
                None => full_view,
            };
            return Ok(Invocation::Once { view });
        }

        if argc == 2 {
            if let Some(view) = views.resolve(mode) {
                return Ok(Invocation::Direct { view });
            }
        }

        Err(CommandError::UnknownCommand(mode))
    }

    /// Number of print operations this invocation performs.
    pub fn print_count(&self) -> u32 {
        match *self {
            Invocation::Usage => 0,
            Invocation::Once { .. } | Invocation::Direct { .. } => 1,
            Invocation::Monitor { time_ms, interval_ms, .. } => time_ms.div_ceil(interval_ms),
        }
    }

    /// The view rendered by this invocation, if it prints at all.
    pub fn view(&self) -> Option<ViewId> {
        match *self {
            Invocation::Usage => None,
            Invocation::Monitor { view, .. }
            | Invocation::Once { view }
            | Invocation::Direct { view } => Some(view),
        }
    }
}

/// Parse a decimal integer the way C's `atoi` does.
///
/// Leading whitespace and one sign are accepted, digits are read up to the
/// first non-digit, and anything else yields 0. Out-of-range values
/// saturate.
///
/// ```rust
/// use dbgshell::command::parse_int;
///
/// assert_eq!(parse_int("250"), 250);
/// assert_eq!(parse_int("  -5"), -5);
/// assert_eq!(parse_int("12ms"), 12);
/// assert_eq!(parse_int("fast"), 0);
/// ```
pub fn parse_int(text: &str) -> i32 {
    let trimmed = text.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let limit = i64::from(i32::MAX) + 1;
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(digit - b'0')).min(limit);
    }

    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Static description of one debug command.
///
/// Shared by the live and structured command flavors.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    /// Name printed in every header line; also the shell command name.
    pub module_name: &'static str,
    /// One-line description shown by the shell's `list` and `--help`.
    pub description: &'static str,
    /// Text standing for "a view name" in usage. Defaults to the view names.
    pub view_help: Option<&'static str>,
    /// Views understood by the command.
    pub views: ViewTable,
    /// View that always renders every field.
    pub full_view: ViewId,
    /// Interval and formatting settings.
    pub config: Config,
}

impl CommandInfo {
    /// Describe a command with the default configuration.
    pub const fn new(module_name: &'static str, views: ViewTable, full_view: ViewId) -> Self {
        Self {
            module_name,
            description: "",
            view_help: None,
            views,
            full_view,
            config: Config::new(),
        }
    }

    /// Set the description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Set the usage text for view names, e.g. `"full|imu|motor"`.
    pub const fn with_view_help(mut self, view_help: &'static str) -> Self {
        self.view_help = Some(view_help);
        self
    }

    /// Replace the configuration.
    pub const fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Write `[<now> ms] <module> <view>`.
    pub fn write_header(&self, out: &mut dyn Write, now_ms: u64, view: ViewId) -> fmt::Result {
        write!(
            out,
            "[{} ms] {} {}\r\n",
            now_ms,
            self.module_name,
            self.views.name_of(view)
        )
    }

    /// Write the usage text.
    pub fn write_usage(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("Usage:\r\n")?;
        out.write_str("  monitor\r\n")?;
        out.write_str("  monitor <time_ms> [interval_ms] [")?;
        self.write_view_help(out)?;
        out.write_str("]\r\n")?;
        out.write_str("  once [")?;
        self.write_view_help(out)?;
        out.write_str("]\r\n")?;
        out.write_str("  ")?;
        self.write_view_help(out)?;
        out.write_str("\r\n")
    }

    fn write_view_help(&self, out: &mut dyn Write) -> fmt::Result {
        match self.view_help {
            Some(help) => out.write_str(help),
            None => self.views.write_help(out),
        }
    }

    /// Number of decimals for float fields.
    pub fn precision(&self) -> usize {
        usize::from(self.config.float_precision)
    }
}

/// Parse and execute one command line.
///
/// `print_once` renders a single header-plus-fields block for the given
/// view. Errors are reported on `out` as `Error: <message>` before being
/// returned.
pub fn run_command<'a, F>(
    argv: &[&'a str],
    info: &CommandInfo,
    out: &mut dyn Write,
    platform: &mut dyn Platform,
    mut print_once: F,
) -> Result<(), CommandError<'a>>
where
    F: FnMut(&mut dyn Write, &mut dyn Platform, ViewId) -> fmt::Result,
{
    let result = Invocation::parse(argv, &info.views, info.full_view, &info.config)
        .and_then(|invocation| {
            debug!("{=str}: {}", info.module_name, invocation);
            execute(invocation, info, out, platform, &mut print_once)
        });

    if let Err(e) = result {
        warn!("{=str}: command failed: {}", info.module_name, e);
        // A broken output channel cannot carry its own error line.
        if e != CommandError::Output {
            let _ = write!(out, "Error: {}\r\n", e);
        }
    }
    result
}

fn execute<'a, F>(
    invocation: Invocation,
    info: &CommandInfo,
    out: &mut dyn Write,
    platform: &mut dyn Platform,
    print_once: &mut F,
) -> Result<(), CommandError<'a>>
where
    F: FnMut(&mut dyn Write, &mut dyn Platform, ViewId) -> fmt::Result,
{
    match invocation {
        Invocation::Usage => info.write_usage(out)?,
        Invocation::Once { view } | Invocation::Direct { view } => {
            print_once(out, platform, view)?
        }
        Invocation::Monitor { time_ms, interval_ms, view } => {
            let mut elapsed: u64 = 0;
            while elapsed < u64::from(time_ms) {
                print_once(out, platform, view)?;
                platform.sleep_ms(interval_ms);
                elapsed += u64::from(interval_ms);
                trace!("monitor: {} of {} ms", elapsed, time_ms);
            }
        }
    }
    Ok(())
}

/// A debug command bound to the module it inspects.
///
/// This is the object-safe seam between a configured command and a shell:
/// the shell only sees names and an `invoke` entry point returning the
/// integer status (0 on success, -1 on failure).
pub trait DebugCommand {
    /// Name the shell dispatches on.
    fn name(&self) -> &str;

    /// One-line description for command listings.
    fn description(&self) -> &str {
        ""
    }

    /// Run the command with `argv[0]` set to its own name.
    fn invoke(&mut self, argv: &[&str], out: &mut dyn Write, platform: &mut dyn Platform) -> i32;
}
