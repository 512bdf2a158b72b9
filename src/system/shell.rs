//! Command shell front-end for debug commands.
//!
//! The shell owns nothing but references: firmware registers one
//! [`DebugCommand`] per inspected module (usually a
//! [`LiveBinding`](crate::live::LiveBinding) or a
//! [`StructuredBinding`](crate::structured::StructuredBinding)), then feeds
//! complete input lines to [`Shell::execute`].
//!
//! # Features
//!
//! - **Zero-allocation**: commands and arguments live in fixed-capacity
//!   `heapless` vectors
//! - **Dispatch by name**: the first token selects the command, which receives
//!   the whole argument vector (its own name first)
//! - **Help System**: `<cmd> -h` / `<cmd> --help` prints the command's
//!   description, `list` prints every registered command
//!
//! # Usage Examples
//!
//! ```rust
//! use core::fmt::Write;
//!
//! use dbgshell::command::DebugCommand;
//! use dbgshell::platform::Platform;
//! use dbgshell::system::shell::{Shell, ShellResult};
//!
//! struct Uptime;
//!
//! impl DebugCommand for Uptime {
//!     fn name(&self) -> &str {
//!         "uptime"
//!     }
//!
//!     fn invoke(
//!         &mut self,
//!         _argv: &[&str],
//!         out: &mut dyn Write,
//!         platform: &mut dyn Platform,
//!     ) -> i32 {
//!         let _ = write!(out, "{} ms\r\n", platform.now_ms());
//!         0
//!     }
//! }
//!
//! struct Clock;
//!
//! impl Platform for Clock {
//!     fn now_ms(&self) -> u64 {
//!         1234
//!     }
//!
//!     fn sleep_ms(&mut self, _ms: u32) {}
//! }
//!
//! let mut uptime = Uptime;
//! let mut shell: Shell = Shell::new();
//! assert_eq!(shell.register(&mut uptime), ShellResult::Ok);
//!
//! let mut out = String::new();
//! assert_eq!(shell.execute("uptime", &mut out, &mut Clock), ShellResult::Ok);
//! assert_eq!(out, "1234 ms\r\n");
//! ```

use core::fmt::Write;

use heapless::Vec;

use crate::command::{DebugCommand, STATUS_OK};
use crate::platform::Platform;

/// Maximum number of tokens on one command line, command name included.
pub const MAX_ARGS: usize = 8;

/// Default number of commands a [`Shell`] can hold.
pub const MAX_COMMANDS: usize = 16;

/// Name of the built-in command listing.
pub const LIST_COMMAND: &str = "list";

/// Outcome of a shell operation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShellResult {
    /// Operation completed successfully.
    Ok,
    /// The command ran and reported a non-zero status.
    CommandFailed,
    /// Invalid parameter, such as an empty or duplicate command name.
    InvalidParameter,
    /// No room left to register another command.
    OutOfMemory,
    /// The line has more than [`MAX_ARGS`] tokens.
    TooManyArguments,
    /// No registered or built-in command has this name.
    UnknownCommand,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ShellResult {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ShellResult::Ok => defmt::write!(f, "Ok"),
            ShellResult::CommandFailed => defmt::write!(f, "CommandFailed"),
            ShellResult::InvalidParameter => defmt::write!(f, "InvalidParameter"),
            ShellResult::OutOfMemory => defmt::write!(f, "OutOfMemory"),
            ShellResult::TooManyArguments => defmt::write!(f, "TooManyArguments"),
            ShellResult::UnknownCommand => defmt::write!(f, "UnknownCommand"),
        }
    }
}

/// Registry of debug commands with line dispatch.
///
/// `N` bounds the number of registered commands.
pub struct Shell<'a, const N: usize = MAX_COMMANDS> {
    commands: Vec<&'a mut dyn DebugCommand, N>,
    list_command_enabled: bool,
    help_enabled: bool,
}

impl<const N: usize> Default for Shell<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> Shell<'a, N> {
    /// Create an empty shell with `list` and `--help` enabled.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            list_command_enabled: true,
            help_enabled: true,
        }
    }

    /// Enable or disable the built-in `list` command.
    ///
    /// A registered command named `list` always takes precedence.
    pub fn set_list_command(&mut self, enabled: bool) {
        self.list_command_enabled = enabled;
    }

    /// Enable or disable `-h` / `--help` handling.
    ///
    /// When disabled, the flag is passed to the command like any argument.
    pub fn set_help(&mut self, enabled: bool) {
        self.help_enabled = enabled;
    }

    /// Register a command under its [`name`](DebugCommand::name).
    ///
    /// # Returns
    ///
    /// * [`ShellResult::Ok`] - Command registered
    /// * [`ShellResult::InvalidParameter`] - Empty name, or the name is taken
    /// * [`ShellResult::OutOfMemory`] - All `N` slots are used
    pub fn register(&mut self, command: &'a mut dyn DebugCommand) -> ShellResult {
        let name = command.name();
        if name.is_empty() || self.find(name).is_some() {
            warn!("shell: rejected command name {=str}", name);
            return ShellResult::InvalidParameter;
        }

        match self.commands.push(command) {
            Ok(()) => ShellResult::Ok,
            Err(_) => ShellResult::OutOfMemory,
        }
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Split `line` on whitespace and run the command it names.
    ///
    /// Blank lines are accepted and do nothing. Messages for shell-level
    /// failures are written to `out`; the command writes its own output.
    pub fn execute(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        platform: &mut dyn Platform,
    ) -> ShellResult {
        let mut argv: Vec<&str, MAX_ARGS> = Vec::new();
        for token in line.split_ascii_whitespace() {
            if argv.push(token).is_err() {
                let _ = out.write_str("Error: Too many arguments.\r\n");
                return ShellResult::TooManyArguments;
            }
        }

        let Some(&name) = argv.first() else {
            return ShellResult::Ok;
        };

        if self.help_enabled && argv.len() == 2 && matches!(argv[1], "-h" | "--help") {
            return self.show_command_help(name, out);
        }

        if let Some(index) = self.find(name) {
            trace!("shell: dispatching {=str}", name);
            let status = self.commands[index].invoke(&argv, out, platform);
            return if status == STATUS_OK {
                ShellResult::Ok
            } else {
                ShellResult::CommandFailed
            };
        }

        if self.list_command_enabled && name == LIST_COMMAND {
            self.list_commands(out);
            return ShellResult::Ok;
        }

        let message = if self.list_command_enabled {
            "Unknown command. Type 'list' to see available commands.\r\n"
        } else {
            "Unknown command.\r\n"
        };
        let _ = out.write_str(message);
        ShellResult::UnknownCommand
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|command| command.name() == name)
    }

    fn show_command_help(&self, name: &str, out: &mut dyn Write) -> ShellResult {
        match self.find(name) {
            Some(index) => {
                let _ = write!(out, "{}\r\n", self.commands[index].description());
                ShellResult::Ok
            }
            None => {
                let _ = out.write_str("Command not found.\r\n");
                ShellResult::UnknownCommand
            }
        }
    }

    fn list_commands(&self, out: &mut dyn Write) {
        let _ = out.write_str("Available commands:\r\n");
        for command in &self.commands {
            let _ = write!(out, "{}\t\t{}\r\n", command.name(), command.description());
        }
    }
}

impl<const N: usize> core::fmt::Debug for Shell<'_, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for command in &self.commands {
            list.entry(&command.name());
        }
        list.finish()
    }
}
