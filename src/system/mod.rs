//! System utilities for embedded devices.
//!
//! # Available Utilities
//!
//! - **[`shell`]**: line dispatcher that routes `<module> [args]` to the
//!   registered debug commands
//!
//! # Usage
//!
//! ```rust,no_run
//! use dbgshell::system::shell::Shell;
//!
//! let mut shell: Shell<'_, 8> = Shell::new();
//! shell.set_list_command(true);
//! // shell.register(&mut chassis_binding);
//! // shell.execute("chassis monitor 5000 200 imu", &mut uart, &mut platform);
//! ```

/// Command shell front-end for debug commands.
///
/// Registers [`DebugCommand`](crate::command::DebugCommand)s by name and
/// dispatches whitespace-separated command lines to them.
pub mod shell;
