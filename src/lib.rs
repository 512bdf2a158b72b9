//! # dbgshell - view-based debug commands for embedded modules
//!
//! Building blocks for uniform `monitor` / `once` shell commands that print a
//! module's internal state. Every command understands the same grammar, and
//! every module only declares *what* it exposes:
//!
//! - a **view table** naming subsets of its fields,
//! - a **field table** giving each field a name, the views it belongs to and
//!   a typed accessor,
//! - either a **snapshot capture** (structured commands) or direct access to
//!   the module (live commands).
//!
//! ## Features
//!
//! ### Command Dispatch
//! - `monitor [time_ms [interval_ms] [view]]`: repeated prints for a duration
//! - `once [view]` and the `<view>` shorthand: a single print
//! - Uniform error messages and integer status (0 / -1)
//!
//! ### Field Rendering
//! - Boolean, `u8` and `f32` printers plus custom ones
//! - Per-field view masks; the full view always prints everything
//!
//! ### System Utilities
//! - Fixed-capacity shell that routes `<module> [args]` lines to commands
//!
//! ## Usage
//!
//! ```rust
//! use dbgshell::command::CommandInfo;
//! use dbgshell::field::Field;
//! use dbgshell::platform::Platform;
//! use dbgshell::snapshot_field;
//! use dbgshell::structured::{Capture, StructuredCommand};
//! use dbgshell::view::{view_bit, ViewEntry, ViewTable};
//!
//! const FULL: u8 = 0;
//! const POWER: u8 = 1;
//!
//! #[derive(Default)]
//! struct BatterySnapshot {
//!     charging: bool,
//!     cells: u8,
//!     voltage: f32,
//! }
//!
//! struct Battery {
//!     voltage: f32,
//! }
//!
//! impl Capture for Battery {
//!     type Snapshot = BatterySnapshot;
//!
//!     fn capture(&self, snapshot: &mut BatterySnapshot) {
//!         snapshot.charging = false;
//!         snapshot.cells = 6;
//!         snapshot.voltage = self.voltage;
//!     }
//! }
//!
//! static VIEWS: ViewTable = ViewTable::new(&[
//!     ViewEntry::new("full", FULL),
//!     ViewEntry::new("power", POWER),
//! ]);
//!
//! static FIELDS: &[Field<BatterySnapshot>] = &[
//!     snapshot_field!(bool, BatterySnapshot, charging, 0),
//!     snapshot_field!(u8, BatterySnapshot, cells, 0),
//!     snapshot_field!(f32, BatterySnapshot, voltage, view_bit(POWER)),
//! ];
//!
//! struct Board;
//!
//! impl Platform for Board {
//!     fn now_ms(&self) -> u64 {
//!         100
//!     }
//!
//!     fn sleep_ms(&mut self, _ms: u32) {}
//! }
//!
//! let command: StructuredCommand<Battery> =
//!     StructuredCommand::new(CommandInfo::new("battery", VIEWS, FULL), FIELDS);
//!
//! let mut out = String::new();
//! command
//!     .run(&Battery { voltage: 24.5 }, &["battery", "power"], &mut out, &mut Board)
//!     .unwrap();
//! assert_eq!(out, "[100 ms] battery power\r\n  voltage=24.5000\r\n");
//! ```
//!
//! ## Platform Support
//!
//! The crate is `no_std` and allocation-free. Output goes through any
//! `core::fmt::Write`, time and sleep through [`platform::Platform`].
//!
//! ## Optional Features
//!
//! - `std`: `StdPlatform` and a stdout console for hosted builds
//! - `defmt`: defmt logging of dispatch decisions and `defmt::Format` for errors

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Runtime configuration: default monitor interval and float precision.
pub mod config;

/// View tables mapping view names to mask bits.
pub mod view;

/// Field descriptors, typed accessors and value printers.
pub mod field;

/// Host collaborators: clock and sleep.
pub mod platform;

/// Argument parsing and execution shared by all debug commands.
pub mod command;

/// Debug commands reading module state directly, optionally under a lock.
pub mod live;

/// Debug commands rendering a captured snapshot.
pub mod structured;

/// System utilities such as the command shell.
pub mod system;

pub use command::{CommandError, CommandInfo, DebugCommand, Invocation};
pub use config::Config;
pub use field::Field;
pub use live::{LiveCommand, LockHooks};
pub use platform::Platform;
pub use structured::{Capture, StructuredCommand};
pub use view::{ViewEntry, ViewId, ViewMask, ViewTable};
