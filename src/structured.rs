//! Structured debug commands: fields read from a captured snapshot.
//!
//! Before each print the module copies the state it wants to expose into a
//! snapshot value through [`Capture`]. The fields are then rendered from that
//! value, so one block always shows a consistent point in time. The snapshot
//! is owned by the print operation and dropped right after it.
//!
//! The capture itself is the module's responsibility: take a lock, disable
//! interrupts or read a double buffer there. The renderer does no
//! synchronization of its own.

use core::fmt::{self, Write};

use crate::command::{run_command, status, CommandError, CommandInfo, DebugCommand};
use crate::field::{render_fields, Field};
use crate::platform::Platform;
use crate::view::ViewId;

/// A module that can copy its observable state into a snapshot.
pub trait Capture {
    /// Plain value holding everything the command prints.
    type Snapshot: Default;

    /// Fill `snapshot` from the current state, atomically with respect to
    /// any context that mutates the module.
    fn capture(&self, snapshot: &mut Self::Snapshot);
}

/// Debug command over fields of a module's snapshot type.
pub struct StructuredCommand<'t, M: Capture + ?Sized> {
    /// Name, views and configuration.
    pub info: CommandInfo,
    /// Field table over the snapshot, in print order.
    pub fields: &'t [Field<M::Snapshot>],
}

impl<'t, M: Capture + ?Sized> StructuredCommand<'t, M> {
    /// Create a command.
    pub const fn new(info: CommandInfo, fields: &'t [Field<M::Snapshot>]) -> Self {
        Self { info, fields }
    }

    /// Capture a snapshot of `module`, then print the header and the
    /// fields of `view` from it.
    pub fn print_once(
        &self,
        module: &M,
        out: &mut dyn Write,
        platform: &dyn Platform,
        view: ViewId,
    ) -> fmt::Result {
        let mut snapshot = M::Snapshot::default();
        module.capture(&mut snapshot);

        self.info.write_header(out, platform.now_ms(), view)?;
        render_fields(out, self.fields, &snapshot, view, self.info.full_view, self.info.precision())?;
        Ok(())
    }

    /// Execute one command line against `module`.
    pub fn run<'a>(
        &self,
        module: &M,
        argv: &[&'a str],
        out: &mut dyn Write,
        platform: &mut dyn Platform,
    ) -> Result<(), CommandError<'a>> {
        run_command(argv, &self.info, out, platform, |out, platform, view| {
            self.print_once(module, out, platform, view)
        })
    }

    /// Bind this command to a module so a shell can invoke it.
    pub fn attach<'c>(&'c self, module: &'c M) -> StructuredBinding<'c, 't, M> {
        StructuredBinding { command: self, module }
    }
}

impl<M: Capture + ?Sized> fmt::Debug for StructuredCommand<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredCommand")
            .field("info", &self.info)
            .field("fields", &self.fields)
            .finish()
    }
}

/// A [`StructuredCommand`] together with the module it captures.
pub struct StructuredBinding<'c, 't, M: Capture + ?Sized> {
    command: &'c StructuredCommand<'t, M>,
    module: &'c M,
}

impl<M: Capture + ?Sized> DebugCommand for StructuredBinding<'_, '_, M> {
    fn name(&self) -> &str {
        self.command.info.module_name
    }

    fn description(&self) -> &str {
        self.command.info.description
    }

    fn invoke(&mut self, argv: &[&str], out: &mut dyn Write, platform: &mut dyn Platform) -> i32 {
        status(&self.command.run(self.module, argv, out, platform))
    }
}

impl<M: Capture + ?Sized> fmt::Debug for StructuredBinding<'_, '_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredBinding")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
