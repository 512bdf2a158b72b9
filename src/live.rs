//! Live debug commands: fields read straight from the module at print time.
//!
//! A [`LiveCommand`] renders fields whose accessors take the module itself.
//! Each accessor runs while the block is printed, so every line shows the
//! freshest value of its field but the block as a whole is not a consistent
//! snapshot. When another execution context may mutate the module mid-print,
//! give the command [`LockHooks`]: the lock is taken before the header and
//! released after the last field on every exit path, including output errors.
//!
//! # Examples
//!
//! ```rust
//! use core::cell::Cell;
//!
//! use dbgshell::command::CommandInfo;
//! use dbgshell::field::Field;
//! use dbgshell::live::LiveCommand;
//! use dbgshell::platform::Platform;
//! use dbgshell::view::{view_bit, ViewEntry, ViewTable};
//!
//! struct Gimbal {
//!     yaw: Cell<f32>,
//!     online: Cell<bool>,
//! }
//!
//! const FULL: u8 = 0;
//! const ANGLE: u8 = 1;
//!
//! static VIEWS: ViewTable = ViewTable::new(&[
//!     ViewEntry::new("full", FULL),
//!     ViewEntry::new("angle", ANGLE),
//! ]);
//!
//! static FIELDS: &[Field<Gimbal>] = &[
//!     Field::f32("yaw", view_bit(ANGLE), |g: &Gimbal| g.yaw.get()),
//!     Field::bool("online", 0, |g: &Gimbal| g.online.get()),
//! ];
//!
//! struct Clock;
//!
//! impl Platform for Clock {
//!     fn now_ms(&self) -> u64 {
//!         42
//!     }
//!
//!     fn sleep_ms(&mut self, _ms: u32) {}
//! }
//!
//! let command = LiveCommand::new(CommandInfo::new("gimbal", VIEWS, FULL), FIELDS);
//! let gimbal = Gimbal { yaw: Cell::new(0.25), online: Cell::new(true) };
//!
//! let mut out = String::new();
//! command.run(&gimbal, &["gimbal", "angle"], &mut out, &mut Clock).unwrap();
//! assert_eq!(out, "[42 ms] gimbal angle\r\n  yaw=0.2500\r\n");
//! ```

use core::fmt::{self, Write};

use crate::command::{run_command, status, CommandError, CommandInfo, DebugCommand};
use crate::field::{render_fields, Field};
use crate::platform::Platform;
use crate::view::ViewId;

/// Lock and unlock functions bracketing one live print.
///
/// Both receive the module by shared reference; the module provides its own
/// interior mutability (critical section, RTOS mutex, ...).
pub struct LockHooks<O: ?Sized> {
    /// Acquire exclusive access to the module.
    pub lock: fn(&O),
    /// Release what [`lock`](Self::lock) acquired.
    pub unlock: fn(&O),
}

impl<O: ?Sized> LockHooks<O> {
    /// Pair a lock and an unlock function.
    pub const fn new(lock: fn(&O), unlock: fn(&O)) -> Self {
        Self { lock, unlock }
    }

    /// Lock `owner` until the returned guard is dropped.
    pub fn acquire<'a>(&self, owner: &'a O) -> LockGuard<'a, O> {
        (self.lock)(owner);
        LockGuard { owner, unlock: self.unlock }
    }
}

impl<O: ?Sized> Clone for LockHooks<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized> Copy for LockHooks<O> {}

impl<O: ?Sized> fmt::Debug for LockHooks<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockHooks").finish_non_exhaustive()
    }
}

/// Held lock on a module; unlocks on drop.
pub struct LockGuard<'a, O: ?Sized> {
    owner: &'a O,
    unlock: fn(&O),
}

impl<O: ?Sized> Drop for LockGuard<'_, O> {
    fn drop(&mut self) {
        (self.unlock)(self.owner);
    }
}

impl<O: ?Sized> fmt::Debug for LockGuard<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard").finish_non_exhaustive()
    }
}

/// Debug command over fields of a module type `O`.
pub struct LiveCommand<'t, O: ?Sized> {
    /// Name, views and configuration.
    pub info: CommandInfo,
    /// Field table in print order.
    pub fields: &'t [Field<O>],
    /// Optional lock taken around each print.
    pub lock: Option<LockHooks<O>>,
}

impl<'t, O: ?Sized> LiveCommand<'t, O> {
    /// Create an unlocked command.
    pub const fn new(info: CommandInfo, fields: &'t [Field<O>]) -> Self {
        Self { info, fields, lock: None }
    }

    /// Take `hooks` around every print.
    pub const fn with_lock(mut self, hooks: LockHooks<O>) -> Self {
        self.lock = Some(hooks);
        self
    }

    /// Print the header and the fields of `view` once.
    pub fn print_once(
        &self,
        owner: &O,
        out: &mut dyn Write,
        platform: &dyn Platform,
        view: ViewId,
    ) -> fmt::Result {
        let _guard = self.lock.as_ref().map(|hooks| hooks.acquire(owner));
        self.info.write_header(out, platform.now_ms(), view)?;
        render_fields(out, self.fields, owner, view, self.info.full_view, self.info.precision())?;
        Ok(())
    }

    /// Execute one command line against `owner`.
    pub fn run<'a>(
        &self,
        owner: &O,
        argv: &[&'a str],
        out: &mut dyn Write,
        platform: &mut dyn Platform,
    ) -> Result<(), CommandError<'a>> {
        run_command(argv, &self.info, out, platform, |out, platform, view| {
            self.print_once(owner, out, platform, view)
        })
    }

    /// Bind this command to a module so a shell can invoke it.
    pub fn attach<'c>(&'c self, owner: &'c O) -> LiveBinding<'c, 't, O> {
        LiveBinding { command: self, owner }
    }
}

impl<O: ?Sized> fmt::Debug for LiveCommand<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveCommand")
            .field("info", &self.info)
            .field("fields", &self.fields)
            .field("locked", &self.lock.is_some())
            .finish()
    }
}

/// A [`LiveCommand`] together with the module it reads.
pub struct LiveBinding<'c, 't, O: ?Sized> {
    command: &'c LiveCommand<'t, O>,
    owner: &'c O,
}

impl<O: ?Sized> DebugCommand for LiveBinding<'_, '_, O> {
    fn name(&self) -> &str {
        self.command.info.module_name
    }

    fn description(&self) -> &str {
        self.command.info.description
    }

    fn invoke(&mut self, argv: &[&str], out: &mut dyn Write, platform: &mut dyn Platform) -> i32 {
        status(&self.command.run(self.owner, argv, out, platform))
    }
}

impl<O: ?Sized> fmt::Debug for LiveBinding<'_, '_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveBinding")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
