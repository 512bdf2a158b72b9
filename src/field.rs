//! Field descriptor tables and value printers.
//!
//! A [`Field`] names one value of a module, the views it belongs to and a
//! typed accessor that reads it from a source `T`. The same descriptor type
//! serves both command flavors:
//!
//! - **structured** commands read fields from a captured snapshot, so `T` is
//!   the snapshot type;
//! - **live** commands read fields straight from the module, so `T` is the
//!   module type and every accessor runs at print time.
//!
//! Each selected field is written as one line, `  <name>=<value>\r\n`.
//!
//! # Examples
//!
//! ```rust
//! use dbgshell::field::{render_fields, Field};
//! use dbgshell::snapshot_field;
//!
//! #[derive(Default)]
//! struct MotorSnapshot {
//!     enabled: bool,
//!     mode: u8,
//!     current: f32,
//! }
//!
//! static FIELDS: &[Field<MotorSnapshot>] = &[
//!     snapshot_field!(bool, MotorSnapshot, enabled, 0b10),
//!     snapshot_field!(u8, MotorSnapshot, mode, 0),
//!     snapshot_field!(f32, MotorSnapshot, current, 0b10),
//! ];
//!
//! let snapshot = MotorSnapshot { enabled: true, mode: 3, current: 1.5 };
//! let mut out = String::new();
//! render_fields(&mut out, FIELDS, &snapshot, 1, 0, 4).unwrap();
//! assert_eq!(out, "  enabled=true\r\n  current=1.5000\r\n");
//! ```

use core::fmt::{self, Write};

use crate::view::{view_bit, ViewId, ViewMask};

/// Decimals used by [`print_f32`] when no configuration overrides it.
pub const F32_PRECISION: usize = 4;

/// Printer for values that do not fit the built-in kinds.
///
/// Receives the output, the field name and the source, and must write a
/// complete line itself.
pub type CustomPrinter<T> = fn(out: &mut dyn Write, name: &str, source: &T) -> fmt::Result;

/// Write `  <name>=true|false`.
pub fn print_bool(out: &mut dyn Write, name: &str, value: bool) -> fmt::Result {
    write!(out, "  {}={}\r\n", name, if value { "true" } else { "false" })
}

/// Write `  <name>=<value>` for a small unsigned integer.
pub fn print_u8(out: &mut dyn Write, name: &str, value: u8) -> fmt::Result {
    write!(out, "  {}={}\r\n", name, value)
}

/// Write `  <name>=<value>` with `precision` decimals.
pub fn print_f32(out: &mut dyn Write, name: &str, value: f32, precision: usize) -> fmt::Result {
    write!(out, "  {}={:.*}\r\n", name, precision, value)
}

/// A value read out of a source, before formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Small unsigned integer (mode, state, counter).
    U8(u8),
    /// Floating-point measurement.
    F32(f32),
}

impl Value {
    /// Write this value as a field line.
    pub fn print(self, out: &mut dyn Write, name: &str, precision: usize) -> fmt::Result {
        match self {
            Value::Bool(v) => print_bool(out, name, v),
            Value::U8(v) => print_u8(out, name, v),
            Value::F32(v) => print_f32(out, name, v, precision),
        }
    }
}

/// How a field obtains its value from a source `T`.
pub enum Accessor<T: ?Sized> {
    /// Read a boolean.
    Bool(fn(&T) -> bool),
    /// Read a small unsigned integer.
    U8(fn(&T) -> u8),
    /// Read a float.
    F32(fn(&T) -> f32),
    /// Format the line with a caller-supplied printer.
    Custom(CustomPrinter<T>),
}

impl<T: ?Sized> Accessor<T> {
    /// Evaluate a typed accessor. Custom printers have no value.
    pub fn read(&self, source: &T) -> Option<Value> {
        match self {
            Accessor::Bool(read) => Some(Value::Bool(read(source))),
            Accessor::U8(read) => Some(Value::U8(read(source))),
            Accessor::F32(read) => Some(Value::F32(read(source))),
            Accessor::Custom(_) => None,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Accessor::Bool(_) => "Bool",
            Accessor::U8(_) => "U8",
            Accessor::F32(_) => "F32",
            Accessor::Custom(_) => "Custom",
        })
    }
}

/// Descriptor of one printable field.
pub struct Field<T: ?Sized> {
    /// Name printed before `=`.
    pub name: &'static str,
    /// Views that include this field. Zero means "full view only".
    pub mask: ViewMask,
    /// Source of the value.
    pub accessor: Accessor<T>,
}

impl<T: ?Sized> Field<T> {
    /// Boolean field.
    pub const fn bool(name: &'static str, mask: ViewMask, read: fn(&T) -> bool) -> Self {
        Self { name, mask, accessor: Accessor::Bool(read) }
    }

    /// `u8` field.
    pub const fn u8(name: &'static str, mask: ViewMask, read: fn(&T) -> u8) -> Self {
        Self { name, mask, accessor: Accessor::U8(read) }
    }

    /// `f32` field.
    pub const fn f32(name: &'static str, mask: ViewMask, read: fn(&T) -> f32) -> Self {
        Self { name, mask, accessor: Accessor::F32(read) }
    }

    /// Field rendered by a custom printer.
    pub const fn custom(name: &'static str, mask: ViewMask, print: CustomPrinter<T>) -> Self {
        Self { name, mask, accessor: Accessor::Custom(print) }
    }

    /// Whether the field is rendered under `view`.
    ///
    /// The full view shows everything; any other view needs its bit in
    /// [`mask`](Self::mask).
    pub fn is_visible(&self, view: ViewId, full_view: ViewId) -> bool {
        view == full_view || self.mask & view_bit(view) != 0
    }

    /// Read the field from `source` and write its line.
    pub fn print(&self, out: &mut dyn Write, source: &T, precision: usize) -> fmt::Result {
        match &self.accessor {
            Accessor::Custom(print) => print(out, self.name, source),
            accessor => match accessor.read(source) {
                Some(value) => value.print(out, self.name, precision),
                None => Ok(()),
            },
        }
    }
}

impl<T: ?Sized> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("mask", &format_args!("{:#x}", self.mask))
            .finish_non_exhaustive()
    }
}

/// Render every field of `fields` visible under `view`, in table order.
///
/// Returns the number of lines written.
pub fn render_fields<T: ?Sized>(
    out: &mut dyn Write,
    fields: &[Field<T>],
    source: &T,
    view: ViewId,
    full_view: ViewId,
    precision: usize,
) -> Result<usize, fmt::Error> {
    let mut printed = 0;
    for field in fields.iter().filter(|f| f.is_visible(view, full_view)) {
        field.print(out, source, precision)?;
        printed += 1;
    }
    Ok(printed)
}

/// Build a [`Field`] named after a member of a snapshot struct.
///
/// The first token selects the printer: `bool`, `u8` or `f32`.
///
/// ```rust
/// use dbgshell::field::Field;
/// use dbgshell::snapshot_field;
///
/// struct Imu { calibrated: bool }
///
/// static FIELDS: &[Field<Imu>] = &[snapshot_field!(bool, Imu, calibrated, 0b10)];
/// assert_eq!(FIELDS[0].name, "calibrated");
/// ```
#[macro_export]
macro_rules! snapshot_field {
    (bool, $snapshot:ty, $member:ident, $mask:expr) => {
        $crate::field::Field::<$snapshot>::bool(
            stringify!($member),
            $mask,
            |s: &$snapshot| s.$member,
        )
    };
    (u8, $snapshot:ty, $member:ident, $mask:expr) => {
        $crate::field::Field::<$snapshot>::u8(
            stringify!($member),
            $mask,
            |s: &$snapshot| s.$member,
        )
    };
    (f32, $snapshot:ty, $member:ident, $mask:expr) => {
        $crate::field::Field::<$snapshot>::f32(
            stringify!($member),
            $mask,
            |s: &$snapshot| s.$member,
        )
    };
}
