//! View table: named subsets of a module's fields.
//!
//! A view is a small identifier (`0..32`) that selects which fields a print
//! operation renders. One view per command is designated as the full view and
//! always renders every field. The table maps the names typed on the command
//! line to those identifiers.
//!
//! # Examples
//!
//! ```rust
//! use dbgshell::view::{ViewEntry, ViewTable};
//!
//! const FULL: u8 = 0;
//! const IMU: u8 = 1;
//!
//! static VIEWS: ViewTable = ViewTable::new(&[
//!     ViewEntry::new("full", FULL),
//!     ViewEntry::new("imu", IMU),
//! ]);
//!
//! assert_eq!(VIEWS.resolve("imu"), Some(IMU));
//! assert_eq!(VIEWS.name_of(FULL), "full");
//! assert_eq!(VIEWS.name_of(9), "unknown");
//! ```

use core::fmt;

/// Identifier of a view. Must be below [`MAX_VIEWS`].
pub type ViewId = u8;

/// Set of views, one bit per [`ViewId`].
pub type ViewMask = u32;

/// Number of distinct views a mask can hold.
pub const MAX_VIEWS: u8 = 32;

/// Name returned by [`ViewTable::name_of`] for ids missing from the table.
pub const UNKNOWN_VIEW_NAME: &str = "unknown";

/// Mask bit of a single view.
///
/// Ids outside `0..32` have no bit and yield an empty mask.
pub const fn view_bit(view: ViewId) -> ViewMask {
    match 1u32.checked_shl(view as u32) {
        Some(bit) => bit,
        None => 0,
    }
}

/// Union of the bits of several views.
///
/// ```rust
/// use dbgshell::view::view_mask;
///
/// assert_eq!(view_mask(&[1, 3]), 0b1010);
/// ```
pub const fn view_mask(views: &[ViewId]) -> ViewMask {
    let mut mask = 0;
    let mut i = 0;
    while i < views.len() {
        mask |= view_bit(views[i]);
        i += 1;
    }
    mask
}

/// One row of a [`ViewTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry {
    /// Name typed on the command line. Matched case-sensitively.
    pub name: &'static str,
    /// Identifier the name resolves to.
    pub view: ViewId,
}

impl ViewEntry {
    /// Create a table row.
    pub const fn new(name: &'static str, view: ViewId) -> Self {
        Self { name, view }
    }
}

/// Read-only mapping between view names and view ids.
///
/// Duplicate names are not rejected; lookups return the first match.
#[derive(Debug, Clone, Copy)]
pub struct ViewTable {
    entries: &'static [ViewEntry],
}

impl ViewTable {
    /// Wrap a static list of entries.
    ///
    /// # Panics
    ///
    /// Panics if an entry's id does not fit in a [`ViewMask`]. In a `static`
    /// or `const` initializer this is a compile-time error.
    pub const fn new(entries: &'static [ViewEntry]) -> Self {
        let mut i = 0;
        while i < entries.len() {
            assert!(entries[i].view < MAX_VIEWS, "view id must be below 32");
            i += 1;
        }
        Self { entries }
    }

    /// Look up the id of a view name. Empty input never matches.
    pub fn resolve(&self, name: &str) -> Option<ViewId> {
        if name.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.view)
    }

    /// Name of a view id, or [`UNKNOWN_VIEW_NAME`] if the table lacks it.
    pub fn name_of(&self, view: ViewId) -> &'static str {
        self.entries
            .iter()
            .find(|entry| entry.view == view)
            .map_or(UNKNOWN_VIEW_NAME, |entry| entry.name)
    }

    /// View names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// All rows of the table.
    pub fn entries(&self) -> &'static [ViewEntry] {
        self.entries
    }

    /// Write the names joined by `|`, the form used in usage text.
    pub fn write_help(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                out.write_char('|')?;
            }
            out.write_str(name)?;
        }
        Ok(())
    }
}
