//! Top-level snapshot diff: which entries did a merge introduce?

use std::collections::BTreeSet;
use std::ffi::OsString;

/// Entries present in `after` but absent from `before`, in sorted order.
///
/// This is a shallow diff over top-level entry names: a merge that only adds
/// files inside an already-existing directory contributes nothing here, and
/// a new directory is one movable unit, not its contents.
pub fn movable_entries(before: &BTreeSet<OsString>, after: &BTreeSet<OsString>) -> Vec<OsString> {
    after.difference(before).cloned().collect()
}
