//! Stable exit codes for the gitunion CLI.

/// Run completed, including the zero-repositories case.
pub const OK: i32 = 0;
/// Fatal git or filesystem failure; the run stopped where it failed.
pub const FAILURE: i32 = 1;
/// Staged uncommitted changes found at startup; nothing was mutated.
pub const DIRTY_INDEX: i32 = 2;
