//! I/O helpers for the union workflow.

pub mod git;
pub mod prompt;
pub mod workdir;
