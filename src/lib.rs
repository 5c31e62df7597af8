//! Interactive git repository union tool.
//!
//! Merges the histories and file trees of independent git repositories into
//! one destination repository, isolating each source's files under a
//! subdirectory named after it while keeping every source's commit history
//! reachable via unrelated-history merges. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (registry, snapshot diff).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, git, operator
//!   prompts). Isolated to enable faking in tests.
//!
//! Orchestration modules ([`prepare`], [`collect`], [`union`]) coordinate
//! core logic with I/O to implement the workflow.

pub mod collect;
pub mod config;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod prepare;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod union;
