//! Run configuration threaded explicitly through every component.

use std::path::PathBuf;

/// Configuration for one union run.
///
/// The working directory is both the destination repository root and the
/// staging area each source's files land in before relocation; no other
/// location is touched.
#[derive(Debug, Clone)]
pub struct UnionConfig {
    /// Destination repository root.
    pub workdir: PathBuf,
    /// Branch fetched from every source and merged into.
    pub primary_branch: String,
}
