//! Orchestration for preparing the destination repository.
//!
//! On success the working directory is a git repository with the primary
//! branch checked out, at least one commit, and no staged uncommitted
//! changes. Failures are surfaced as-is and stop the run; no partial-state
//! cleanup is attempted, since a human supervises the run and can inspect
//! the repository afterwards.

use std::fmt;
use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::config::UnionConfig;
use crate::io::git::{Git, NO_COMMITS_MARKER, STAGED_CHANGES_MARKER};

/// Throwaway file committed so a fresh repository has an initial commit.
pub const SEED_FILE: &str = "union.seed.delete.me";

const SEED_COMMIT_MESSAGE: &str = "Initial union seed commit";

/// Staged uncommitted changes were found at startup.
///
/// This is a deliberate refusal to guess operator intent; `main` maps it to
/// [`crate::exit_codes::DIRTY_INDEX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyIndexError;

impl fmt::Display for DirtyIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "there are staged uncommitted changes in the repository; \
             commit or discard them and try again"
        )
    }
}

impl std::error::Error for DirtyIndexError {}

/// Prepare the destination repository in `config.workdir`.
///
/// - Initializes a repository on the primary branch if none exists.
/// - Refuses to run while staged uncommitted changes are present.
/// - Creates a seed commit when the repository has no commits yet.
/// - Ensures the primary branch is checked out.
///
/// Idempotent on an already-prepared repository.
#[instrument(skip_all)]
pub fn prepare(git: &Git, config: &UnionConfig) -> Result<()> {
    if git.status_text().is_err() {
        info!(workdir = %config.workdir.display(), "no repository found, initializing");
        git.init(&config.primary_branch)
            .context("initialize repository")?;
    }

    let status = git
        .status_text()
        .context("repository should be initialized by now, but status still fails")?;

    if status.contains(STAGED_CHANGES_MARKER) {
        return Err(DirtyIndexError.into());
    }

    if status.contains(NO_COMMITS_MARKER) {
        info!("no initial commit found, creating one");
        let seed_path = config.workdir.join(SEED_FILE);
        fs::write(&seed_path, "union seed\n")
            .with_context(|| format!("write {}", seed_path.display()))?;
        git.add_path(SEED_FILE).context("stage seed file")?;
        git.commit_staged(SEED_COMMIT_MESSAGE)
            .context("create seed commit")?;
    }

    ensure_primary_branch(git, &config.primary_branch)?;
    Ok(())
}

/// Make sure the primary branch is checked out before any merge happens.
///
/// A repository sitting on some other branch gets a checkout; if the primary
/// branch does not exist the checkout fails and the run aborts.
fn ensure_primary_branch(git: &Git, branch: &str) -> Result<()> {
    let current = git.current_branch()?;
    if current == branch {
        debug!(branch, "primary branch already checked out");
        return Ok(());
    }
    info!(from = %current, to = %branch, "checking out primary branch");
    git.checkout_branch(branch)
        .with_context(|| format!("checkout primary branch {branch}"))
}
