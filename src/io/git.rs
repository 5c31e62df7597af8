//! Git adapter for the union workflow.
//!
//! The workflow drives a handful of porcelain commands and matches two
//! well-known status strings, so we keep a small, explicit wrapper around
//! `git` subprocess calls. Arguments are always passed as structured lists,
//! never interpolated into a shell string.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

/// Source of already-configured remote names.
///
/// Name validation during collection re-queries this on every attempt so a
/// collision with a remote configured outside this run is rejected before
/// `git remote add` can fail on it. Implemented by [`Git`]; faked in tests.
pub trait RemoteLookup {
    fn remote_names(&self) -> Result<Vec<String>>;
}

/// Status text emitted for a repository without any commit.
pub const NO_COMMITS_MARKER: &str = "No commits yet";
/// Status text emitted when the index holds staged, uncommitted changes.
pub const STAGED_CHANGES_MARKER: &str = "Changes to be committed";

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Capture `git status` text; fails when the directory is not a repository.
    pub fn status_text(&self) -> Result<String> {
        self.run_capture(&["status"])
    }

    /// Initialize a repository in the workdir with the given initial branch.
    #[instrument(skip_all, fields(branch))]
    pub fn init(&self, branch: &str) -> Result<()> {
        debug!(branch, "initializing repository");
        self.run_checked(&["init", "-b", branch])?;
        Ok(())
    }

    /// Return the branch HEAD points at (works on an unborn branch).
    pub fn current_branch(&self) -> Result<String> {
        let out = self.run_capture(&["symbolic-ref", "--short", "HEAD"])?;
        Ok(out.trim().to_string())
    }

    /// Checkout an existing branch.
    #[instrument(skip_all, fields(branch))]
    pub fn checkout_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "checking out branch");
        self.run_checked(&["checkout", branch])?;
        Ok(())
    }

    /// List configured remote names.
    pub fn remote_names(&self) -> Result<Vec<String>> {
        let out = self.run_capture(&["remote"])?;
        Ok(out
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    /// Register a remote.
    #[instrument(skip_all, fields(name))]
    pub fn remote_add(&self, name: &str, url: &str) -> Result<()> {
        debug!(name, url, "adding remote");
        self.run_checked(&["remote", "add", name, url])?;
        Ok(())
    }

    /// Fetch one branch from a remote.
    #[instrument(skip_all, fields(remote, branch))]
    pub fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        debug!(remote, branch, "fetching");
        self.run_checked(&["fetch", remote, branch])?;
        Ok(())
    }

    /// Merge a ref into the current branch, permitting histories that share
    /// no common ancestor.
    #[instrument(skip_all, fields(refname))]
    pub fn merge_unrelated(&self, refname: &str) -> Result<()> {
        debug!(refname, "merging unrelated history");
        self.run_checked(&["merge", refname, "--allow-unrelated-histories"])?;
        Ok(())
    }

    /// Stage a single path.
    pub fn add_path(&self, path: &str) -> Result<()> {
        self.run_checked(&["add", path])?;
        Ok(())
    }

    /// Stage all changes (respects .gitignore).
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    /// True if there is anything staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let out = self.run_checked(&["diff", "--cached", "--name-only"])?;
        Ok(!String::from_utf8_lossy(&out.stdout).trim().is_empty())
    }

    /// Commit staged changes with a message.
    ///
    /// If there are no staged changes, this returns Ok(false) and does nothing.
    #[instrument(skip_all)]
    pub fn commit_staged(&self, message: &str) -> Result<bool> {
        if !self.has_staged_changes()? {
            debug!("no staged changes, skipping commit");
            return Ok(false);
        }
        debug!("committing staged changes");
        self.run_checked(&["commit", "-m", message])?;
        Ok(true)
    }

    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = format!("{} {}", stdout.trim(), stderr.trim());
            return Err(anyhow!(
                "git {} failed: {}",
                args.join(" "),
                detail.trim()
            ));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        // LC_ALL=C: two workflow decisions match untranslated status text.
        // GIT_MERGE_AUTOEDIT=no: merge commits must never wait on an editor.
        Command::new("git")
            .args(args)
            .env("LC_ALL", "C")
            .env("GIT_MERGE_AUTOEDIT", "no")
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

impl RemoteLookup for Git {
    fn remote_names(&self) -> Result<Vec<String>> {
        Git::remote_names(self)
    }
}
