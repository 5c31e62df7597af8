//! Test-only helpers for constructing scratch git repositories.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::config::UnionConfig;

/// A temporary git repository with a deterministic commit identity.
///
/// The repository is created on the `master` branch with no commits; tests
/// add content through [`TestRepo::commit_file`] and friends.
#[derive(Debug)]
pub struct TestRepo {
    temp: TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let repo = Self { temp };
        repo.git(&["init", "-b", "master"])?;
        repo.git(&["config", "user.name", "Test User"])?;
        repo.git(&["config", "user.email", "test@example.com"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        Ok(repo)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write a file relative to the root and commit it.
    pub fn commit_file(&self, name: &str, contents: &str, message: &str) -> Result<()> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        self.git(&["add", name])?;
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    /// Write a file relative to the root and stage it without committing.
    pub fn stage_file(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.root().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        self.git(&["add", name])?;
        Ok(())
    }

    /// Run a git command in the repository, failing on non-zero exit.
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let out = Command::new("git")
            .args(args)
            .env("LC_ALL", "C")
            .current_dir(self.root())
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))?;
        if !out.status.success() {
            return Err(anyhow!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&out.stderr).trim()
            ));
        }
        Ok(String::from_utf8_lossy(&out.stdout).to_string())
    }
}

/// Union configuration pointing at a test repository root.
pub fn test_config(workdir: &Path) -> UnionConfig {
    UnionConfig {
        workdir: workdir.to_path_buf(),
        primary_branch: "master".to_string(),
    }
}
