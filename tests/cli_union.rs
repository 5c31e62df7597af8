//! CLI tests for the gitunion binary.
//!
//! Spawns the built binary against scratch repositories and verifies exit
//! codes, repository state, and the resulting tree layout.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use gitunion::exit_codes;
use gitunion::prepare::SEED_FILE;
use gitunion::test_support::TestRepo;

/// Run the binary in `workdir`, feeding `script` on stdin.
///
/// Commit identity comes from the environment so repositories the tool
/// itself initializes can commit without any local git config.
fn run_gitunion(workdir: &Path, script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gitunion"))
        .arg("--workdir")
        .arg(workdir)
        .env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn gitunion");
    // A run that refuses to start exits without reading stdin; ignore the
    // resulting broken pipe instead of failing the test on the write.
    let _ = child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(script.as_bytes());
    child.wait_with_output().expect("wait gitunion")
}

#[test]
fn empty_registry_completes_cleanly() {
    let dest = TestRepo::new().expect("dest");
    dest.commit_file("dest.txt", "destination\n", "initial commit")
        .expect("commit");

    let output = run_gitunion(dest.root(), "\n\n");
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let remotes = dest.git(&["remote"]).expect("remotes");
    assert!(remotes.trim().is_empty());
}

#[test]
fn initializes_missing_repository_with_seed_commit() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = run_gitunion(temp.path(), "\n\n");
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    assert!(temp.path().join(".git").is_dir());
    assert!(temp.path().join(SEED_FILE).exists());

    let log = Command::new("git")
        .args(["log", "--pretty=%s"])
        .current_dir(temp.path())
        .output()
        .expect("git log");
    assert!(log.status.success());
    assert!(String::from_utf8_lossy(&log.stdout).contains("Initial union seed commit"));
}

#[test]
fn merges_single_repository_into_subdirectory() {
    let source = TestRepo::new().expect("source");
    source
        .commit_file("readme.txt", "from alpha\n", "add readme")
        .expect("commit");

    let dest = TestRepo::new().expect("dest");
    dest.commit_file("dest.txt", "destination\n", "initial commit")
        .expect("commit");

    let script = format!("{}\nalpha\n\n\n", source.root().display());
    let output = run_gitunion(dest.root(), &script);
    assert_eq!(
        output.status.code(),
        Some(exit_codes::OK),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(dest.root().join("alpha/readme.txt").exists());
    assert!(!dest.root().join("readme.txt").exists());

    let log = dest.git(&["log", "--pretty=%s"]).expect("log");
    let moves = log
        .lines()
        .filter(|line| line.contains("Moved files from alpha"))
        .count();
    assert_eq!(moves, 1);
}

#[test]
fn merges_two_repositories_in_input_order() {
    let alpha = TestRepo::new().expect("alpha");
    alpha.commit_file("a.txt", "a\n", "add a").expect("commit");
    let beta = TestRepo::new().expect("beta");
    beta.commit_file("b.txt", "b\n", "add b").expect("commit");

    let dest = TestRepo::new().expect("dest");
    dest.commit_file("dest.txt", "destination\n", "initial commit")
        .expect("commit");

    let script = format!(
        "{}\nalpha\n{}\nbeta\n\n\n",
        alpha.root().display(),
        beta.root().display()
    );
    let output = run_gitunion(dest.root(), &script);
    assert_eq!(
        output.status.code(),
        Some(exit_codes::OK),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(dest.root().join("alpha/a.txt").exists());
    assert!(dest.root().join("beta/b.txt").exists());
    assert!(dest.root().join("dest.txt").exists());
}

#[test]
fn dirty_index_blocks_startup_before_any_remote() {
    let source = TestRepo::new().expect("source");
    source
        .commit_file("readme.txt", "from alpha\n", "add readme")
        .expect("commit");

    let dest = TestRepo::new().expect("dest");
    dest.commit_file("dest.txt", "destination\n", "initial commit")
        .expect("commit");
    dest.stage_file("staged.txt", "pending\n").expect("stage");

    let script = format!("{}\nalpha\n\n\n", source.root().display());
    let output = run_gitunion(dest.root(), &script);
    assert_eq!(output.status.code(), Some(exit_codes::DIRTY_INDEX));

    let remotes = dest.git(&["remote"]).expect("remotes");
    assert!(remotes.trim().is_empty());
}

#[test]
fn unreachable_url_fails_the_run() {
    let dest = TestRepo::new().expect("dest");
    dest.commit_file("dest.txt", "destination\n", "initial commit")
        .expect("commit");

    let missing = dest.root().join("no-such-repo");
    let script = format!("{}\nalpha\n\n\n", missing.display());
    let output = run_gitunion(dest.root(), &script);
    assert_eq!(output.status.code(), Some(exit_codes::FAILURE));
    assert!(String::from_utf8_lossy(&output.stderr).contains("alpha"));
}
