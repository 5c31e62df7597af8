//! Orchestration for the per-repository merge workflow.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::UnionConfig;
use crate::core::movable::movable_entries;
use crate::core::registry::Registry;
use crate::io::git::Git;
use crate::io::prompt::Prompter;
use crate::io::workdir::{isolate, list_top_level};

/// Merge every registered repository into its own subdirectory, in
/// insertion order.
///
/// Each iteration mutates the working tree and index the next iteration's
/// snapshot depends on, so the loop is strictly sequential. Any git or
/// filesystem failure stops the run where it happened; merges already
/// completed are not rolled back.
#[instrument(skip_all)]
pub fn run_union<R: BufRead, W: Write>(
    git: &Git,
    config: &UnionConfig,
    registry: &Registry,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    for entry in registry.iter() {
        merge_one(git, config, &entry.name, &entry.url, prompter)
            .with_context(|| format!("failed to incorporate {} ({})", entry.name, entry.url))?;
    }
    Ok(())
}

/// Incorporate one source repository under `workdir/<name>/`.
fn merge_one<R: BufRead, W: Write>(
    git: &Git,
    config: &UnionConfig,
    name: &str,
    url: &str,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let before = list_top_level(&config.workdir)?;

    prompter.say(&format!("Adding remote {name} ({url})"))?;
    git.remote_add(name, url)?;

    prompter.say(&format!("Fetching {} from {name}", config.primary_branch))?;
    git.fetch(name, &config.primary_branch)?;

    prompter.say(&format!("Merging {name}/{}", config.primary_branch))?;
    git.merge_unrelated(&format!("{name}/{}", config.primary_branch))?;

    let after = list_top_level(&config.workdir)?;
    let movable = movable_entries(&before, &after);
    info!(name, entries = movable.len(), "isolating merged entries");
    prompter.say(&format!(
        "Moving {} merged entries into {name}/:",
        movable.len()
    ))?;
    for entry in &movable {
        prompter.say(&format!("  {}", entry.to_string_lossy()))?;
    }
    isolate(&config.workdir, name, &movable)?;

    git.add_all().context("stage relocated entries")?;
    let committed = git
        .commit_staged(&format!(
            "Moved files from {name} repository to a separate directory"
        ))
        .context("commit relocation")?;
    if !committed {
        prompter.say(&format!("Nothing to commit for {name}"))?;
    }
    Ok(())
}
