//! Orchestration for collecting the repository registry from the operator.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, instrument};

use crate::core::registry::Registry;
use crate::io::git::RemoteLookup;
use crate::io::prompt::Prompter;

/// Interactively build the registry, one URL/name pair at a time.
///
/// Each round prompts for a URL labeled with the 1-based entry count, then
/// for a name. An empty (or whitespace-only) URL terminates collection,
/// possibly with zero entries. End of input at any prompt terminates
/// collection too, keeping the entries gathered so far and discarding a
/// pending URL without a name. A rejected name is re-prompted on its own
/// while the URL is kept.
#[instrument(skip_all)]
pub fn collect_repositories<R: BufRead, W: Write, L: RemoteLookup>(
    prompter: &mut Prompter<R, W>,
    remotes: &L,
) -> Result<Registry> {
    let mut registry = Registry::new();
    prompter.say("Define the repositories to combine. End with an empty URL.")?;
    loop {
        let Some(url) = prompter.ask(&format!("URL {}: ", registry.len() + 1))? else {
            debug!(entries = registry.len(), "input ended, collection finished");
            return Ok(registry);
        };
        let name = prompter.ask("Repository name: ")?;
        if url.is_empty() {
            debug!(entries = registry.len(), "collection finished");
            return Ok(registry);
        }
        let Some(mut name) = name else {
            prompter.say("Input ended before a repository name was given; stopping collection.")?;
            return Ok(registry);
        };
        while !name_is_free(&registry, remotes, &name)? {
            prompter.say("Repository name is empty or already taken, please choose a different one.")?;
            match prompter.ask("Repository name: ")? {
                Some(next) => name = next,
                None => {
                    prompter.say(
                        "Input ended before a usable repository name was given; stopping collection.",
                    )?;
                    return Ok(registry);
                }
            }
        }
        debug!(name = %name, url = %url, "registered repository");
        registry.insert(&name, &url)?;
    }
}

/// A name is usable when it is non-empty, not yet registered in this run,
/// and not a configured git remote.
fn name_is_free<L: RemoteLookup>(registry: &Registry, remotes: &L, name: &str) -> Result<bool> {
    if name.is_empty() || registry.contains_name(name) {
        return Ok(false);
    }
    let configured = remotes.remote_names()?;
    Ok(!configured.iter().any(|remote| remote == name))
}
