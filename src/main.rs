//! Interactive CLI for merging unrelated git repositories into one.
//!
//! Prepares the destination repository, collects name/URL pairs from the
//! operator, then merges each source's primary branch and relocates its
//! files into a subdirectory named after it.

use std::io;
use std::path::PathBuf;

use clap::Parser;

use gitunion::collect::collect_repositories;
use gitunion::config::UnionConfig;
use gitunion::exit_codes;
use gitunion::io::git::Git;
use gitunion::io::prompt::Prompter;
use gitunion::logging;
use gitunion::prepare::{DirtyIndexError, prepare};
use gitunion::union::run_union;

#[derive(Parser)]
#[command(
    name = "gitunion",
    version,
    about = "Merge unrelated git repositories into per-repository subdirectories of one destination"
)]
struct Cli {
    /// Working directory of the destination repository.
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// Branch fetched from every source and merged into.
    #[arg(long, default_value = "master")]
    primary_branch: String,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        let code = if err.downcast_ref::<DirtyIndexError>().is_some() {
            exit_codes::DIRTY_INDEX
        } else {
            exit_codes::FAILURE
        };
        std::process::exit(code);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = UnionConfig {
        workdir: cli.workdir,
        primary_branch: cli.primary_branch,
    };
    let git = Git::new(&config.workdir);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    prepare(&git, &config)?;
    let registry = collect_repositories(&mut prompter, &git)?;
    run_union(&git, &config, &registry, &mut prompter)?;
    Ok(())
}
