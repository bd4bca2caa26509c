use anyhow::{Context, Result};
use ecm_version_engine::{SyncConfig, Synchronizer, plan};

use crate::args::Args;
use crate::config::changes_from_args;
use crate::presentation::{self, ConsoleReporter};

/// Show the record, or apply the requested changes and propagate them.
///
/// # Errors
/// Fails on an invalid `--set` value before any target is touched, and on any
/// load, rewrite or save failure.
pub fn run(args: &Args) -> Result<()> {
    let config = SyncConfig::try_from(args)?;
    tracing::debug!(root = %config.project_root.display(), "project root");
    let sync = Synchronizer::new(config);

    let (current, created) = sync.load()?;
    if created {
        eprintln!("Error: VERSION file not found. Creating default...");
    }

    let changes = changes_from_args(args);
    let (next, applied) = plan(current, &changes)?;

    if !changes.is_mutating() {
        return presentation::print_show(&current, &sync.expected(&current), args.format)
            .context("failed to write version report");
    }

    presentation::print_applied(&applied);
    presentation::print_updating(&next);
    sync.apply(&next, &mut ConsoleReporter)?;
    presentation::print_done();
    Ok(())
}
