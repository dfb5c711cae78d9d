//! Replay a commit range onto a new branch

use std::path::Path;

use nbrebase::adapters::GitVersionControl;
use nbrebase::config::Config;
use nbrebase::core::ports::VersionControl;
use nbrebase::core::services::{Transplanter, VerifyReport, abandon_branch, resolve_range, verify_replay};
use nbrebase::output::{OutputMode, RebaseResult};

use crate::cli::app::RebaseArgs;

/// Replay `first..=last` onto `branch` with notebooks normalized
pub fn rebase(args: &RebaseArgs, config: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let vcs = GitVersionControl::open(&args.repo)?;
    let workdir = vcs.workdir();
    let config = Config::load(config, Some(workdir.as_path()))?;

    let mut options = config.replay_options();
    if let Some(primary) = &args.primary_branch {
        options.primary_branch.clone_from(primary);
    }
    let hosting_url = options.normalize.hosting_url.clone();
    let primary = options.primary_branch.clone();
    let projector = args
        .projector
        .unwrap_or(config.verify.projector)
        .build(&config.verify.jupyter);

    let range = resolve_range(&vcs, &args.first, &args.last)?;

    let mut transplanter = Transplanter::new(&vcs, projector.as_ref(), options);
    let replay = match transplanter.run(&range, &args.branch) {
        Ok(report) => report,
        Err(err) => {
            log::error!("replay stopped in state {}", transplanter.state());
            if args.cleanup_on_failure {
                match abandon_branch(&vcs, &args.branch, &primary) {
                    Ok(removed) => log::debug!("cleanup removed {}: {removed}", args.branch),
                    Err(cleanup) => log::warn!("cleanup of {} failed: {cleanup:#}", args.branch),
                }
            }
            return Err(err);
        },
    };

    let verification = if args.verify {
        Some(verify_replay(&vcs, projector.as_ref(), &range, &args.branch, &hosting_url)?)
    } else {
        None
    };
    let passed = verification.as_ref().is_none_or(VerifyReport::passed);

    RebaseResult { replay, verification }.render(mode);

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}
