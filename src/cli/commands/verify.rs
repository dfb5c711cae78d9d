//! Compare two notebooks through their script projections

use std::path::Path;

use nbrebase::adapters::ProjectorKind;
use nbrebase::config::Config;
use nbrebase::core::services::{equivalent, equivalent_ignoring_badge};
use nbrebase::output::{EquivalenceResult, OutputMode};

/// Check whether `a` and `b` project to the same script
pub fn verify(
    a: &Path,
    b: &Path,
    ignore_badge: bool,
    projector: Option<ProjectorKind>,
    config: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = Config::load(config, Some(Path::new(".")))?;
    let projector = projector
        .unwrap_or(config.verify.projector)
        .build(&config.verify.jupyter);

    let same = if ignore_badge {
        equivalent_ignoring_badge(projector.as_ref(), a, b, &config.normalize.hosting_url)?
    } else {
        equivalent(projector.as_ref(), a, b)?
    };

    EquivalenceResult {
        a: a.to_path_buf(),
        b: b.to_path_buf(),
        equivalent: same,
    }
    .render(mode);

    if !same {
        std::process::exit(1);
    }
    Ok(())
}
