use anyhow::{Context, Result};

use super::settings::ReportSettings;
use crate::cli::ReportArgs;
use crate::config::BoundConfig;
use crate::core::{Commit, CommitAttribution};
use crate::io::{create_writer, open_destination, read_commits};
use crate::metrics::attribute_commits;

/// Read commits and attribute them, returning both for later roll-ups
pub(crate) fn load_and_attribute(
    args: &ReportArgs,
    settings: &ReportSettings,
) -> Result<(Vec<Commit>, Vec<CommitAttribution>)> {
    let commits = read_commits(&args.input, args.input_format)
        .with_context(|| format!("Failed to read commits from {}", args.input.display()))?;
    log::info!(
        "Attributing {} commits with the {} metric",
        commits.len(),
        settings.metric
    );

    let attributions = attribute_commits(&commits, settings.metric, &settings.parallel)
        .context("Failed to attribute commits")?;
    Ok((commits, attributions))
}

pub fn handle_attribute(args: &ReportArgs, config: &BoundConfig) -> Result<()> {
    let settings = ReportSettings::resolve(args, config, None);
    settings.formatting().apply();

    let (_, attributions) = load_and_attribute(args, &settings)?;

    let destination = open_destination(args.output.as_deref())?;
    let mut writer = create_writer(settings.format, destination, settings.precision);
    writer.write_attributions(&attributions)?;
    Ok(())
}
