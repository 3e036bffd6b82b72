use anyhow::{Context, Result};

use super::attribute::load_and_attribute;
use super::settings::ReportSettings;
use crate::cli::{ReportArgs, SummaryArgs};
use crate::config::BoundConfig;
use crate::core::TeamMemberships;
use crate::io::{create_writer, open_destination, read_memberships};
use crate::metrics::{summarize_with, SummaryOptions};

/// Merge summary flags over the `[summary]` config, loading memberships if named
pub(crate) fn summary_options(
    summary: &SummaryArgs,
    config: &BoundConfig,
    top_n: usize,
) -> Result<SummaryOptions> {
    let rank_by = summary.rank_by.unwrap_or(config.summary.rank_by);
    let mut options = SummaryOptions::new(top_n).with_rank_by(rank_by);

    let memberships_path = summary
        .memberships
        .as_deref()
        .or(config.summary.memberships.as_deref());
    if let Some(path) = memberships_path {
        let memberships = read_memberships(path)
            .with_context(|| format!("Failed to read memberships from {}", path.display()))?;
        log::info!(
            "Splitting team and outside work with {} memberships",
            memberships.len()
        );
        options = options.with_memberships(TeamMemberships::new(&memberships));
    }

    Ok(options)
}

pub fn handle_summary(
    args: &ReportArgs,
    summary: &SummaryArgs,
    config: &BoundConfig,
) -> Result<()> {
    let settings = ReportSettings::resolve(args, config, summary.top);
    settings.formatting().apply();
    let options = summary_options(summary, config, settings.top_contributors)?;

    let (commits, attributions) = load_and_attribute(args, &settings)?;
    let report = summarize_with(&commits, &attributions, settings.metric, &options);
    log::info!(
        "Summarized {} owners ({} commits without weighable changes)",
        report.owners.len(),
        report.degenerate_commits
    );

    let destination = open_destination(args.output.as_deref())?;
    let mut writer = create_writer(settings.format, destination, settings.precision);
    writer.write_summary(&report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ContributorRanking;
    use std::fs;
    use tempfile::TempDir;

    fn write_memberships(dir: &TempDir, name: &str, rows: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, format!("author_email\tauthor_name\tcodeowner\n{rows}")).unwrap();
        path
    }

    #[test]
    fn test_options_from_config() {
        let temp = TempDir::new().unwrap();
        let mut config = BoundConfig::default();
        config.summary.rank_by = ContributorRanking::Commits;
        config.summary.memberships = Some(write_memberships(&temp, "m.tsv", "a@x\tA\t@core\n"));

        let options = summary_options(&SummaryArgs::default(), &config, 4).unwrap();
        assert_eq!(options.top_n, 4);
        assert_eq!(options.rank_by, ContributorRanking::Commits);
        assert_eq!(options.memberships.len(), 1);
        assert!(options.memberships.is_member("A", "@core"));
    }

    #[test]
    fn test_flags_override_config() {
        let temp = TempDir::new().unwrap();
        let mut config = BoundConfig::default();
        config.summary.memberships = Some(temp.path().join("missing.tsv"));

        let flags = SummaryArgs {
            top: None,
            rank_by: Some(ContributorRanking::Changes),
            memberships: Some(write_memberships(
                &temp,
                "flag.tsv",
                "a@x\tA\t@core\nb@x\tB\t@web\n",
            )),
        };
        let options = summary_options(&flags, &config, 10).unwrap();
        assert_eq!(options.rank_by, ContributorRanking::Changes);
        assert_eq!(options.memberships.len(), 2);
    }

    #[test]
    fn test_no_memberships_by_default() {
        let options = summary_options(&SummaryArgs::default(), &BoundConfig::default(), 10).unwrap();
        assert!(options.memberships.is_empty());
    }

    #[test]
    fn test_missing_memberships_file_is_error() {
        let temp = TempDir::new().unwrap();
        let flags = SummaryArgs {
            memberships: Some(temp.path().join("missing.tsv")),
            ..Default::default()
        };
        let err = summary_options(&flags, &BoundConfig::default(), 10).unwrap_err();
        assert!(err.to_string().contains("Failed to read memberships"));
    }
}
