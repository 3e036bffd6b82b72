use super::{format_contributors, format_fraction, DEGENERATE_LABEL};
use crate::core::CommitAttribution;
use crate::io::output::OutputWriter;
use crate::metrics::SummaryReport;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
    precision: usize,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, precision: usize) -> Self {
        Self { writer, precision }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_banner(&mut self, title: &str, subtitle: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", title.bold().cyan())?;
        writeln!(self.writer, "{}", subtitle.dimmed())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn numeric(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_attributions(&mut self, attributions: &[CommitAttribution]) -> anyhow::Result<()> {
        let metric = attributions
            .first()
            .map(|a| a.metric.to_string())
            .unwrap_or_else(|| "-".to_string());
        self.write_banner(
            "ADJUSTED ATTRIBUTION",
            &format!("metric: {} | commits: {}", metric, attributions.len()),
        )?;

        let mut table = new_table(vec!["Commit", "Owner", "Fraction", "Total changes"]);
        for attribution in attributions {
            if attribution.is_degenerate() {
                table.add_row(vec![
                    Cell::new(&attribution.commit_id),
                    Cell::new("-"),
                    Cell::new(DEGENERATE_LABEL),
                    numeric(attribution.total_changes),
                ]);
                continue;
            }

            for (i, owner) in attribution.ranked().into_iter().enumerate() {
                // commit id and total only on the first row of each commit
                let (commit, total) = if i == 0 {
                    (
                        attribution.commit_id.clone(),
                        attribution.total_changes.to_string(),
                    )
                } else {
                    (String::new(), String::new())
                };
                table.add_row(vec![
                    Cell::new(commit),
                    Cell::new(owner.owner),
                    numeric(format_fraction(owner.fraction, self.precision)),
                    numeric(total),
                ]);
            }
        }

        writeln!(self.writer, "{table}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_summary(&mut self, report: &SummaryReport) -> anyhow::Result<()> {
        self.write_banner(
            "OWNER SUMMARY",
            &format!(
                "metric: {} | commits: {} | without weighable changes: {}",
                report.metric, report.commits_analyzed, report.degenerate_commits
            ),
        )?;

        let mut table = new_table(vec![
            "Owner",
            "Commits",
            "Insertions",
            "Deletions",
            "Adjusted commits",
            "Top contributors",
        ]);
        for owner in &report.owners {
            table.add_row(vec![
                Cell::new(&owner.owner),
                numeric(owner.commits),
                numeric(owner.insertions),
                numeric(owner.deletions),
                numeric(format_fraction(owner.adjusted_commits, self.precision)),
                Cell::new(format_contributors(
                    &owner.top_contributors,
                    report.rank_by,
                    self.precision,
                )),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        if report.has_team_split() {
            self.write_team_split(report)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_team_split(&mut self, report: &SummaryReport) -> anyhow::Result<()> {
        self.write_banner(
            "TEAM VS OUTSIDE",
            &format!("memberships: {}", report.memberships),
        )?;

        let mut table = new_table(vec![
            "Owner",
            "Team commits",
            "Team lines (+/-)",
            "Team adjusted",
            "Outside commits",
            "Outside lines (+/-)",
            "Outside adjusted",
            "Top team",
            "Top outside",
        ]);
        for owner in &report.owners {
            let (team, others) = (&owner.by_team, &owner.by_others);
            table.add_row(vec![
                Cell::new(&owner.owner),
                numeric(team.commits),
                numeric(format!("+{} / -{}", team.insertions, team.deletions)),
                numeric(format_fraction(team.adjusted_commits, self.precision)),
                numeric(others.commits),
                numeric(format!("+{} / -{}", others.insertions, others.deletions)),
                numeric(format_fraction(others.adjusted_commits, self.precision)),
                Cell::new(format_contributors(
                    &owner.top_team_contributors,
                    report.rank_by,
                    self.precision,
                )),
                Cell::new(format_contributors(
                    &owner.top_outside_contributors,
                    report.rank_by,
                    self.precision,
                )),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}
