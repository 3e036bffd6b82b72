use super::{format_contributors, format_fraction, DEGENERATE_LABEL};
use crate::core::CommitAttribution;
use crate::io::output::OutputWriter;
use crate::metrics::{SummaryReport, WorkTotals};
use std::io::Write;

/// Pure function: Make text safe inside a table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
    precision: usize,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, precision: usize) -> Self {
        Self { writer, precision }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_commit_rows(&mut self, attribution: &CommitAttribution) -> anyhow::Result<()> {
        let commit_id = escape_cell(&attribution.commit_id);
        if attribution.is_degenerate() {
            writeln!(
                self.writer,
                "| `{}` | - | {} | {} |",
                commit_id, DEGENERATE_LABEL, attribution.total_changes
            )?;
            return Ok(());
        }

        for owner in attribution.ranked() {
            writeln!(
                self.writer,
                "| `{}` | {} | {} | {} |",
                commit_id,
                escape_cell(&owner.owner),
                format_fraction(owner.fraction, self.precision),
                attribution.total_changes
            )?;
        }
        Ok(())
    }

    fn work_cells(&self, work: &WorkTotals) -> String {
        format!(
            "{} | {} | {} | {}",
            work.commits,
            work.insertions,
            work.deletions,
            format_fraction(work.adjusted_commits, self.precision)
        )
    }

    fn write_team_split(&mut self, report: &SummaryReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "## Team vs Outside")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Owner | Team commits | Team insertions | Team deletions | Team adjusted \
             | Outside commits | Outside insertions | Outside deletions | Outside adjusted \
             | Top team contributors | Top outside contributors |"
        )?;
        writeln!(
            self.writer,
            "|-------|--------------|-----------------|----------------|---------------\
             |-----------------|--------------------|-------------------|------------------\
             |-----------------------|--------------------------|"
        )?;
        for owner in &report.owners {
            let row = format!(
                "| {} | {} | {} | {} | {} |",
                escape_cell(&owner.owner),
                self.work_cells(&owner.by_team),
                self.work_cells(&owner.by_others),
                escape_cell(&format_contributors(
                    &owner.top_team_contributors,
                    report.rank_by,
                    self.precision
                )),
                escape_cell(&format_contributors(
                    &owner.top_outside_contributors,
                    report.rank_by,
                    self.precision
                )),
            );
            writeln!(self.writer, "{row}")?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_attributions(&mut self, attributions: &[CommitAttribution]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Adjusted Attribution")?;
        writeln!(self.writer)?;
        if let Some(first) = attributions.first() {
            writeln!(self.writer, "Metric: `{}`", first.metric)?;
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "| Commit | Owner | Fraction | Total changes |")?;
        writeln!(self.writer, "|--------|-------|----------|---------------|")?;
        for attribution in attributions {
            self.write_commit_rows(attribution)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_summary(&mut self, report: &SummaryReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Owner Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Metric | `{}` |", report.metric)?;
        writeln!(self.writer, "| Commits analyzed | {} |", report.commits_analyzed)?;
        writeln!(
            self.writer,
            "| Commits without weighable changes | {} |",
            report.degenerate_commits
        )?;
        writeln!(self.writer, "| Contributors ranked by | `{}` |", report.rank_by)?;
        if report.has_team_split() {
            writeln!(self.writer, "| Memberships | {} |", report.memberships)?;
        }
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "| Owner | Commits | Insertions | Deletions | Adjusted commits | Top contributors |"
        )?;
        writeln!(
            self.writer,
            "|-------|---------|------------|-----------|------------------|------------------|"
        )?;
        for owner in &report.owners {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                escape_cell(&owner.owner),
                owner.commits,
                owner.insertions,
                owner.deletions,
                format_fraction(owner.adjusted_commits, self.precision),
                escape_cell(&format_contributors(
                    &owner.top_contributors,
                    report.rank_by,
                    self.precision
                ))
            )?;
        }

        if report.has_team_split() {
            self.write_team_split(report)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
