mod json;
mod markdown;
mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::metrics::{ContributorRanking, ContributorShare};

/// Pure function: Render a fraction with a fixed number of decimals
pub(crate) fn format_fraction(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Pure function: "ana (1.4286), ben (0.8750)", showing the ranking value
pub(crate) fn format_contributors(
    contributors: &[ContributorShare],
    rank_by: ContributorRanking,
    precision: usize,
) -> String {
    if contributors.is_empty() {
        return "-".to_string();
    }
    contributors
        .iter()
        .map(|c| {
            let value = match rank_by {
                ContributorRanking::Adjusted => format_fraction(c.adjusted_commits, precision),
                ContributorRanking::Changes => c.changes.to_string(),
                ContributorRanking::Commits => c.commits.to_string(),
            };
            format!("{} ({})", c.author, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) const DEGENERATE_LABEL: &str = "no weighable changes";
