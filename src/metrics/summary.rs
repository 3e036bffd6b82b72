//! Per-owner roll-up of commit attributions.
//!
//! Each non-degenerate commit is worth exactly one unit, split between its
//! owners by the adjusted metric. Summing those shares per owner gives the
//! owner's "adjusted commits", which stays comparable across owners no matter
//! how many files a commit touches.
//!
//! With team memberships loaded, each owner's work is also split into work by
//! the owner's own team and work by everyone else. A commit without an author,
//! or any commit when no memberships are loaded, counts as outside work.

use super::adjusted::ChangeMetric;
use crate::core::{Commit, CommitAttribution, TeamMemberships};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Order of contributors within an owner
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ContributorRanking {
    /// Sum of adjusted shares
    #[default]
    Adjusted,
    /// Lines inserted plus deleted in the owner's files
    Changes,
    /// Commits touching the owner's files
    Commits,
}

impl ContributorRanking {
    pub fn label(self) -> &'static str {
        match self {
            Self::Adjusted => "adjusted",
            Self::Changes => "changes",
            Self::Commits => "commits",
        }
    }
}

impl fmt::Display for ContributorRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An author's contribution to one owner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContributorShare {
    pub author: String,
    pub adjusted_commits: f64,
    pub commits: usize,
    /// Insertions plus deletions in this owner's files
    pub changes: u64,
}

/// Work on one owner's files by one group of authors
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkTotals {
    pub commits: usize,
    pub insertions: u64,
    pub deletions: u64,
    pub adjusted_commits: f64,
}

impl WorkTotals {
    fn record(&mut self, insertions: u64, deletions: u64, share: f64) {
        self.commits += 1;
        self.insertions = self.insertions.saturating_add(insertions);
        self.deletions = self.deletions.saturating_add(deletions);
        self.adjusted_commits += share;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub owner: String,
    /// Commits touching at least one file of this owner
    pub commits: usize,
    pub insertions: u64,
    pub deletions: u64,
    pub adjusted_commits: f64,
    /// Work by authors who belong to this owner
    pub by_team: WorkTotals,
    /// Work by everyone else
    pub by_others: WorkTotals,
    pub top_contributors: Vec<ContributorShare>,
    pub top_team_contributors: Vec<ContributorShare>,
    pub top_outside_contributors: Vec<ContributorShare>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub metric: ChangeMetric,
    pub rank_by: ContributorRanking,
    pub commits_analyzed: usize,
    /// Commits with nothing to attribute under the chosen metric
    pub degenerate_commits: usize,
    /// Membership rows used for the team split; zero when none were loaded
    pub memberships: usize,
    pub owners: Vec<OwnerSummary>,
}

impl SummaryReport {
    pub fn total_adjusted_commits(&self) -> f64 {
        self.owners.iter().map(|o| o.adjusted_commits).sum()
    }

    pub fn has_team_split(&self) -> bool {
        self.memberships > 0
    }
}

/// How the roll-up ranks and splits contributors
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryOptions {
    pub top_n: usize,
    pub rank_by: ContributorRanking,
    pub memberships: TeamMemberships,
}

impl SummaryOptions {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            rank_by: ContributorRanking::default(),
            memberships: TeamMemberships::default(),
        }
    }

    pub fn with_rank_by(mut self, rank_by: ContributorRanking) -> Self {
        self.rank_by = rank_by;
        self
    }

    pub fn with_memberships(mut self, memberships: TeamMemberships) -> Self {
        self.memberships = memberships;
        self
    }
}

#[derive(Default)]
struct ContributorTally {
    adjusted_commits: f64,
    commits: usize,
    changes: u64,
    team: bool,
}

#[derive(Default)]
struct OwnerAccumulator {
    team: WorkTotals,
    others: WorkTotals,
    contributors: HashMap<String, ContributorTally>,
}

impl OwnerAccumulator {
    fn into_summary(self, owner: String, options: &SummaryOptions) -> OwnerSummary {
        let shares: Vec<(bool, ContributorShare)> = self
            .contributors
            .into_iter()
            .map(|(author, tally)| {
                (
                    tally.team,
                    ContributorShare {
                        author,
                        adjusted_commits: tally.adjusted_commits,
                        commits: tally.commits,
                        changes: tally.changes,
                    },
                )
            })
            .collect();

        let top = |team: Option<bool>| {
            let selected = shares
                .iter()
                .filter(|(is_team, _)| team.map_or(true, |wanted| *is_team == wanted))
                .map(|(_, share)| share.clone())
                .collect();
            rank_contributors(selected, options.rank_by, options.top_n)
        };

        OwnerSummary {
            owner,
            commits: self.team.commits + self.others.commits,
            insertions: self.team.insertions.saturating_add(self.others.insertions),
            deletions: self.team.deletions.saturating_add(self.others.deletions),
            adjusted_commits: self.team.adjusted_commits + self.others.adjusted_commits,
            top_contributors: top(None),
            top_team_contributors: top(Some(true)),
            top_outside_contributors: top(Some(false)),
            by_team: self.team,
            by_others: self.others,
        }
    }
}

/// Pure function: Keep the `top_n` authors ranked by `rank_by`.
///
/// Ties fall back to adjusted share, then commits, then author name.
fn rank_contributors(
    mut ranked: Vec<ContributorShare>,
    rank_by: ContributorRanking,
    top_n: usize,
) -> Vec<ContributorShare> {
    ranked.sort_by(|a, b| {
        let primary = match rank_by {
            ContributorRanking::Adjusted => b.adjusted_commits.total_cmp(&a.adjusted_commits),
            ContributorRanking::Changes => b.changes.cmp(&a.changes),
            ContributorRanking::Commits => b.commits.cmp(&a.commits),
        };
        primary
            .then_with(|| b.adjusted_commits.total_cmp(&a.adjusted_commits))
            .then_with(|| b.commits.cmp(&a.commits))
            .then_with(|| a.author.cmp(&b.author))
    });
    ranked.truncate(top_n);
    ranked
}

/// Roll attributions up by owner, listing the `top_n` contributors by
/// adjusted share and no team split.
///
/// # Panics
///
/// Panics if `commits` and `attributions` differ in length.
pub fn summarize(
    commits: &[Commit],
    attributions: &[CommitAttribution],
    metric: ChangeMetric,
    top_n: usize,
) -> SummaryReport {
    summarize_with(commits, attributions, metric, &SummaryOptions::new(top_n))
}

/// Roll attributions up by owner.
///
/// `attributions` must be the output of attributing `commits` (same order,
/// same length), which also guarantees the line counts are non-negative.
///
/// # Panics
///
/// Panics if `commits` and `attributions` differ in length.
pub fn summarize_with(
    commits: &[Commit],
    attributions: &[CommitAttribution],
    metric: ChangeMetric,
    options: &SummaryOptions,
) -> SummaryReport {
    assert_eq!(
        commits.len(),
        attributions.len(),
        "every commit needs exactly one attribution"
    );

    let mut owners: BTreeMap<String, OwnerAccumulator> = BTreeMap::new();

    for (commit, attribution) in commits.iter().zip(attributions) {
        // raw line totals per owner within this commit
        let mut touched: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for change in &commit.changes {
            let lines = touched.entry(change.owner.as_str()).or_default();
            lines.0 = lines.0.saturating_add(change.insertions.max(0) as u64);
            lines.1 = lines.1.saturating_add(change.deletions.max(0) as u64);
        }

        for (owner, (insertions, deletions)) in touched {
            let share = attribution.owners.get(owner).copied().unwrap_or(0.0);
            let team = commit
                .author
                .as_deref()
                .is_some_and(|author| options.memberships.is_member(author, owner));

            let acc = owners.entry(owner.to_string()).or_default();
            let totals = if team { &mut acc.team } else { &mut acc.others };
            totals.record(insertions, deletions, share);

            if let Some(author) = &commit.author {
                let tally = acc.contributors.entry(author.clone()).or_default();
                tally.adjusted_commits += share;
                tally.commits += 1;
                tally.changes = tally
                    .changes
                    .saturating_add(insertions.saturating_add(deletions));
                tally.team = team;
            }
        }
    }

    SummaryReport {
        metric,
        rank_by: options.rank_by,
        commits_analyzed: attributions.len(),
        degenerate_commits: attributions.iter().filter(|a| a.is_degenerate()).count(),
        memberships: options.memberships.len(),
        owners: owners
            .into_iter()
            .map(|(owner, acc)| acc.into_summary(owner, options))
            .collect(),
    }
}
