//! Adjusted contribution metric
//!
//! Splits a single commit between the owners of the files it touches. Each
//! owner's per-file weights are pooled first, then divided by the commit's
//! total weight, so the fractions for one commit always sum to 1.0.
//!
//! Two weightings exist:
//!
//! - **Insertions only** (v1): deletions are ignored, so a pure-deletion
//!   commit has nothing to attribute.
//! - **Insertions and deletions** (v2): every changed line counts.
//!
//! Both go through [`attribute_with`], which takes the per-file weight as a
//! closure. A commit whose total weight is zero yields an empty mapping; that
//! is a valid result, not an error.
//!
//! # Example
//!
//! ```rust
//! use bound::core::{Commit, FileChange};
//! use bound::metrics::compute_insertions_and_deletions;
//!
//! let commit = Commit::new(
//!     "c1",
//!     vec![
//!         FileChange::new("owner1", 100, 50),
//!         FileChange::new("owner2", 50, 25),
//!         FileChange::new("owner2", 25, 10),
//!     ],
//! );
//!
//! let fractions = compute_insertions_and_deletions(&commit).unwrap();
//! assert!((fractions["owner1"] - 150.0 / 260.0).abs() < 1e-12);
//! ```

use crate::core::{
    Commit, CommitAttribution, FileChange, InvalidReason, MetricsError, OwnerFractions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-file quantity that counts as an "effective change"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeMetric {
    /// Inserted lines only (v1)
    #[serde(alias = "v1", alias = "insertions")]
    #[value(aliases = ["v1", "insertions"])]
    InsertionsOnly,
    /// Inserted plus deleted lines (v2)
    #[default]
    #[serde(alias = "v2", alias = "changes")]
    #[value(aliases = ["v2", "changes"])]
    InsertionsAndDeletions,
}

impl ChangeMetric {
    /// Weight of one already-validated file change
    pub fn weight(self, change: &FileChange) -> u64 {
        // validate_change guarantees both counts are non-negative, and two
        // non-negative i64 values always fit in a u64.
        let insertions = change.insertions.max(0) as u64;
        let deletions = change.deletions.max(0) as u64;
        match self {
            Self::InsertionsOnly => insertions,
            Self::InsertionsAndDeletions => insertions + deletions,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InsertionsOnly => "insertions-only",
            Self::InsertionsAndDeletions => "insertions-and-deletions",
        }
    }
}

impl fmt::Display for ChangeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pure function: Check a single file change
pub fn validate_change(change: &FileChange) -> Result<(), InvalidReason> {
    if change.owner.trim().is_empty() {
        return Err(InvalidReason::MissingOwner);
    }
    if change.insertions < 0 {
        return Err(InvalidReason::NegativeInsertions(change.insertions));
    }
    if change.deletions < 0 {
        return Err(InvalidReason::NegativeDeletions(change.deletions));
    }
    Ok(())
}

/// Pure function: Check every file change of a commit, failing on the first bad one
pub fn validate_commit(commit: &Commit) -> Result<(), MetricsError> {
    commit
        .changes
        .iter()
        .enumerate()
        .try_for_each(|(index, change)| {
            validate_change(change)
                .map_err(|reason| MetricsError::invalid_input(&commit.id, index, reason))
        })
}

/// Pool per-file weights by owner.
///
/// Every owner that appears in the commit gets an entry, even when its pooled
/// weight is zero.
pub fn owner_changes<F>(commit: &Commit, weight: F) -> Result<BTreeMap<String, u128>, MetricsError>
where
    F: Fn(&FileChange) -> u64,
{
    validate_commit(commit)?;

    let mut pooled: BTreeMap<String, u128> = BTreeMap::new();
    for change in &commit.changes {
        *pooled.entry(change.owner.clone()).or_default() += u128::from(weight(change));
    }
    Ok(pooled)
}

/// Sum of pooled owner weights
pub fn total_changes(pooled: &BTreeMap<String, u128>) -> u128 {
    pooled.values().sum()
}

/// Pure function: Divide each owner's weight by the grand total.
///
/// Returns an empty mapping when the total is zero.
pub fn normalize(pooled: &BTreeMap<String, u128>) -> OwnerFractions {
    let total = total_changes(pooled);
    if total == 0 {
        return OwnerFractions::new();
    }

    let total = total as f64;
    pooled
        .iter()
        .map(|(owner, changes)| (owner.clone(), *changes as f64 / total))
        .collect()
}

/// Attribute a commit using an arbitrary per-file weight
pub fn attribute_with<F>(commit: &Commit, weight: F) -> Result<OwnerFractions, MetricsError>
where
    F: Fn(&FileChange) -> u64,
{
    owner_changes(commit, weight).map(|pooled| normalize(&pooled))
}

/// Attribute a commit using one of the built-in metrics
pub fn compute(commit: &Commit, metric: ChangeMetric) -> Result<OwnerFractions, MetricsError> {
    attribute_with(commit, |change| metric.weight(change))
}

/// v1: weight each file by its inserted lines
pub fn compute_insertions_only(commit: &Commit) -> Result<OwnerFractions, MetricsError> {
    compute(commit, ChangeMetric::InsertionsOnly)
}

/// v2: weight each file by its inserted plus deleted lines
pub fn compute_insertions_and_deletions(commit: &Commit) -> Result<OwnerFractions, MetricsError> {
    compute(commit, ChangeMetric::InsertionsAndDeletions)
}

/// Full per-commit record, including the normalization denominator
pub fn attribute_commit(
    commit: &Commit,
    metric: ChangeMetric,
) -> Result<CommitAttribution, MetricsError> {
    let pooled = owner_changes(commit, |change| metric.weight(change))?;

    Ok(CommitAttribution {
        commit_id: commit.id.clone(),
        metric,
        total_changes: total_changes(&pooled),
        owners: normalize(&pooled),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn commit(changes: Vec<FileChange>) -> Commit {
        Commit::new("test", changes)
    }

    #[test]
    fn test_weight_per_metric() {
        let change = FileChange::new("a", 7, 3);
        assert_eq!(ChangeMetric::InsertionsOnly.weight(&change), 7);
        assert_eq!(ChangeMetric::InsertionsAndDeletions.weight(&change), 10);
    }

    #[test]
    fn test_weight_does_not_overflow_at_extremes() {
        let change = FileChange::new("a", i64::MAX, i64::MAX);
        assert_eq!(
            ChangeMetric::InsertionsAndDeletions.weight(&change),
            (i64::MAX as u64) * 2
        );
    }

    #[test]
    fn test_owner_changes_pools_same_owner() {
        let c = commit(vec![
            FileChange::new("a", 1, 0),
            FileChange::new("b", 2, 0),
            FileChange::new("a", 3, 0),
        ]);
        let pooled = owner_changes(&c, |ch| ChangeMetric::InsertionsOnly.weight(ch)).unwrap();
        assert_eq!(pooled.get("a"), Some(&4));
        assert_eq!(pooled.get("b"), Some(&2));
        assert_eq!(total_changes(&pooled), 6);
    }

    #[test]
    fn test_zero_weight_owner_kept_when_total_nonzero() {
        let c = commit(vec![FileChange::new("a", 4, 0), FileChange::new("b", 0, 9)]);
        let fractions = compute_insertions_only(&c).unwrap();
        assert_eq!(fractions.len(), 2);
        assert_eq!(fractions["a"], 1.0);
        assert_eq!(fractions["b"], 0.0);
    }

    #[test]
    fn test_normalize_empty_on_zero_total() {
        let mut pooled = BTreeMap::new();
        pooled.insert("a".to_string(), 0u128);
        assert!(normalize(&pooled).is_empty());
    }

    #[test]
    fn test_empty_commit_is_not_an_error() {
        let c = commit(Vec::new());
        assert!(compute_insertions_only(&c).unwrap().is_empty());
        assert!(compute_insertions_and_deletions(&c).unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_owner_is_missing() {
        let c = commit(vec![FileChange::new("  ", 1, 1)]);
        let err = compute_insertions_and_deletions(&c).unwrap_err();
        assert_eq!(err.reason(), InvalidReason::MissingOwner);
    }

    #[test]
    fn test_validation_runs_even_when_total_is_zero() {
        let c = commit(vec![FileChange::new("a", 0, 0), FileChange::new("b", 0, -2)]);
        let err = compute_insertions_only(&c).unwrap_err();
        assert_eq!(
            err,
            MetricsError::invalid_input("test", 1, InvalidReason::NegativeDeletions(-2))
        );
    }

    #[test]
    fn test_custom_weight_closure() {
        // weight by file count instead of lines
        let c = commit(vec![
            FileChange::new("a", 1000, 0),
            FileChange::new("b", 1, 0),
            FileChange::new("b", 1, 0),
        ]);
        let fractions = attribute_with(&c, |_| 1).unwrap();
        assert!((fractions["a"] - 1.0 / 3.0).abs() < 1e-12);
        assert!((fractions["b"] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_attribute_commit_reports_total() {
        let c = commit(vec![FileChange::new("a", 5, 10), FileChange::new("b", 25, 10)]);
        let record = attribute_commit(&c, ChangeMetric::InsertionsAndDeletions).unwrap();
        assert_eq!(record.commit_id, "test");
        assert_eq!(record.total_changes, 50);
        assert!(!record.is_degenerate());
        assert_eq!(record.ranked()[0].owner, "b");
    }

    #[test]
    fn test_total_beyond_u64_is_reported_exactly() {
        let c = commit(vec![
            FileChange::new("a", i64::MAX, i64::MAX),
            FileChange::new("b", i64::MAX, i64::MAX),
        ]);
        let record = attribute_commit(&c, ChangeMetric::InsertionsAndDeletions).unwrap();
        assert_eq!(record.total_changes, (i64::MAX as u128) * 4);
        assert_eq!(record.owners["a"], 0.5);
    }

    #[test]
    fn test_metric_labels_round_trip_through_serde() {
        let parsed: ChangeMetric = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(parsed, ChangeMetric::InsertionsOnly);
        let parsed: ChangeMetric = serde_json::from_str("\"insertions-and-deletions\"").unwrap();
        assert_eq!(parsed, ChangeMetric::InsertionsAndDeletions);
        assert_eq!(ChangeMetric::default().to_string(), "insertions-and-deletions");
    }
}
