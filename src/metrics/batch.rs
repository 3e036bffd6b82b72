//! Attribution over many commits.
//!
//! Commits are independent, so the batch can run on rayon's pool. Output
//! order always matches input order; on invalid input the error for the
//! earliest offending commit is returned.

use super::adjusted::{attribute_commit, ChangeMetric};
use crate::config::ParallelConfig;
use crate::core::{Commit, CommitAttribution, MetricsError};
use rayon::prelude::*;
use tracing::{debug, info_span};

pub fn attribute_commits(
    commits: &[Commit],
    metric: ChangeMetric,
    parallel: &ParallelConfig,
) -> Result<Vec<CommitAttribution>, MetricsError> {
    let _span = info_span!(
        "attribute_commits",
        commits = commits.len(),
        metric = %metric,
        parallel = parallel.enabled
    )
    .entered();

    let results = if parallel.enabled {
        attribute_parallel(commits, metric)
    } else {
        attribute_sequential(commits, metric)
    }?;

    let degenerate = results.iter().filter(|r| r.is_degenerate()).count();
    debug!(
        attributed = results.len(),
        degenerate, "Finished commit attribution"
    );
    Ok(results)
}

fn attribute_sequential(
    commits: &[Commit],
    metric: ChangeMetric,
) -> Result<Vec<CommitAttribution>, MetricsError> {
    commits
        .iter()
        .map(|commit| attribute_commit(commit, metric))
        .collect()
}

fn attribute_parallel(
    commits: &[Commit],
    metric: ChangeMetric,
) -> Result<Vec<CommitAttribution>, MetricsError> {
    // Collect every per-commit result before picking the first failure so the
    // reported error does not depend on thread scheduling.
    let results: Vec<Result<CommitAttribution, MetricsError>> = commits
        .par_iter()
        .map(|commit| attribute_commit(commit, metric))
        .collect();
    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileChange, InvalidReason};

    fn sample_commits() -> Vec<Commit> {
        (0..50)
            .map(|i| {
                Commit::new(
                    format!("c{i}"),
                    vec![
                        FileChange::new("alpha", i, 1),
                        FileChange::new("beta", 50 - i, 0),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let commits = sample_commits();
        let seq = attribute_commits(
            &commits,
            ChangeMetric::InsertionsOnly,
            &ParallelConfig::sequential(),
        )
        .unwrap();
        let par = attribute_commits(
            &commits,
            ChangeMetric::InsertionsOnly,
            &ParallelConfig::default(),
        )
        .unwrap();
        assert_eq!(seq, par);
        assert_eq!(par[7].commit_id, "c7");
    }

    #[test]
    fn test_first_invalid_commit_is_reported() {
        let mut commits = sample_commits();
        commits[10].changes[0].insertions = -1;
        commits[30].changes[1].owner.clear();

        let err = attribute_commits(
            &commits,
            ChangeMetric::InsertionsAndDeletions,
            &ParallelConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.commit_id(), "c10");
        assert_eq!(err.reason(), InvalidReason::NegativeInsertions(-1));
    }

    #[test]
    fn test_empty_batch() {
        let results =
            attribute_commits(&[], ChangeMetric::default(), &ParallelConfig::default()).unwrap();
        assert!(results.is_empty());
    }
}
