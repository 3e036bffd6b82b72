//! Metrics calculation module
//!
//! Provides the adjusted contribution metric and the batch and per-owner
//! aggregations built on top of it.

pub mod adjusted;
pub mod batch;
pub mod summary;

pub use adjusted::{
    attribute_commit, attribute_with, compute, compute_insertions_and_deletions,
    compute_insertions_only, normalize, owner_changes, validate_commit, ChangeMetric,
};
pub use batch::attribute_commits;
pub use summary::{
    summarize, summarize_with, ContributorRanking, ContributorShare, OwnerSummary, SummaryOptions,
    SummaryReport, WorkTotals,
};
