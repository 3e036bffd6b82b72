// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod observability;

// Re-export commonly used types
pub use crate::core::{
    Commit, CommitAttribution, Error, FileChange, InvalidReason, Membership, MetricsError,
    OwnerAttribution, OwnerFractions, TeamMemberships,
};

pub use crate::metrics::{
    attribute_commit, attribute_commits, attribute_with, compute, compute_insertions_and_deletions,
    compute_insertions_only, summarize, summarize_with, ChangeMetric, ContributorRanking,
    OwnerSummary, SummaryOptions, SummaryReport,
};

pub use crate::config::{BoundConfig, ParallelConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
