pub mod errors;
pub mod membership;
pub mod types;

pub use errors::{Error, InvalidReason, MetricsError, Result};
pub use membership::{Membership, TeamMemberships};
pub use types::{Commit, CommitAttribution, FileChange, OwnerAttribution, OwnerFractions};
