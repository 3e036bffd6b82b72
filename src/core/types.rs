use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Owner → fraction of a commit's effective changes.
///
/// Keyed by owner so rendering is deterministic; callers must not rely on
/// any particular owner order for meaning.
pub type OwnerFractions = BTreeMap<String, f64>;

/// One file's change within one commit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Team or individual the file is attributed to. Decodes as empty when
    /// absent or null so the calculator can reject it as invalid input.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub owner: String,
    pub insertions: i64,
    pub deletions: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `null` (and YAML's `~`) becomes an empty string instead of a decode error
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl FileChange {
    pub fn new(owner: impl Into<String>, insertions: i64, deletions: i64) -> Self {
        Self {
            owner: owner.into(),
            insertions,
            deletions,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A set of file changes sharing a commit identity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub changes: Vec<FileChange>,
}

impl Commit {
    pub fn new(id: impl Into<String>, changes: Vec<FileChange>) -> Self {
        Self {
            id: id.into(),
            author: None,
            changes,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// An owner's share of one commit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnerAttribution {
    pub owner: String,
    pub fraction: f64,
}

/// Attribution record produced for one input commit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommitAttribution {
    pub commit_id: String,
    pub metric: crate::metrics::ChangeMetric,
    /// Normalization denominator; zero marks a commit with no weighable changes
    pub total_changes: u128,
    pub owners: OwnerFractions,
}

impl CommitAttribution {
    pub fn is_degenerate(&self) -> bool {
        self.owners.is_empty()
    }

    /// Owners with their fractions, largest share first
    pub fn ranked(&self) -> Vec<OwnerAttribution> {
        let mut ranked: Vec<OwnerAttribution> = self
            .owners
            .iter()
            .map(|(owner, fraction)| OwnerAttribution {
                owner: owner.clone(),
                fraction: *fraction,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.fraction
                .total_cmp(&a.fraction)
                .then_with(|| a.owner.cmp(&b.owner))
        });
        ranked
    }
}
