//! Author to code-owner memberships.
//!
//! A membership row says that an author (known by email, name, or both)
//! belongs to a code owner. Work an author does on files of an owner they
//! belong to counts as team work; everything else counts as outside work.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One `author_email	author_name	codeowner` row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub codeowner: String,
}

impl Membership {
    pub fn new(
        author_email: Option<&str>,
        author_name: Option<&str>,
        codeowner: impl Into<String>,
    ) -> Self {
        Self {
            author_email: author_email.map(str::to_string),
            author_name: author_name.map(str::to_string),
            codeowner: codeowner.into(),
        }
    }
}

/// Lookup from author identity to the owners they belong to
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamMemberships {
    by_email: HashMap<String, HashSet<String>>,
    by_name: HashMap<String, HashSet<String>>,
    rows: usize,
}

impl TeamMemberships {
    pub fn new(memberships: &[Membership]) -> Self {
        let mut lookup = Self::default();
        for membership in memberships {
            if let Some(email) = &membership.author_email {
                lookup
                    .by_email
                    .entry(email.clone())
                    .or_default()
                    .insert(membership.codeowner.clone());
            }
            if let Some(name) = &membership.author_name {
                lookup
                    .by_name
                    .entry(name.clone())
                    .or_default()
                    .insert(membership.codeowner.clone());
            }
        }
        lookup.rows = memberships.len();
        lookup
    }

    /// Number of membership rows loaded
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Whether `author` belongs to `owner`.
    ///
    /// `author` may be an email, a name, or git's `Name <email>` form.
    pub fn is_member(&self, author: &str, owner: &str) -> bool {
        let (name, email) = split_author(author);
        let listed = |map: &HashMap<String, HashSet<String>>, key: Option<&str>| {
            key.and_then(|k| map.get(k))
                .is_some_and(|owners| owners.contains(owner))
        };

        listed(&self.by_email, email)
            || listed(&self.by_name, name)
            || listed(&self.by_email, Some(author))
            || listed(&self.by_name, Some(author))
    }
}

/// Pure function: Split `Name <email>` into its parts
fn split_author(author: &str) -> (Option<&str>, Option<&str>) {
    let author = author.trim();
    match (author.rfind('<'), author.ends_with('>')) {
        (Some(open), true) => {
            let name = author[..open].trim();
            let email = author[open + 1..author.len() - 1].trim();
            (
                Some(name).filter(|n| !n.is_empty()),
                Some(email).filter(|e| !e.is_empty()),
            )
        }
        _ => (None, None),
    }
}
