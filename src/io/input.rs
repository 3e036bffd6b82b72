//! Decoding of already-extracted commit records.
//!
//! JSON and YAML inputs are a list of [`Commit`] values. TSV input has one
//! row per file change, in `git log --numstat` spirit:
//!
//! ```text
//! commit	author	path	owner	insertions	deletions
//! 1a2b3c	ana@example.com	src/lib.rs	@core	12	3
//! 1a2b3c	ana@example.com	docs/logo.png	@docs	-	-
//! ```
//!
//! A `-` count (how numstat reports binary files) decodes as zero. Counts are
//! decoded as signed integers; rejecting negative values is the calculator's
//! job, not the decoder's.
//!
//! Team memberships are a separate TSV with the header
//! `author_email	author_name	codeowner`; either identity column may be empty.

use crate::core::{Commit, Error, FileChange, Membership, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const TSV_COLUMNS: usize = 6;
const MEMBERSHIP_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Json,
    Yaml,
    Tsv,
}

impl InputFormat {
    /// Infer the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("tsv") | Some("tab") => Self::Tsv,
            _ => Self::Json,
        }
    }
}

/// Read commits from `path`, or from stdin when `path` is `-`
pub fn read_commits(path: &Path, format: Option<InputFormat>) -> Result<Vec<Commit>> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let source = path.display().to_string();

    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| Error::file_system_io("Failed to read input", path, e))?
    };

    let commits = parse_commits(&contents, format, &source)?;
    log::debug!("Decoded {} commits from {} as {:?}", commits.len(), source, format);
    Ok(commits)
}

/// Pure function: Decode commits from text
pub fn parse_commits(contents: &str, format: InputFormat, source: &str) -> Result<Vec<Commit>> {
    match format {
        InputFormat::Json => Ok(serde_json::from_str(contents)?),
        InputFormat::Yaml => Ok(serde_yaml::from_str(contents)?),
        InputFormat::Tsv => parse_tsv(contents, source),
    }
}

/// Parse a numstat-style count; `-` means a binary file
fn parse_count(field: &str) -> Option<i64> {
    match field.trim() {
        "-" => Some(0),
        other => other.parse().ok(),
    }
}

fn parse_tsv(contents: &str, source: &str) -> Result<Vec<Commit>> {
    let mut commits: Vec<Commit> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    let mut lines = contents.lines().enumerate();

    // Skip the header line
    match lines.next() {
        Some((_, header)) if header.trim_start().starts_with("commit") => {}
        Some((_, header)) => {
            return Err(Error::parse(
                source,
                1,
                format!("expected header row starting with 'commit', got '{}'", header),
            ))
        }
        None => return Ok(commits),
    }

    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != TSV_COLUMNS {
            return Err(Error::parse(
                source,
                line_no,
                format!("expected {} columns, found {}", TSV_COLUMNS, parts.len()),
            ));
        }

        let insertions = parse_count(parts[4]).ok_or_else(|| {
            Error::parse(source, line_no, format!("invalid insertions '{}'", parts[4]))
        })?;
        let deletions = parse_count(parts[5]).ok_or_else(|| {
            Error::parse(source, line_no, format!("invalid deletions '{}'", parts[5]))
        })?;

        let mut change = FileChange::new(parts[3].trim(), insertions, deletions);
        if !parts[2].is_empty() {
            change = change.with_path(parts[2]);
        }

        let commit_id = parts[0].trim();
        let slot = *index_by_id.entry(commit_id.to_string()).or_insert_with(|| {
            let author = Some(parts[1].trim())
                .filter(|a| !a.is_empty())
                .map(str::to_string);
            commits.push(Commit {
                id: commit_id.to_string(),
                author,
                changes: Vec::new(),
            });
            commits.len() - 1
        });
        commits[slot].changes.push(change);
    }

    Ok(commits)
}

/// Read an author to code-owner membership TSV
pub fn read_memberships(path: &Path) -> Result<Vec<Membership>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system_io("Failed to read memberships", path, e))?;
    let memberships = parse_memberships(&contents, &path.display().to_string())?;
    log::debug!(
        "Loaded {} memberships from {}",
        memberships.len(),
        path.display()
    );
    Ok(memberships)
}

/// Pure function: Decode membership rows
pub fn parse_memberships(contents: &str, source: &str) -> Result<Vec<Membership>> {
    let mut lines = contents.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim_start().starts_with("author_email") => {}
        Some((_, header)) => {
            return Err(Error::parse(
                source,
                1,
                format!(
                    "expected header row starting with 'author_email', got '{}'",
                    header
                ),
            ))
        }
        None => return Ok(Vec::new()),
    }

    let mut memberships = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
        if parts.len() != MEMBERSHIP_COLUMNS {
            return Err(Error::parse(
                source,
                line_no,
                format!(
                    "expected {} columns, found {}",
                    MEMBERSHIP_COLUMNS,
                    parts.len()
                ),
            ));
        }
        if parts[2].is_empty() {
            return Err(Error::parse(source, line_no, "missing codeowner"));
        }
        if parts[0].is_empty() && parts[1].is_empty() {
            return Err(Error::parse(source, line_no, "missing author email and name"));
        }

        let optional = |field: &str| Some(field.to_string()).filter(|f| !f.is_empty());
        memberships.push(Membership {
            author_email: optional(parts[0]),
            author_name: optional(parts[1]),
            codeowner: parts[2].to_string(),
        });
    }

    Ok(memberships)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvalidReason, MetricsError};
    use crate::metrics::{compute, ChangeMetric};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.tsv")), InputFormat::Tsv);
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("-")), InputFormat::Json);
    }

    #[test]
    fn test_parse_json_missing_owner_decodes_empty() {
        let commits = parse_commits(
            r#"[{"id": "c1", "changes": [{"insertions": 1, "deletions": 2}]}]"#,
            InputFormat::Json,
            "inline",
        )
        .unwrap();
        assert_eq!(commits[0].changes[0].owner, "");
        assert_eq!(commits[0].author, None);
    }

    #[test]
    fn test_parse_json_null_owner_decodes_empty() {
        let commits = parse_commits(
            r#"[{"id": "c1", "changes": [{"owner": null, "insertions": 1, "deletions": 2}]}]"#,
            InputFormat::Json,
            "inline",
        )
        .unwrap();
        assert_eq!(commits[0].changes[0].owner, "");
    }

    #[test]
    fn test_parse_yaml_null_owners_decode_empty() {
        let commits = parse_commits(
            indoc! {"
                - id: c1
                  changes:
                    - owner: null
                      insertions: 1
                      deletions: 0
                    - owner: ~
                      insertions: 1
                      deletions: 0
                    - owner:
                      insertions: 1
                      deletions: 0
                    - insertions: 1
                      deletions: 0
            "},
            InputFormat::Yaml,
            "inline",
        )
        .unwrap();
        let owners: Vec<_> = commits[0].changes.iter().map(|c| c.owner.as_str()).collect();
        assert_eq!(owners, vec!["", "", "", ""]);
    }

    #[test]
    fn test_quoted_null_is_a_real_owner() {
        let commits = parse_commits(
            "- id: c1\n  changes:\n    - {owner: 'null', insertions: 1, deletions: 0}\n",
            InputFormat::Yaml,
            "inline",
        )
        .unwrap();
        assert_eq!(commits[0].changes[0].owner, "null");
    }

    #[test]
    fn test_undefined_owner_is_invalid_input_for_every_format() {
        let inputs = [
            (
                InputFormat::Json,
                r#"[{"id": "c1", "changes": [
                    {"owner": "real", "insertions": 1, "deletions": 0},
                    {"owner": null, "insertions": 1, "deletions": 0}
                ]}]"#,
            ),
            (
                InputFormat::Yaml,
                "- id: c1\n  changes:\n    - {owner: real, insertions: 1, deletions: 0}\n    - {owner: ~, insertions: 1, deletions: 0}\n",
            ),
            (
                InputFormat::Tsv,
                "commit\tauthor\tpath\towner\tinsertions\tdeletions\n\
                 c1\tana\tf1\treal\t1\t0\n\
                 c1\tana\tf2\t \t1\t0\n",
            ),
        ];

        for (format, contents) in inputs {
            let commits = parse_commits(contents, format, "inline").unwrap();
            for metric in [ChangeMetric::InsertionsOnly, ChangeMetric::InsertionsAndDeletions] {
                let err = compute(&commits[0], metric).unwrap_err();
                assert_eq!(
                    err,
                    MetricsError::invalid_input("c1", 1, InvalidReason::MissingOwner),
                    "{format:?} / {metric}"
                );
            }
        }
    }

    #[test]
    fn test_parse_yaml() {
        let commits = parse_commits(
            indoc! {"
                - id: c1
                  author: ana
                  changes:
                    - owner: team-a
                      path: src/main.rs
                      insertions: 3
                      deletions: 1
            "},
            InputFormat::Yaml,
            "inline",
        )
        .unwrap();
        assert_eq!(
            commits,
            vec![Commit::new(
                "c1",
                vec![FileChange::new("team-a", 3, 1).with_path("src/main.rs")]
            )
            .with_author("ana")]
        );
    }

    #[test]
    fn test_parse_tsv_groups_rows_by_commit() {
        let tsv = "commit\tauthor\tpath\towner\tinsertions\tdeletions\n\
                   c1\tana\tfile1\towner1\t100\t50\n\
                   c2\t\tfile9\towner1\t1\t1\n\
                   c1\tana\tfile2\towner2\t50\t25\n\
                   \n\
                   c1\tana\tlogo.png\towner2\t-\t-\n";
        let commits = parse_commits(tsv, InputFormat::Tsv, "inline").unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "c1");
        assert_eq!(commits[0].author.as_deref(), Some("ana"));
        assert_eq!(commits[0].changes.len(), 3);
        assert_eq!(commits[0].changes[2], FileChange::new("owner2", 0, 0).with_path("logo.png"));
        assert_eq!(commits[1].author, None);
    }

    #[test]
    fn test_parse_tsv_keeps_negative_counts_for_validation() {
        let tsv = "commit\tauthor\tpath\towner\tinsertions\tdeletions\nc1\t\tf\to\t-1\t0\n";
        let commits = parse_commits(tsv, InputFormat::Tsv, "inline").unwrap();
        assert_eq!(commits[0].changes[0].insertions, -1);
    }

    #[test]
    fn test_parse_tsv_reports_line_numbers() {
        let tsv = "commit\tauthor\tpath\towner\tinsertions\tdeletions\nc1\t\tf\to\tmany\t0\n";
        let err = parse_commits(tsv, InputFormat::Tsv, "in.tsv").unwrap_err();
        assert_eq!(err.to_string(), "Parse error in in.tsv:2: invalid insertions 'many'");

        let tsv = "commit\tauthor\tpath\towner\tinsertions\tdeletions\nc1\tf\to\t1\n";
        let err = parse_commits(tsv, InputFormat::Tsv, "in.tsv").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_tsv_requires_header() {
        let err = parse_commits("c1\t\tf\to\t1\t0\n", InputFormat::Tsv, "in.tsv").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_memberships() {
        let tsv = "author_email\tauthor_name\tcodeowner\n\
                   ana@example.com\tAna\t@core\n\
                   \tBen\t@docs\n\
                   \n\
                   carl@example.com\t\t@web\n";
        let memberships = parse_memberships(tsv, "members.tsv").unwrap();
        assert_eq!(
            memberships,
            vec![
                Membership::new(Some("ana@example.com"), Some("Ana"), "@core"),
                Membership::new(None, Some("Ben"), "@docs"),
                Membership::new(Some("carl@example.com"), None, "@web"),
            ]
        );
    }

    #[test]
    fn test_parse_memberships_rejects_bad_rows() {
        let header = "author_email\tauthor_name\tcodeowner\n";

        let err = parse_memberships(&format!("{header}a@x\tA\n"), "m.tsv").unwrap_err();
        assert_eq!(err.to_string(), "Parse error in m.tsv:2: expected 3 columns, found 2");

        let err = parse_memberships(&format!("{header}a@x\tA\t\n"), "m.tsv").unwrap_err();
        assert_eq!(err.to_string(), "Parse error in m.tsv:2: missing codeowner");

        let err = parse_memberships(&format!("{header}\t\t@core\n"), "m.tsv").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = parse_memberships("a@x\tA\t@core\n", "m.tsv").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_read_memberships_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("members.tsv");
        std::fs::write(&path, "author_email\tauthor_name\tcodeowner\nana@x\tAna\t@core\n")
            .unwrap();
        assert_eq!(read_memberships(&path).unwrap().len(), 1);
        assert!(matches!(
            read_memberships(&temp.path().join("missing.tsv")),
            Err(Error::FileSystem { .. })
        ));
    }

    #[test]
    fn test_parse_tsv_empty_input() {
        assert!(parse_commits("", InputFormat::Tsv, "in.tsv").unwrap().is_empty());
    }
}
