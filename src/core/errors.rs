//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Why a single file change was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("negative insertions ({0})")]
    NegativeInsertions(i64),

    #[error("negative deletions ({0})")]
    NegativeDeletions(i64),

    #[error("missing or empty owner")]
    MissingOwner,
}

/// Errors raised by the attribution calculator.
///
/// A zero-total commit is not an error; it yields an empty attribution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// A file change carries a negative line count or no owner
    #[error("invalid input in commit '{commit_id}', change #{index}: {reason}")]
    InvalidInput {
        commit_id: String,
        index: usize,
        #[source]
        reason: InvalidReason,
    },
}

impl MetricsError {
    pub fn invalid_input(commit_id: impl Into<String>, index: usize, reason: InvalidReason) -> Self {
        Self::InvalidInput {
            commit_id: commit_id.into(),
            index,
            reason,
        }
    }

    pub fn reason(&self) -> InvalidReason {
        match self {
            Self::InvalidInput { reason, .. } => *reason,
        }
    }

    pub fn commit_id(&self) -> &str {
        match self {
            Self::InvalidInput { commit_id, .. } => commit_id,
        }
    }
}

/// Main error type for bound operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Input decoding errors
    #[error("Parse error in {file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Attribution errors
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file system error wrapping the underlying I/O failure
    pub fn file_system_io(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a parse error with location
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
