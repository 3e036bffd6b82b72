//! Parallelism configuration for batch attribution.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Configuration for parallel processing operations.
///
/// When enabled, commits are attributed concurrently on rayon's pool.
///
/// # Example
///
/// ```rust
/// use bound::config::ParallelConfig;
///
/// let config: ParallelConfig = toml::from_str("jobs = 4").unwrap();
/// assert!(config.enabled);
/// assert_eq!(config.jobs, 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Worker threads; 0 lets rayon decide
    #[serde(default)]
    pub jobs: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            jobs: 0,
        }
    }
}

impl ParallelConfig {
    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}
