//! Setup and initialization functions for CLI
//!
//! Runtime environment setup: configuration and thread pool.

use anyhow::{Context, Result};

use crate::config::{self, BoundConfig};

/// Load the configuration the user asked for, or discover one
pub fn resolve_config(explicit: Option<&std::path::Path>) -> Result<BoundConfig> {
    match explicit {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(config::load_config()),
    }
}

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        // Already configured - this is fine, just ignore
        log::debug!("Thread pool already configured: {}", e);
    }
}
