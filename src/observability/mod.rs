//! Logging setup.
//!
//! Library code logs through both the `log` facade and `tracing`; the fmt
//! subscriber installed here picks up both and writes to stderr so that
//! report output on stdout stays machine readable.
//!
//! `RUST_LOG` takes precedence over the `-v` count when set.

use tracing_subscriber::EnvFilter;

/// Map a `-v` count onto a default filter directive
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling this more than once is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
