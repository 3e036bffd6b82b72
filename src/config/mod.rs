//! Configuration for bound, read from `.bound.toml`.

mod core;
mod loader;
mod parallel;

pub use self::core::{BoundConfig, MetricConfig, OutputConfig, SummaryConfig, MAX_PRECISION};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_dir,
    parse_and_validate_config, user_config_path, CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;
