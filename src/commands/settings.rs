use crate::cli::ReportArgs;
use crate::config::{BoundConfig, ParallelConfig, MAX_PRECISION};
use crate::formatting::{ColorMode, FormattingConfig};
use crate::io::OutputFormat;
use crate::metrics::ChangeMetric;

/// Effective settings for a reporting command: CLI flags over config file
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub metric: ChangeMetric,
    pub format: OutputFormat,
    pub precision: usize,
    pub parallel: ParallelConfig,
    pub color: ColorMode,
    pub top_contributors: usize,
}

impl ReportSettings {
    /// Pure function: Merge CLI flags into the loaded configuration
    pub fn resolve(args: &ReportArgs, config: &BoundConfig, top: Option<usize>) -> Self {
        let color = if args.plain {
            ColorMode::Never
        } else {
            args.color.unwrap_or(config.output.color)
        };

        Self {
            metric: args.metric.unwrap_or(config.metric.variant),
            format: args.format.unwrap_or(config.output.format),
            precision: args
                .precision
                .unwrap_or(config.output.precision)
                .min(MAX_PRECISION),
            parallel: ParallelConfig {
                enabled: config.parallel.enabled && !args.no_parallel,
                jobs: args.jobs.unwrap_or(config.parallel.jobs),
            },
            color,
            top_contributors: top.unwrap_or(config.summary.top_contributors),
        }
    }

    pub fn formatting(&self) -> FormattingConfig {
        if self.color == ColorMode::Never {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env_with(self.color)
        }
    }
}
