use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use crate::formatting::ColorMode;
use crate::io::output::OutputFormat;
use crate::metrics::{ChangeMetric, ContributorRanking};
use std::path::PathBuf;

/// Largest number of decimal places a text report will print
pub const MAX_PRECISION: usize = 12;

fn default_precision() -> usize {
    4
}

fn default_top_contributors() -> usize {
    10
}

/// Root configuration structure for bound
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BoundConfig {
    #[serde(default)]
    pub metric: MetricConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub summary: SummaryConfig,

    #[serde(default)]
    pub parallel: ParallelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MetricConfig {
    /// Which per-file weight counts as an effective change
    #[serde(default)]
    pub variant: ChangeMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places for fractions in terminal and markdown output
    #[serde(default = "default_precision")]
    pub precision: usize,

    #[serde(default)]
    pub color: ColorMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
            color: ColorMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryConfig {
    /// Contributors listed per owner
    #[serde(default = "default_top_contributors")]
    pub top_contributors: usize,

    #[serde(default)]
    pub rank_by: ContributorRanking,

    /// Author to code-owner TSV used to split team and outside work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberships: Option<PathBuf>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top_contributors: default_top_contributors(),
            rank_by: ContributorRanking::default(),
            memberships: None,
        }
    }
}

impl BoundConfig {
    /// Clamp out-of-range values, warning about each one
    pub fn normalize(&mut self) {
        if self.output.precision > MAX_PRECISION {
            log::warn!(
                "output.precision {} exceeds {}; clamping",
                self.output.precision,
                MAX_PRECISION
            );
            self.output.precision = MAX_PRECISION;
        }
    }
}
