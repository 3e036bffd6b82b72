use crate::core::CommitAttribution;
use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use crate::metrics::SummaryReport;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_attributions(&mut self, attributions: &[CommitAttribution]) -> anyhow::Result<()>;
    fn write_summary(&mut self, report: &SummaryReport) -> anyhow::Result<()>;
}

/// Build a writer for `format` that renders into `destination`.
///
/// `precision` is the number of decimal places used for fractions in text
/// formats; JSON always carries full precision.
pub fn create_writer(
    format: OutputFormat,
    destination: Box<dyn Write>,
    precision: usize,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination, precision)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination, precision)),
    }
}

/// Open the output destination: a file when given, stdout otherwise
pub fn open_destination(output: Option<&std::path::Path>) -> anyhow::Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
