pub mod input;
pub mod output;
pub mod writers;

pub use input::{parse_commits, parse_memberships, read_commits, read_memberships, InputFormat};
pub use output::{create_writer, open_destination, OutputFormat, OutputWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
