use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# Bound Configuration

[metric]
# insertions-and-deletions (v2) or insertions-only (v1)
variant = "insertions-and-deletions"

[output]
# terminal, json or markdown
format = "terminal"
precision = 4
color = "auto"

[summary]
top_contributors = 10
# adjusted, changes or commits
rank_by = "adjusted"
# author_email<TAB>author_name<TAB>codeowner; splits team and outside work
# memberships = "memberships.tsv"

[parallel]
enabled = true
# 0 = one worker per core
jobs = 0
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
