use anyhow::Result;
use bound::cli::{self, Commands};
use bound::observability::init_logging;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Init { force } => bound::commands::init_config(force),
        Commands::Attribute { report } => {
            let config = cli::resolve_config(cli.config.as_deref())?;
            cli::configure_thread_pool(report.jobs.unwrap_or(config.parallel.jobs));
            bound::commands::handle_attribute(&report, &config)
        }
        Commands::Summary { report, summary } => {
            let config = cli::resolve_config(cli.config.as_deref())?;
            cli::configure_thread_pool(report.jobs.unwrap_or(config.parallel.jobs));
            bound::commands::handle_summary(&report, &summary, &config)
        }
    }
}
