use anyhow::Result;
use clap::Parser;
use pennywise_cli::config::{ConfigSource, PennywiseConfig};
use pennywise_cli::{Cli, logging};
use std::process::ExitCode;
use tracing::{info, warn};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = PennywiseConfig::load(cli.config.as_deref())?;
    let mut config = loaded.config;
    let overrides = config.apply_profile();
    logging::init_logging(&config.logging)?;

    match &loaded.source {
        ConfigSource::File(path) => info!(path = %path.display(), "configuration loaded"),
        ConfigSource::Defaults(path) => warn!(
            path = %path.display(),
            "configuration file not found, using defaults"
        ),
    }
    if !overrides.is_empty() {
        info!(?overrides, "environment overrides applied");
    }

    let succeeded = cli.execute(&config, &mut std::io::stdout().lock())?;
    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
