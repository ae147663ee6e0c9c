use std::fs::OpenOptions;
use std::str::FromStr;

use anyhow::Context;
use log::LevelFilter;
use simplelog::WriteLogger;

use crate::config::Config;

/// Installs a file logger when the config names a log file.
///
/// stderr belongs to the `Invalid Command` message, so without a log file
/// nothing is installed and every log call is a no-op.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let level = parse_level(&config.log_level)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    WriteLogger::init(level, simplelog::Config::default(), file)
        .context("installing logger")?;
    log::info!("mtlsh {} started", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn parse_level(level: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(level).map_err(|_| anyhow::anyhow!("unknown log level {:?}", level))
}
