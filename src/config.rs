use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::history::DEFAULT_CAPACITY;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "MTLSH_CONFIG";

/// User settings, read from `~/.config/mtlsh/config.toml`.
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    pub history_size: usize,
    /// Where to write the log. Nothing is logged when unset.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "MTL458 > ".to_string(),
            history_size: DEFAULT_CAPACITY,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the config file named by `$MTLSH_CONFIG`, falling back to
    /// `$HOME/.config/mtlsh/config.toml`. A missing file gives the defaults.
    pub fn load() -> anyhow::Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.history_size = config.history_size.max(1);
        Ok(config)
    }

    fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join(".config/mtlsh/config.toml"))
    }
}
