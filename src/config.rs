use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL path prefix of every entity URL.
    pub base_url: String,
    /// Directory of the key-value store holding all site data.
    pub data_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "/annalist/".to_owned(),
            data_dir: PathBuf::from("annalist_site"),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        Config::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }
}
