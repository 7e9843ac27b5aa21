use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub favorites: FavoritesConfig,
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "failed to parse config TOML")
    }
}

#[derive(Debug, Deserialize)]
pub struct FavoritesConfig {
    /// JSON document the favorites collection is persisted to.
    pub path: PathBuf,
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

/// What to do when the favorites file exists but does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Treat the file as empty and overwrite on the next mutation. Keeps
    /// the server available at the price of discarding the broken content.
    #[default]
    Reset,
    /// Surface a storage error and refuse to operate on the collection.
    Error,
}

#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Static album source JSON. Read-only; must exist.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}
