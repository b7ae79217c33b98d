use anyhow::{Context, Result};
use loader::RuleLevel;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::output::Format;

#[cfg(windows)]
pub fn config_dir() -> PathBuf {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("nunitlint")
}

#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join("nunitlint")
}

fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<Format>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CacheConfig {
    /// Relative paths resolve against the config directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    /// Settings file used when `--settings` is not given.
    #[serde(default)]
    pub settings: Option<PathBuf>,
    /// Severity overrides applied on top of the settings file.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleLevel>,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache.cache_dir.as_ref().map(|dir| {
            if dir.is_relative() {
                config_dir().join(dir)
            } else {
                dir.clone()
            }
        })
    }
}

pub fn load_config() -> Result<Config> {
    let path = config_file_path();
    if path.exists() {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).context("failed to parse config")
    } else {
        Ok(Config::default())
    }
}
