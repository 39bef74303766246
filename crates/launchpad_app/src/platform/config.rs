//! Application configuration.
//!
//! Read from an optional `launchpad.ron` in the working directory. Every
//! field has a default, so the file may name only what it overrides.
//! `LAUNCHPAD_API_URL` in the environment wins over the file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use launchpad_engine::FetchSettings;
use log::LevelFilter;
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "launchpad.ron";
pub const API_URL_ENV: &str = "LAUNCHPAD_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub state_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
    pub pacing_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.spacexdata.com/v3/launches".to_string(),
            state_dir: PathBuf::from("."),
            log_file: PathBuf::from("./launchpad.log"),
            log_level: "info".to_string(),
            pacing_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Applies environment overrides through `lookup` (normally `std::env::var`).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        self
    }

    pub fn level(&self) -> LevelFilter {
        launchpad_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            pacing_delay: Duration::from_millis(self.pacing_delay_ms),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::new(self.api_url.clone())
        }
    }
}
