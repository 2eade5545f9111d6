use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_URL;

/// Which catalog page the client opens on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Movies,
    Series,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Movies => "Pel·lícules",
            Page::Series => "Sèries",
        }
    }

    pub fn toggle(&self) -> Page {
        match self {
            Page::Movies => Page::Series,
            Page::Series => Page::Movies,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend serving `/api/...`
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    /// Web frontend hosting `player.html` and `series-detail.html`
    #[serde(default = "default_api_url")]
    pub web_base_url: String,
    #[serde(default)]
    pub default_page: Page,
    /// Per-request timeout; unset leaves the transport default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            web_base_url: default_api_url(),
            default_page: Page::default(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "hermes", "hermes")?;
        Some(proj_dirs.config_dir().join("config.json"))
    }

    pub fn load() -> Result<Self, anyhow::Error> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(AppConfig::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(config_path) = Self::config_path() {
            self.save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), anyhow::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
