//! Configuration handling for the portal

use crate::gallery::{builtin_entries, load_entries, CategoryFilter, GalleryEntry, GalleryError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the gallery's starting category
pub const CATEGORY_ENV: &str = "SCHOOL_PORTAL_CATEGORY";

const DEFAULT_SCHOOL_NAME: &str = "SMPS Jhansi";
const DEFAULT_SUBMISSION_DELAY_MS: u64 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User configuration for the portal
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    /// Simulated submission latency in milliseconds
    pub submission_delay_ms: Option<u64>,
    /// JSON file with gallery entries, replaces the built-in list
    pub gallery_source: Option<PathBuf>,
    /// Category selected when the gallery opens
    pub initial_gallery_category: Option<String>,
    /// Show the animated banner on startup
    pub show_splash: Option<bool>,
    /// Name used in headings and share text
    pub school_name: Option<String>,
}

impl PortalConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("in", "smps", "school-portal")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file under the platform data dir. The terminal belongs to the UI
    /// while it runs, so logs never go to stderr.
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("school-portal.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: PortalConfig = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "loaded portal config");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(
            self.submission_delay_ms
                .unwrap_or(DEFAULT_SUBMISSION_DELAY_MS),
        )
    }

    pub fn school_name(&self) -> &str {
        self.school_name.as_deref().unwrap_or(DEFAULT_SCHOOL_NAME)
    }

    pub fn show_splash(&self) -> bool {
        self.show_splash.unwrap_or(true)
    }

    /// Starting gallery filter. `env_override` wins over the file; an
    /// unrecognised name falls back to showing everything.
    pub fn initial_category(&self, env_override: Option<&str>) -> CategoryFilter {
        let Some(raw) = env_override.or(self.initial_gallery_category.as_deref()) else {
            return CategoryFilter::All;
        };
        raw.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring initial gallery category");
            CategoryFilter::All
        })
    }

    /// Entries from `gallery_source`, or the built-in list when unset
    pub fn gallery_entries(&self) -> Result<Vec<GalleryEntry>, GalleryError> {
        match &self.gallery_source {
            Some(path) => load_entries(path),
            None => Ok(builtin_entries()),
        }
    }
}
