use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::global_constants;

/// Options shared by every request a dispatcher sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSettings {
    /// Prefix for relative request URLs.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Merged into every request; per-request headers win on conflicts.
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    global_constants::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    global_constants::DEFAULT_TIMEOUT_MS
}

fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(
        global_constants::HEADER_ACCEPT.to_string(),
        global_constants::DEFAULT_ACCEPT_HEADER.to_string(),
    );
    headers
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            headers: default_headers(),
        }
    }
}

impl TransportSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        Self::load_from(&settings_path)
    }

    pub fn load_from(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            let default_settings = Self::default();
            default_settings.save_to(settings_path)?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("failed to read settings from {:?}", settings_path))?;
        let settings: TransportSettings = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings in {:?}", settings_path))?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Base URL: {}", settings.base_url);
        log::debug!("[SETTINGS] Timeout: {} ms", settings.timeout_ms);

        Ok(settings)
    }

    pub fn save_to(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    pub fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::SETTINGS_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        if let Some(timeout_ms) = timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        self
    }
}
