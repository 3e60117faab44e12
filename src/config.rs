//! Harvest settings loaded from YAML.
//!
//! Every field has a default, so an empty file, a partial file and no file at
//! all are all valid:
//!
//! ```yaml
//! concurrency: 1
//! per_host_delay_ms: 1500
//! max_pages:
//!   the_hindu: 2
//! max_items:
//!   times_of_india: 60
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Runtime knobs for the orchestrator and the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    /// Adapters in flight at once. `1` runs them one after another.
    pub concurrency: usize,
    pub request_timeout_secs: u64,
    /// Upper bound on one adapter call, all pages included.
    pub source_timeout_secs: u64,
    /// Minimum spacing between two requests to the same host; `0` disables it.
    pub per_host_delay_ms: u64,
    /// Pause between adapters when running sequentially.
    pub source_gap_ms: u64,
    pub user_agent: String,
    /// Page limit per source key.
    pub max_pages: HashMap<String, usize>,
    /// Item cap per source key.
    pub max_items: HashMap<String, usize>,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            concurrency: 4,
            request_timeout_secs: 15,
            source_timeout_secs: 90,
            per_host_delay_ms: 1000,
            source_gap_ms: 2000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_pages: HashMap::new(),
            max_items: HashMap::new(),
        }
    }
}

impl HarvestSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    pub fn per_host_delay(&self) -> Duration {
        Duration::from_millis(self.per_host_delay_ms)
    }

    pub fn source_gap(&self) -> Duration {
        Duration::from_millis(self.source_gap_ms)
    }

    /// Parse settings from YAML text. Blank input yields the defaults.
    pub fn from_yaml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
            path: origin.to_string(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`.
    ///
    /// `None`, or a path that does not exist, yields the defaults. A file
    /// that exists but cannot be read or parsed is an error.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let shown = path.display().to_string();
        let text = match fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %shown, "Config file not found; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: shown,
                    source,
                });
            }
        };
        let settings = Self::from_yaml(&text, &shown)?;
        info!(path = %shown, concurrency = settings.concurrency, "Loaded configuration");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 || self.source_timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least one second".into()));
        }
        if let Some((key, _)) = self.max_pages.iter().find(|(_, pages)| **pages == 0) {
            return Err(ConfigError::Invalid(format!("max_pages for '{key}' must be at least 1")));
        }
        Ok(())
    }
}
