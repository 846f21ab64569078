//! vigil.toml configuration parser.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration::parse_duration;
use crate::error::{ConfigError, ConfigResult};

/// Probed when no config file is given: the public Internet Archive
/// properties.
pub const DEFAULT_ENDPOINTS: [&str; 7] = [
    "https://archive.org",
    "https://blog.archive.org",
    "https://help.archive.org",
    "https://web.archive.org",
    "https://mastodon.archive.org",
    "https://openlibrary.org",
    "https://archive-it.org",
];

const DEFAULT_INTERVAL: &str = "30m";
const DEFAULT_TIMEOUT: &str = "10s";

/// Top-level `vigil.toml` schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VigilConfig {
    pub watch: WatchConfig,
}

/// The `[watch]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Ordered list of URLs probed once per cycle.
    pub endpoints: Vec<String>,
    /// Pause between cycles.
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Per-probe timeout, enforced by the HTTP client.
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Verify TLS peer certificates. Off by default: the reference
    /// targets have historically served certificates that fail strict
    /// verification.
    #[serde(default)]
    pub verify_tls: bool,
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

impl Default for VigilConfig {
    fn default() -> Self {
        Self {
            watch: WatchConfig {
                endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
                interval: default_interval(),
                timeout: default_timeout(),
                verify_tls: false,
            },
        }
    }
}

impl VigilConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VigilConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The default config with a usage header, as written by `vigild init`.
    pub fn scaffold_toml() -> ConfigResult<String> {
        let body = Self::default().to_toml_string()?;
        Ok(format!(
            "# vigil watcher configuration.\n# Durations accept \"10s\", \"500ms\", \"30m\", or bare seconds.\n{body}"
        ))
    }

    /// Check endpoints and durations. Applied on every load path, and
    /// again after CLI overrides.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.watch.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }
        for url in &self.watch.endpoints {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidEndpoint(url.clone()));
            }
        }
        self.watch.interval()?;
        self.watch.timeout()?;
        Ok(())
    }
}

impl WatchConfig {
    /// The pause between cycles.
    pub fn interval(&self) -> ConfigResult<Duration> {
        checked_duration("interval", &self.interval)
    }

    /// The per-probe timeout.
    pub fn timeout(&self) -> ConfigResult<Duration> {
        checked_duration("timeout", &self.timeout)
    }
}

fn checked_duration(field: &'static str, value: &str) -> ConfigResult<Duration> {
    let parsed = parse_duration(value).ok_or_else(|| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
    })?;
    if parsed.is_zero() {
        return Err(ConfigError::ZeroDuration { field });
    }
    Ok(parsed)
}
