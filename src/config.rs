use serde::Deserialize;

use crate::aggregator::{DEFAULT_HISTORY_DAYS, DEFAULT_MAX_HISTORY_DAYS, HistoryWindow};
use crate::models::ServiceDescriptor;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub prometheus: PrometheusConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory served at `/` (dashboard page). Nothing is served when unset.
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrometheusConfig {
    pub url: String,
    /// Per-request timeout; an expired query counts as the source being unreachable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Window used when the caller gives none (or 0).
    #[serde(default = "default_history_days")]
    pub default_days: u32,
    /// Larger requested windows are clamped to this.
    #[serde(default = "default_max_history_days")]
    pub max_days: u32,
}

fn default_history_days() -> u32 {
    DEFAULT_HISTORY_DAYS
}

fn default_max_history_days() -> u32 {
    DEFAULT_MAX_HISTORY_DAYS
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_days: default_history_days(),
            max_days: default_max_history_days(),
        }
    }
}

impl From<&HistoryConfig> for HistoryWindow {
    fn from(c: &HistoryConfig) -> Self {
        HistoryWindow {
            default_days: c.default_days,
            max_days: c.max_days,
        }
    }
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`), then applies `PORT` / `PROMETHEUS_URL`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        let mut config: AppConfig = toml::from_str(&s)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Environment-style overrides; `lookup` returns the value for a variable name.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {:?}: {}", port, e))?;
        }
        if let Some(url) = lookup("PROMETHEUS_URL") {
            self.prometheus.url = url;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.prometheus.url.starts_with("http://")
                || self.prometheus.url.starts_with("https://"),
            "prometheus.url must be an http(s) URL, got {:?}",
            self.prometheus.url
        );
        anyhow::ensure!(
            self.prometheus.timeout_ms > 0,
            "prometheus.timeout_ms must be > 0, got {}",
            self.prometheus.timeout_ms
        );
        anyhow::ensure!(
            self.history.default_days > 0,
            "history.default_days must be > 0, got {}",
            self.history.default_days
        );
        anyhow::ensure!(
            self.history.max_days >= self.history.default_days,
            "history.max_days must be >= history.default_days ({}), got {}",
            self.history.default_days,
            self.history.max_days
        );
        anyhow::ensure!(
            !self.services.is_empty(),
            "services must list at least one service"
        );
        for s in &self.services {
            anyhow::ensure!(!s.id.is_empty(), "services.id must be non-empty");
            anyhow::ensure!(
                !s.selector.is_empty(),
                "services.selector must be non-empty (service {})",
                s.id
            );
        }
        let mut ids: Vec<&str> = self.services.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
            anyhow::bail!("services.id must be unique, {} appears twice", dup[0]);
        }
        Ok(())
    }
}
