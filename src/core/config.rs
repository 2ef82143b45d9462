use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sonarr: ApiKeyServiceConfig,
    #[serde(default)]
    pub radarr: ApiKeyServiceConfig,
    #[serde(default)]
    pub qbittorrent: QbittorrentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: i64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

/// Sonarr and Radarr share the same `apikey` query authentication.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeyServiceConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QbittorrentConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            num_threads: default_num_threads(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            lookahead_days: default_lookahead_days(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8051
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_interval_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_lookahead_days() -> i64 {
    7
}

const MAX_LOOKAHEAD_DAYS: i64 = 365;

fn default_history_capacity() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file, apply environment overrides and validate
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Build the configuration from environment variables and defaults only
    pub fn from_env() -> Result<Self> {
        Self::from_toml_str("")
    }

    fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Overlay the recognized environment variables on top of the file values.
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut String); 7] = [
            ("SONARR_API", &mut self.sonarr.url),
            ("SONARR_KEY", &mut self.sonarr.api_key),
            ("RADARR_API", &mut self.radarr.url),
            ("RADARR_KEY", &mut self.radarr.api_key),
            ("QBITTORRENT_API", &mut self.qbittorrent.url),
            ("QBITTORRENT_USERNAME", &mut self.qbittorrent.username),
            ("QBITTORRENT_PASSWORD", &mut self.qbittorrent.password),
        ];

        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.host.is_empty() {
            bail!("server host must not be empty");
        }

        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate refresh config
        if self.refresh.interval_secs == 0 {
            bail!("interval_secs must be greater than 0");
        }

        if self.refresh.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }

        if self.refresh.lookahead_days <= 0 || self.refresh.lookahead_days > MAX_LOOKAHEAD_DAYS {
            bail!(
                "lookahead_days must be between 1 and {}, got {}",
                MAX_LOOKAHEAD_DAYS,
                self.refresh.lookahead_days
            );
        }

        if self.refresh.history_capacity == 0 {
            bail!("history_capacity must be greater than 0");
        }

        // Validate upstream services
        if self.sonarr.url.is_empty() {
            bail!("sonarr url must not be empty (set [sonarr].url or SONARR_API)");
        }

        if self.sonarr.api_key.is_empty() {
            bail!("sonarr api_key must not be empty (set [sonarr].api_key or SONARR_KEY)");
        }

        if self.radarr.url.is_empty() {
            bail!("radarr url must not be empty (set [radarr].url or RADARR_API)");
        }

        if self.radarr.api_key.is_empty() {
            bail!("radarr api_key must not be empty (set [radarr].api_key or RADARR_KEY)");
        }

        if self.qbittorrent.url.is_empty() {
            bail!("qbittorrent url must not be empty (set [qbittorrent].url or QBITTORRENT_API)");
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8051,
            num_threads: 2,
        },
        refresh: RefreshConfig::default(),
        logging: LoggingConfig::default(),
        sonarr: ApiKeyServiceConfig {
            url: "http://localhost:8989/api/v3".to_string(),
            api_key: "sonarr-key".to_string(),
        },
        radarr: ApiKeyServiceConfig {
            url: "http://localhost:7878/api/v3".to_string(),
            api_key: "radarr-key".to_string(),
        },
        qbittorrent: QbittorrentConfig {
            url: "http://localhost:8080/api/v2".to_string(),
            username: "admin".to_string(),
            password: "adminadmin".to_string(),
        },
    }
}
