use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the configuration was read from, `None` when running on defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `sqlite:data/hotel.db?mode=rwc`. Without one the
    /// server runs with no store attached.
    pub url: Option<String>,
    /// Name reported by the diagnostics endpoint
    pub name: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Insert the sample hotels when the server starts
    #[serde(default)]
    pub seed_on_startup: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: None,
            max_connections: default_max_connections(),
            seed_on_startup: false,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values taken from the command line or environment, applied on top of the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::parse(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse configuration file")
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(url) = overrides.database_url.filter(|u| !u.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(name) = overrides.database_name.filter(|n| !n.is_empty()) {
            self.database.name = Some(name);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
