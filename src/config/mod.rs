use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use tracing::warn;

use crate::core::data::store::StoreOptions;
use crate::error::{ConfigError, Result};

fn default_provider_timeout_seconds() -> u64 {
    15
}

fn default_db_min_connections() -> u32 {
    1
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_db_acquire_timeout_seconds() -> u64 {
    5
}

fn default_db_connect_retries() -> u32 {
    5
}

fn default_db_connect_retry_delay_seconds() -> u64 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database file path
    pub database_path: PathBuf,

    /// Address the HTTP server listens on
    pub bind_address: String,

    /// LRCLIB instance URL
    pub lrclib_instance: String,

    /// Upper bound on any single remote request (seconds)
    #[serde(default = "default_provider_timeout_seconds")]
    pub provider_timeout_seconds: u64,

    /// Connection pool floor
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    /// Connection pool ceiling
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// How long a request may wait for a pooled connection (seconds)
    #[serde(default = "default_db_acquire_timeout_seconds")]
    pub db_acquire_timeout_seconds: u64,

    /// Startup connection attempts before giving up
    #[serde(default = "default_db_connect_retries")]
    pub db_connect_retries: u32,

    /// Pause between startup connection attempts (seconds)
    #[serde(default = "default_db_connect_retry_delay_seconds")]
    pub db_connect_retry_delay_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        // Use /data only when explicitly running under Docker (DOCKER env var)
        let default_data_path = if env::var("DOCKER").is_ok() {
            PathBuf::from("/data")
        } else {
            match ProjectDirs::from("net", "lyricsd", "lyricsd") {
                Some(project_dirs) => project_dirs.data_dir().to_path_buf(),
                None => {
                    warn!("ProjectDirs unavailable; falling back to current directory for data path");
                    PathBuf::from(".")
                }
            }
        };

        Self {
            database_path: default_data_path.join("lyricsd.db"),
            bind_address: "0.0.0.0:8000".to_string(),
            lrclib_instance: "https://lrclib.net".to_string(),
            provider_timeout_seconds: default_provider_timeout_seconds(),
            db_min_connections: default_db_min_connections(),
            db_max_connections: default_db_max_connections(),
            db_acquire_timeout_seconds: default_db_acquire_timeout_seconds(),
            db_connect_retries: default_db_connect_retries(),
            db_connect_retry_delay_seconds: default_db_connect_retry_delay_seconds(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists (for Docker and development)
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        // Override with file configuration if available
        let config_file = if let Some(path) = config_path {
            PathBuf::from(path)
        } else {
            Self::default_config_path()?
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            let file_config: Config = toml::from_str(&content)?;
            config = file_config;
        }

        // Override with environment variables (highest priority)
        config.load_from_env();

        config.validate()?;

        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Save config file if it doesn't exist
        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)?;
            }
            config.save(&config_file)?;
        }

        Ok(config)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) {
        if let Ok(db_path) = env::var("LYRICSD_DATABASE_PATH") {
            self.database_path = PathBuf::from(db_path);
        }

        if let Ok(bind) = env::var("LYRICSD_BIND_ADDRESS") {
            self.bind_address = bind;
        }

        if let Ok(instance) = env::var("LYRICSD_LRCLIB_INSTANCE") {
            self.lrclib_instance = instance;
        }

        if let Ok(timeout) = env::var("LYRICSD_PROVIDER_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.provider_timeout_seconds = value;
            }
        }

        if let Ok(min) = env::var("LYRICSD_DB_MIN_CONNECTIONS") {
            if let Ok(value) = min.parse::<u32>() {
                self.db_min_connections = value;
            }
        }

        if let Ok(max) = env::var("LYRICSD_DB_MAX_CONNECTIONS") {
            if let Ok(value) = max.parse::<u32>() {
                self.db_max_connections = value;
            }
        }

        if let Ok(timeout) = env::var("LYRICSD_DB_ACQUIRE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.db_acquire_timeout_seconds = value;
            }
        }

        if let Ok(retries) = env::var("LYRICSD_DB_CONNECT_RETRIES") {
            if let Ok(value) = retries.parse::<u32>() {
                self.db_connect_retries = value;
            }
        }

        if let Ok(delay) = env::var("LYRICSD_DB_CONNECT_RETRY_DELAY_SECONDS") {
            if let Ok(value) = delay.parse::<u64>() {
                self.db_connect_retry_delay_seconds = value;
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if url::Url::parse(&self.lrclib_instance).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "lrclib_instance".to_string(),
                value: self.lrclib_instance.clone(),
            }
            .into());
        }

        if self.db_max_connections == 0 || self.db_max_connections < self.db_min_connections {
            return Err(ConfigError::InvalidValue {
                field: "db_max_connections".to_string(),
                value: self.db_max_connections.to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "lyricsd", "lyricsd").ok_or_else(|| {
            crate::error::LyricsdError::Internal(anyhow::anyhow!(
                "Failed to determine project directories"
            ))
        })?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_seconds)
    }

    pub fn store_options(&self) -> StoreOptions {
        let mut options = StoreOptions::new(&self.database_path);
        options.min_connections = self.db_min_connections;
        options.max_connections = self.db_max_connections;
        options.acquire_timeout = Duration::from_secs(self.db_acquire_timeout_seconds);
        options.connect_retries = self.db_connect_retries.max(1);
        options.connect_retry_delay = Duration::from_secs(self.db_connect_retry_delay_seconds);
        options
    }
}
