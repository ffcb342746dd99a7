use clap::{Args, Subcommand};

use crate::config::Config as AppConfig;
use crate::error::{ConfigError, Result};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// List all available configuration keys
    Keys,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("🔧 Current configuration:");
            println!("  📁 database_path: {}", config.database_path.display());
            println!("  🌐 bind_address: {}", config.bind_address);
            println!("  🎤 lrclib_instance: {}", config.lrclib_instance);
            println!("  ⏱️  provider_timeout_seconds: {}", config.provider_timeout_seconds);
            println!("  🗃️  db_min_connections: {}", config.db_min_connections);
            println!("  🗃️  db_max_connections: {}", config.db_max_connections);
            println!("  ⏳ db_acquire_timeout_seconds: {}", config.db_acquire_timeout_seconds);
            println!("  🔁 db_connect_retries: {}", config.db_connect_retries);
            println!("  🔁 db_connect_retry_delay_seconds: {}", config.db_connect_retry_delay_seconds);
        }

        ConfigCommands::Set { key, value } => {
            let config_path = AppConfig::config_path()?;
            let mut new_config = config.clone();

            match key.as_str() {
                "database_path" => {
                    new_config.database_path = std::path::PathBuf::from(&value);
                }
                "bind_address" => {
                    new_config.bind_address = value.clone();
                }
                "lrclib_instance" => {
                    new_config.lrclib_instance = value.clone();
                }
                "provider_timeout_seconds" => {
                    new_config.provider_timeout_seconds = parse_number(&key, &value)?;
                }
                "db_min_connections" => {
                    new_config.db_min_connections = parse_number(&key, &value)?;
                }
                "db_max_connections" => {
                    new_config.db_max_connections = parse_number(&key, &value)?;
                }
                "db_acquire_timeout_seconds" => {
                    new_config.db_acquire_timeout_seconds = parse_number(&key, &value)?;
                }
                "db_connect_retries" => {
                    new_config.db_connect_retries = parse_number(&key, &value)?;
                }
                "db_connect_retry_delay_seconds" => {
                    new_config.db_connect_retry_delay_seconds = parse_number(&key, &value)?;
                }
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: key,
                        value,
                    }
                    .into());
                }
            }

            new_config.validate()?;
            new_config.save(&config_path)?;
            println!("✅ Configuration updated: {} = {}", key, value);
        }

        ConfigCommands::Get { key } => {
            let value = match key.as_str() {
                "database_path" => config.database_path.display().to_string(),
                "bind_address" => config.bind_address.clone(),
                "lrclib_instance" => config.lrclib_instance.clone(),
                "provider_timeout_seconds" => config.provider_timeout_seconds.to_string(),
                "db_min_connections" => config.db_min_connections.to_string(),
                "db_max_connections" => config.db_max_connections.to_string(),
                "db_acquire_timeout_seconds" => config.db_acquire_timeout_seconds.to_string(),
                "db_connect_retries" => config.db_connect_retries.to_string(),
                "db_connect_retry_delay_seconds" => {
                    config.db_connect_retry_delay_seconds.to_string()
                }
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: key,
                        value: "unknown key".to_string(),
                    }
                    .into());
                }
            };

            println!("{}", value);
        }

        ConfigCommands::Path => {
            let config_path = AppConfig::config_path()?;
            println!("{}", config_path.display());
        }

        ConfigCommands::Reset => {
            let config_path = AppConfig::config_path()?;
            let default_config = AppConfig::default();
            default_config.save(&config_path)?;
            println!("✅ Configuration reset to defaults");
            println!("📁 Config file: {}", config_path.display());
        }

        ConfigCommands::Keys => {
            println!("📋 Available configuration keys:");
            println!();
            println!("🌐 Network & Service:");
            println!("  bind_address                      - Address the HTTP server listens on");
            println!("  lrclib_instance                   - LRCLIB server URL (e.g., https://lrclib.net)");
            println!("  provider_timeout_seconds          - Upper bound on a remote request");
            println!();
            println!("🗃️  Storage:");
            println!("  database_path                     - SQLite database file location");
            println!("  db_min_connections                - Connection pool floor");
            println!("  db_max_connections                - Connection pool ceiling");
            println!("  db_acquire_timeout_seconds        - Wait limit for a pooled connection");
            println!("  db_connect_retries                - Startup connection attempts");
            println!("  db_connect_retry_delay_seconds    - Pause between startup attempts");
            println!();
            println!("💡 Usage:");
            println!("  lyricsd config get <key>            - Get current value");
            println!("  lyricsd config set <key> <value>    - Set new value with validation");
            println!();
            println!("🌍 Environment Variables:");
            println!("  All config keys can be overridden with LYRICSD_<KEY> env vars");
            println!("  Example: LYRICSD_LRCLIB_INSTANCE=https://my-server.com");
        }
    }

    Ok(())
}

/// Helper to parse numeric values with a readable error
fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}
