//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub poll: PollConfig,
}

/// Device connection configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Verbosity: 0 = silent, >1 = log raw sent/received bytes
    #[serde(default)]
    pub verbose: u8,
}

/// Polling loop configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Stop after this many poll cycles (0 = run until Ctrl+C)
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

// Default value functions
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 4001 }

fn default_interval_ms() -> u64 { 1000 }
fn default_max_cycles() -> u64 { 30 }

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            verbose: 0,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_cycles: default_max_cycles(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iru_link::config::Config;
    ///
    /// let config = Config::load("config.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.connection.host.is_empty() {
            return Err(crate::error::IruLinkError::Config(
                toml::de::Error::custom("connection host cannot be empty")
            ));
        }

        if self.connection.port == 0 {
            return Err(crate::error::IruLinkError::Config(
                toml::de::Error::custom("connection port cannot be 0")
            ));
        }

        if self.poll.interval_ms == 0 || self.poll.interval_ms > 60000 {
            return Err(crate::error::IruLinkError::Config(
                toml::de::Error::custom("interval_ms must be between 1 and 60000")
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.connection.host, "127.0.0.1");
        assert_eq!(config.connection.port, 4001);
        assert_eq!(config.connection.verbose, 0);
        assert_eq!(config.poll.interval_ms, 1000);
        assert_eq!(config.poll.max_cycles, 30);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [connection]
            host = "130.46.82.174"
            port = 4001
            verbose = 2

            [poll]
            interval_ms = 500
            max_cycles = 0
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.connection.host, "130.46.82.174");
        assert_eq!(config.connection.verbose, 2);
        assert_eq!(config.poll.interval_ms, 500);
        assert_eq!(config.poll.max_cycles, 0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
            [connection]
            host = "10.0.0.5"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.connection.host, "10.0.0.5");
        assert_eq!(config.connection.port, 4001);
        assert_eq!(config.poll.interval_ms, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[connection]\nhost = \"192.0.2.10\"\nport = 4002\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.connection.host, "192.0.2.10");
        assert_eq!(config.connection.port, 4002);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("/nonexistent/iru-link.toml").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let toml_str = r#"
            [connection]
            host = ""
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let toml_str = r#"
            [poll]
            interval_ms = 0
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }
}
