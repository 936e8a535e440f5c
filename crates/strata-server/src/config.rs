// Configuration module
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use strata_session::EngineSettings;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 means one worker per CPU core
    #[serde(default)]
    pub workers: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file(),
            log_to_console: true,
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            engine: EngineSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/strata.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl ServerConfig {
    /// Load configuration: read the TOML file when present, fall back to
    /// defaults otherwise, then apply environment overrides and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut config = if path.as_ref().exists() {
            let content = fs::read_to_string(path.as_ref())
                .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
            toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?
        } else {
            eprintln!(
                "Warning: {} not found, using defaults",
                path.as_ref().display()
            );
            ServerConfig::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - STRATA_HOST: Override server.host
    /// - STRATA_PORT: Override server.port
    /// - STRATA_DEBUG: Verbose logging; on unless explicitly set to false
    /// - STRATA_LOG_FILE_PATH: Override logging.file_path
    /// - STRATA_ENGINE_TOKEN: Static bearer token for the engine connection
    pub(crate) fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("STRATA_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("STRATA_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid STRATA_PORT value: {}", port_str))?;
        }

        // Debug mode defaults to on, mirroring the facade's verbose default
        let debug = env::var("STRATA_DEBUG")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);
        if debug {
            self.logging.level = "debug".to_string();
        }

        if let Ok(path) = env::var("STRATA_LOG_FILE_PATH") {
            self.logging.file_path = path;
        }

        // Token is sensitive; env only, never the config file
        if let Ok(token) = env::var("STRATA_ENGINE_TOKEN") {
            if !token.is_empty() {
                self.engine.auth.static_token = Some(token);
            }
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.engine.host.is_empty() {
            return Err(anyhow::anyhow!("Engine host cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = ServerConfig::default();
        config.logging.format = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    // Env vars are process-global, so every override assertion lives in
    // this one test to keep it serial with itself.
    #[test]
    fn test_env_overrides_apply() {
        use std::env;

        env::set_var("STRATA_HOST", "127.0.0.1");
        env::set_var("STRATA_PORT", "8123");
        env::set_var("STRATA_ENGINE_TOKEN", "sekret");
        env::remove_var("STRATA_DEBUG");

        let mut config = ServerConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.engine.auth.static_token.as_deref(), Some("sekret"));
        // Debug is on when the flag is unset, forcing verbose logging
        assert_eq!(config.logging.level, "debug");

        env::set_var("STRATA_DEBUG", "false");
        let mut config = ServerConfig::default();
        config.apply_env_overrides().unwrap();
        // Configured level survives when debug is explicitly off
        assert_eq!(config.logging.level, "info");

        env::set_var("STRATA_PORT", "not-a-port");
        let mut config = ServerConfig::default();
        assert!(config.apply_env_overrides().is_err());

        env::remove_var("STRATA_HOST");
        env::remove_var("STRATA_PORT");
        env::remove_var("STRATA_ENGINE_TOKEN");
        env::remove_var("STRATA_DEBUG");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            port = 8088

            [engine]
            host = "engine.internal"
            catalog = "analytics"
            schema = "analytics"
            "#,
        )
        .expect("parse partial config");

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.engine.host, "engine.internal");
        assert_eq!(config.engine.port, 443);
        assert_eq!(config.engine.http_scheme, "https");
        assert_eq!(config.logging.format, "compact");
    }
}
