//! Engine connection settings.
//!
//! Embedded as the `[engine]` section of the server configuration file.

use serde::{Deserialize, Serialize};

/// Connection settings for the backing query engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_scheme")]
    pub http_scheme: String,
    /// When false the HTTP client accepts invalid TLS certificates.
    /// Off by default: the engine endpoints this facade fronts commonly
    /// sit behind internal certificates.
    #[serde(default)]
    pub verify_tls: bool,
    /// Principal identity sent with every statement.
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default)]
    pub auth: AuthSettings,
}

/// Token acquisition settings.
///
/// A configured static token wins; otherwise the OAuth2 client-credentials
/// flow runs against `token_endpoint` when a session opens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub static_token: Option<String>,
    #[serde(default)]
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            http_scheme: default_scheme(),
            verify_tls: false,
            user: default_user(),
            catalog: default_catalog(),
            schema: default_schema(),
            auth: AuthSettings::default(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    443
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_user() -> String {
    "strata".to_string()
}

fn default_catalog() -> String {
    "system".to_string()
}

fn default_schema() -> String {
    "runtime".to_string()
}
