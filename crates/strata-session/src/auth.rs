//! Bearer-token acquisition for the engine connection.

use serde::Deserialize;

use crate::error::EngineError;
use crate::settings::AuthSettings;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    expires_in: Option<u64>,
}

/// Obtain a bearer token for a new session.
///
/// A configured static token wins; otherwise the OAuth2 client-credentials
/// flow runs against the configured token endpoint. Every failure here is a
/// `Setup` error: the session never came up.
pub async fn acquire_token(
    http: &reqwest::Client,
    auth: &AuthSettings,
) -> Result<String, EngineError> {
    if let Some(token) = auth.static_token.as_deref().filter(|t| !t.is_empty()) {
        log::debug!("Using statically configured bearer token");
        return Ok(token.to_string());
    }

    let endpoint = auth.token_endpoint.as_deref().ok_or_else(|| {
        EngineError::setup("No static token and no token endpoint configured")
    })?;

    log::debug!("Requesting access token from {}", endpoint);

    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", auth.client_id.as_str()),
        ("client_secret", auth.client_secret.as_str()),
    ];

    let response = http.post(endpoint).form(&params).send().await.map_err(|e| {
        EngineError::setup(format!("Token request to '{}' failed: {}", endpoint, e))
    })?;

    if !response.status().is_success() {
        return Err(EngineError::setup(format!(
            "Token request to '{}' returned status {}",
            endpoint,
            response.status()
        )));
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        EngineError::setup(format!(
            "Failed to parse token response from '{}': {}",
            endpoint, e
        ))
    })?;

    Ok(token.access_token)
}
