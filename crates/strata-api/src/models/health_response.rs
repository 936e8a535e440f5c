use serde::{Deserialize, Serialize};

/// Body of the health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            message: message.into(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            message: message.into(),
        }
    }
}
