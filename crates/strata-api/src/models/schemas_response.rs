use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemasResponse {
    pub schemas: Vec<String>,
}
