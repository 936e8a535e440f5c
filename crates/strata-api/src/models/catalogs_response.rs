use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogsResponse {
    pub catalogs: Vec<String>,
}
