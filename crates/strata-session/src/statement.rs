//! Cursor-based statement protocol client.
//!
//! The engine executes SQL through a paged HTTP protocol: POST the statement
//! text to `/v1/statement`, then follow `nextUri` links until the final page,
//! accumulating column metadata and data rows along the way.

use serde::Deserialize;
use serde_json::Value;

use crate::error::EngineError;
use crate::result_table::ResultTable;

pub(crate) const STATEMENT_PATH: &str = "/v1/statement";

const HEADER_USER: &str = "X-Trino-User";
const HEADER_CATALOG: &str = "X-Trino-Catalog";
const HEADER_SCHEMA: &str = "X-Trino-Schema";

/// One page of a statement's results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatementPage {
    #[serde(default)]
    pub columns: Option<Vec<ColumnMeta>>,
    #[serde(default)]
    pub data: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub next_uri: Option<String>,
    #[serde(default)]
    pub error: Option<EngineFailure>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnMeta {
    pub name: String,
}

/// Engine-side failure attached to a result page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EngineFailure {
    pub message: String,
    #[serde(default)]
    pub error_name: Option<String>,
}

/// Accumulates protocol pages into a single materialized result.
#[derive(Debug, Default)]
pub(crate) struct PageAccumulator {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl PageAccumulator {
    /// Fold one page in. Returns the URI of the next page, if any.
    pub fn push(&mut self, page: StatementPage) -> Result<Option<String>, EngineError> {
        if let Some(failure) = page.error {
            let detail = match failure.error_name {
                Some(name) => format!("{}: {}", name, failure.message),
                None => failure.message,
            };
            return Err(EngineError::query(detail));
        }

        // Column metadata appears on the first page that carries data
        if self.columns.is_empty() {
            if let Some(columns) = page.columns {
                self.columns = columns.into_iter().map(|c| c.name).collect();
            }
        }

        if let Some(data) = page.data {
            self.rows.extend(data);
        }

        Ok(page.next_uri)
    }

    pub fn finish(self) -> ResultTable {
        ResultTable::new(self.columns, self.rows)
    }
}

/// Execute a statement and materialize every result page.
pub(crate) async fn execute(
    http: &reqwest::Client,
    base_url: &str,
    token: &str,
    user: &str,
    catalog: &str,
    schema: &str,
    sql: &str,
) -> Result<ResultTable, EngineError> {
    let url = format!("{}{}", base_url, STATEMENT_PATH);

    let mut response = http
        .post(&url)
        .bearer_auth(token)
        .header(HEADER_USER, user)
        .header(HEADER_CATALOG, catalog)
        .header(HEADER_SCHEMA, schema)
        .body(sql.to_string())
        .send()
        .await
        .map_err(|e| EngineError::query(format!("Statement request to '{}' failed: {}", url, e)))?;

    let mut accumulator = PageAccumulator::default();

    loop {
        if !response.status().is_success() {
            return Err(EngineError::query(format!(
                "Statement request returned status {}",
                response.status()
            )));
        }

        let page: StatementPage = response
            .json()
            .await
            .map_err(|e| EngineError::query(format!("Failed to parse statement response: {}", e)))?;

        match accumulator.push(page)? {
            Some(next_uri) => {
                response = http.get(&next_uri).bearer_auth(token).send().await.map_err(|e| {
                    EngineError::query(format!(
                        "Failed to fetch result page '{}': {}",
                        next_uri, e
                    ))
                })?;
            }
            None => break,
        }
    }

    Ok(accumulator.finish())
}
