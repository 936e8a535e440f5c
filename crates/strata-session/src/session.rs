//! Session wrapper around the engine's statement protocol.
//!
//! A `Session` owns one authenticated connection handle bound to exactly one
//! (catalog, schema) pair. Changing either requires tearing the handle down
//! and building a new one; there is no in-place catalog switch at the
//! protocol level.

use serde_json::json;

use crate::auth;
use crate::error::{EngineError, Result};
use crate::ident;
use crate::result_table::ResultTable;
use crate::settings::EngineSettings;
use crate::statement;

/// The live connection: an authenticated HTTP client plus the token and
/// endpoint it was built for. Owned exclusively by the `Session`.
#[derive(Debug)]
struct ConnectionHandle {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

/// One authenticated, catalog/schema-bound connection to the query engine.
///
/// Lifecycle is `Unopened -> Open -> Closed`; `switch_catalog` internally
/// goes `Open -> Closed -> Open` with a fresh handle. `Drop` invokes
/// `close()`, so every exit path releases the connection exactly once.
#[derive(Debug)]
pub struct Session {
    settings: EngineSettings,
    handle: Option<ConnectionHandle>,
}

impl Session {
    /// Open an authenticated session bound to the configured catalog and
    /// schema. Fails with a `Setup` error if token acquisition or client
    /// construction fails.
    pub async fn open(settings: EngineSettings) -> Result<Self> {
        let mut session = Session {
            settings,
            handle: None,
        };
        session.connect().await?;
        Ok(session)
    }

    pub fn catalog(&self) -> &str {
        &self.settings.catalog
    }

    pub fn schema(&self) -> &str {
        &self.settings.schema
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    async fn connect(&mut self) -> Result<()> {
        let mut builder = reqwest::Client::builder();
        if !self.settings.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| EngineError::setup(format!("Failed to build HTTP client: {}", e)))?;

        let token = auth::acquire_token(&http, &self.settings.auth).await?;

        let base_url = format!(
            "{}://{}:{}",
            self.settings.http_scheme, self.settings.host, self.settings.port
        );

        self.handle = Some(ConnectionHandle {
            http,
            token,
            base_url,
        });

        log::info!(
            "Connected to query engine at {}:{} (catalog: {})",
            self.settings.host,
            self.settings.port,
            self.settings.catalog
        );
        Ok(())
    }

    fn handle(&self) -> Result<&ConnectionHandle> {
        self.handle
            .as_ref()
            .ok_or_else(|| EngineError::setup("Session is closed"))
    }

    /// Execute arbitrary SQL and materialize the full result set in memory.
    ///
    /// No size limit is enforced; the caller is responsible for bounding
    /// the result.
    pub async fn run(&self, sql: &str) -> Result<ResultTable> {
        let handle = self.handle()?;
        log::debug!("Executing statement: {}", sql);
        statement::execute(
            &handle.http,
            &handle.base_url,
            &handle.token,
            &self.settings.user,
            &self.settings.catalog,
            &self.settings.schema,
            sql,
        )
        .await
    }

    /// Round-trip a trivial query. True iff the scalar result is exactly 1;
    /// any other value or failure yields false, never an error.
    pub async fn test(&self) -> bool {
        match self.run("SELECT 1").await {
            Ok(table) => matches!(table.scalar(), Some(v) if *v == json!(1)),
            Err(e) => {
                log::error!("Connection test failed: {}", e);
                false
            }
        }
    }

    /// Table names in the session's catalog and the given (or current)
    /// schema, in the engine's default ordering.
    pub async fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>> {
        let schema = schema.unwrap_or(self.settings.schema.as_str());
        ident::validate_identifier("catalog", &self.settings.catalog)?;
        ident::validate_identifier("schema", schema)?;

        let sql = format!(
            "SELECT table_name FROM {}.information_schema.tables WHERE table_schema = '{}'",
            self.settings.catalog,
            ident::escape_literal(schema)
        );
        let table = self.run(&sql).await?;
        table.string_column("table_name")
    }

    /// All catalog names known to the engine.
    ///
    /// Unlike its sibling metadata calls this swallows failure into an
    /// empty list; see DESIGN.md for why the asymmetry is kept.
    pub async fn list_catalogs(&self) -> Vec<String> {
        let result = match self.run("SHOW CATALOGS").await {
            Ok(table) => table.string_column("Catalog"),
            Err(e) => Err(e),
        };
        match result {
            Ok(catalogs) => catalogs,
            Err(e) => {
                log::error!("Failed to list catalogs: {}", e);
                Vec::new()
            }
        }
    }

    /// Close the current connection, rebind to `new_catalog` (schema
    /// defaults to the catalog name when omitted), reconnect, and return
    /// the result of `test()`. Any failure along the way yields false
    /// rather than an error.
    pub async fn switch_catalog(&mut self, new_catalog: &str, new_schema: Option<&str>) -> bool {
        if let Err(e) = ident::validate_identifier("catalog", new_catalog) {
            log::warn!("Refusing catalog switch: {}", e);
            return false;
        }
        if let Some(schema) = new_schema {
            if let Err(e) = ident::validate_identifier("schema", schema) {
                log::warn!("Refusing catalog switch: {}", e);
                return false;
            }
        }

        self.close();
        self.settings.catalog = new_catalog.to_string();
        // Schema defaults to the same name as the catalog
        self.settings.schema = new_schema.unwrap_or(new_catalog).to_string();

        if let Err(e) = self.connect().await {
            log::error!("Failed to switch catalog: {}", e);
            return false;
        }
        self.test().await
    }

    /// Release the connection handle. Idempotent: calling this on an
    /// already-closed session is a no-op with no second network teardown.
    pub fn close(&mut self) {
        if self.handle.take().is_some() {
            log::info!("Connection closed");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
