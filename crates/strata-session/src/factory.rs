//! Trait seams between the HTTP layer and the session wrapper.
//!
//! Handlers depend on these traits rather than on `Session` directly so
//! they can be exercised against scripted sessions in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::result_table::ResultTable;
use crate::session::Session;
use crate::settings::EngineSettings;

/// One authenticated, catalog/schema-bound engine session.
#[async_trait]
pub trait EngineSession: Send {
    async fn test(&self) -> bool;
    async fn run(&self, sql: &str) -> Result<ResultTable>;
    async fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>>;
    async fn list_catalogs(&self) -> Vec<String>;
    async fn switch_catalog(&mut self, new_catalog: &str, new_schema: Option<&str>) -> bool;
    fn close(&mut self);
}

#[async_trait]
impl EngineSession for Session {
    async fn test(&self) -> bool {
        Session::test(self).await
    }

    async fn run(&self, sql: &str) -> Result<ResultTable> {
        Session::run(self, sql).await
    }

    async fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>> {
        Session::list_tables(self, schema).await
    }

    async fn list_catalogs(&self) -> Vec<String> {
        Session::list_catalogs(self).await
    }

    async fn switch_catalog(&mut self, new_catalog: &str, new_schema: Option<&str>) -> bool {
        Session::switch_catalog(self, new_catalog, new_schema).await
    }

    fn close(&mut self) {
        Session::close(self)
    }
}

/// Opens engine sessions. One session per call, no pooling and no reuse
/// across requests.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn EngineSession>>;
}

/// Production factory: opens a real `Session` from connection settings.
pub struct EngineSessionFactory {
    settings: EngineSettings,
}

impl EngineSessionFactory {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionFactory for EngineSessionFactory {
    async fn open_session(&self) -> Result<Box<dyn EngineSession>> {
        let session = Session::open(self.settings.clone()).await?;
        Ok(Box::new(session))
    }
}
