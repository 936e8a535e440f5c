// Strata Session Library
//
// This crate wraps the query engine's client protocol in a session type
// bound to a single (catalog, schema) pair: token-based authentication,
// statement execution, result materialization, and metadata queries.

pub mod auth;
pub mod error;
pub mod factory;
pub mod ident;
pub mod result_table;
pub mod session;
pub mod settings;
mod statement;

pub use error::{EngineError, Result};
pub use factory::{EngineSession, EngineSessionFactory, SessionFactory};
pub use result_table::ResultTable;
pub use session::Session;
pub use settings::{AuthSettings, EngineSettings};
