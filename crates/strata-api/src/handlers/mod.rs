//! HTTP handlers for the metadata facade.
//!
//! ## Endpoints
//! - GET /api/health - round-trip connectivity check against the engine
//! - GET /api/catalogs - list all catalogs
//! - GET /api/schemas?catalog= - list schemas in a catalog
//! - GET /api/tables?catalog=&schema= - list tables in a schema
//! - GET /api/table/details?catalog=&schema=&table= - column metadata
//!
//! Every handler opens a fresh session, performs one logical operation
//! sequence, and relies on the session's drop-time close for release on
//! every path.

mod catalogs;
mod columns;
mod health;
mod schemas;
mod tables;

pub use catalogs::catalogs_handler;
pub use columns::columns_handler;
pub use health::health_handler;
pub use schemas::schemas_handler;
pub use tables::tables_handler;

use actix_web::HttpResponse;
use strata_session::EngineError;

use crate::models::ErrorResponse;

/// Map a session-layer error to the wire envelope.
///
/// Identifier rejections are client errors; everything else surfaces as a
/// 500 carrying the structured error's message verbatim.
pub(crate) fn map_engine_error(err: EngineError) -> HttpResponse {
    match err {
        EngineError::InvalidIdentifier(_) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
        EngineError::Setup(_) | EngineError::Query(_) => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string()))
        }
    }
}
