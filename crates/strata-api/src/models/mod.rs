//! Response models for the metadata facade.

mod catalogs_response;
mod columns_response;
mod error_response;
mod health_response;
mod schemas_response;
mod tables_response;

pub use catalogs_response::CatalogsResponse;
pub use columns_response::{ColumnDescriptor, ColumnsResponse};
pub use error_response::ErrorResponse;
pub use health_response::HealthResponse;
pub use schemas_response::SchemasResponse;
pub use tables_response::TablesResponse;
