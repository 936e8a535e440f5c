//! Table column metadata handler

use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::Deserialize;
use std::sync::Arc;

use strata_session::{ident, EngineError, ResultTable, SessionFactory};

use super::map_engine_error;
use crate::models::{ColumnDescriptor, ColumnsResponse, ErrorResponse};

#[derive(Debug, Deserialize)]
pub struct ColumnsQuery {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table: Option<String>,
}

/// GET /api/table/details?catalog=<name>&schema=<name>&table=<name>
///
/// Queries the engine's information-schema columns view for the named
/// table, ordered by ordinal position.
pub async fn columns_handler(
    query: web::Query<ColumnsQuery>,
    factory: web::Data<Arc<dyn SessionFactory>>,
) -> impl Responder {
    let (Some(catalog), Some(schema), Some(table)) = (
        query.catalog.as_deref().filter(|c| !c.is_empty()),
        query.schema.as_deref().filter(|s| !s.is_empty()),
        query.table.as_deref().filter(|t| !t.is_empty()),
    ) else {
        warn!("Table details requested without required parameters");
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Catalog, schema, and table parameters are required",
        ));
    };

    for (kind, value) in [("catalog", catalog), ("schema", schema), ("table", table)] {
        if let Err(e) = ident::validate_identifier(kind, value) {
            warn!("Table details requested with bad identifier: {}", e);
            return map_engine_error(e);
        }
    }

    info!("Table details requested for {}.{}.{}", catalog, schema, table);

    let mut session = match factory.open_session().await {
        Ok(session) => session,
        Err(e) => {
            error!(
                "Error getting details for table {}.{}.{}: {}",
                catalog, schema, table, e
            );
            return map_engine_error(e);
        }
    };

    if !session.switch_catalog(catalog, Some(schema)).await {
        warn!("Failed to switch to catalog: {}, schema: {}", catalog, schema);
        return HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
            "Failed to connect to catalog {} and schema {}",
            catalog, schema
        )));
    }

    let sql = format!(
        "SELECT column_name, data_type, is_nullable \
         FROM {}.information_schema.columns \
         WHERE table_catalog = '{}' AND table_schema = '{}' AND table_name = '{}' \
         ORDER BY ordinal_position",
        catalog,
        ident::escape_literal(catalog),
        ident::escape_literal(schema),
        ident::escape_literal(table)
    );

    let columns = match session.run(&sql).await {
        Ok(table) => descriptors(&table),
        Err(e) => Err(e),
    };

    match columns {
        Ok(columns) => {
            info!("Retrieved {} columns for table {}", columns.len(), table);
            HttpResponse::Ok().json(ColumnsResponse { columns })
        }
        Err(e) => {
            error!(
                "Error getting details for table {}.{}.{}: {}",
                catalog, schema, table, e
            );
            map_engine_error(e)
        }
    }
}

/// Turn the information-schema result into column descriptors, preserving
/// the engine's row order.
fn descriptors(table: &ResultTable) -> Result<Vec<ColumnDescriptor>, EngineError> {
    let names = table.string_column("column_name")?;
    let types = table.string_column("data_type")?;
    let nullable = table.string_column("is_nullable")?;

    Ok(names
        .into_iter()
        .zip(types)
        .zip(nullable)
        .map(|((column_name, data_type), is_nullable)| ColumnDescriptor {
            column_name,
            data_type,
            is_nullable,
        })
        .collect())
}
