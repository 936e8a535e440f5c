//! Table listing handler

use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::Deserialize;
use std::sync::Arc;

use strata_session::{ident, SessionFactory};

use super::map_engine_error;
use crate::models::{ErrorResponse, TablesResponse};

#[derive(Debug, Deserialize)]
pub struct TablesQuery {
    pub catalog: Option<String>,
    pub schema: Option<String>,
}

/// GET /api/tables?catalog=<name>&schema=<name>
///
/// Rebinds a fresh session to the requested catalog and schema, then lists
/// the schema's tables.
pub async fn tables_handler(
    query: web::Query<TablesQuery>,
    factory: web::Data<Arc<dyn SessionFactory>>,
) -> impl Responder {
    let (Some(catalog), Some(schema)) = (
        query.catalog.as_deref().filter(|c| !c.is_empty()),
        query.schema.as_deref().filter(|s| !s.is_empty()),
    ) else {
        warn!("Tables requested without required parameters");
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Both catalog and schema parameters are required",
        ));
    };

    for (kind, value) in [("catalog", catalog), ("schema", schema)] {
        if let Err(e) = ident::validate_identifier(kind, value) {
            warn!("Tables requested with bad identifier: {}", e);
            return map_engine_error(e);
        }
    }

    info!("Tables requested for catalog: {}, schema: {}", catalog, schema);

    let mut session = match factory.open_session().await {
        Ok(session) => session,
        Err(e) => {
            error!(
                "Error getting tables for catalog {}, schema {}: {}",
                catalog, schema, e
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

    match session.list_tables(Some(schema)).await {
        Ok(tables) => {
            info!(
                "Retrieved {} tables from catalog {}, schema {}",
                tables.len(),
                catalog,
                schema
            );
            HttpResponse::Ok().json(TablesResponse { tables })
        }
        Err(e) => {
            error!(
                "Error getting tables for catalog {}, schema {}: {}",
                catalog, schema, e
            );
            map_engine_error(e)
        }
    }
}
