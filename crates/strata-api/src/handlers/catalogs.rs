//! Catalog listing handler

use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use std::sync::Arc;

use strata_session::SessionFactory;

use super::map_engine_error;
use crate::models::CatalogsResponse;

/// GET /api/catalogs
///
/// Lists every catalog the engine exposes. The session layer swallows
/// listing failures into an empty set, so a reachable engine always yields
/// a 200 here; only session setup failures become a 500.
pub async fn catalogs_handler(factory: web::Data<Arc<dyn SessionFactory>>) -> impl Responder {
    info!("Catalogs requested");

    match factory.open_session().await {
        Ok(session) => {
            let catalogs = session.list_catalogs().await;
            info!("Retrieved {} catalogs", catalogs.len());
            HttpResponse::Ok().json(CatalogsResponse { catalogs })
        }
        Err(e) => {
            error!("Error getting catalogs: {}", e);
            map_engine_error(e)
        }
    }
}
