//! Schema listing handler

use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::Deserialize;
use std::sync::Arc;

use strata_session::{ident, SessionFactory};

use super::map_engine_error;
use crate::models::{ErrorResponse, SchemasResponse};

#[derive(Debug, Deserialize)]
pub struct SchemasQuery {
    pub catalog: Option<String>,
}

/// GET /api/schemas?catalog=<name>
///
/// Rebinds a fresh session to the requested catalog and lists its schemas.
pub async fn schemas_handler(
    query: web::Query<SchemasQuery>,
    factory: web::Data<Arc<dyn SessionFactory>>,
) -> impl Responder {
    let Some(catalog) = query.catalog.as_deref().filter(|c| !c.is_empty()) else {
        warn!("Schemas requested without catalog parameter");
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Catalog parameter is required"));
    };

    if let Err(e) = ident::validate_identifier("catalog", catalog) {
        warn!("Schemas requested with bad catalog name: {}", e);
        return map_engine_error(e);
    }

    info!("Schemas requested for catalog: {}", catalog);

    let mut session = match factory.open_session().await {
        Ok(session) => session,
        Err(e) => {
            error!("Error getting schemas for catalog {}: {}", catalog, e);
            return map_engine_error(e);
        }
    };

    if !session.switch_catalog(catalog, None).await {
        warn!("Failed to switch to catalog: {}", catalog);
        return HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
            "Failed to connect to catalog {}",
            catalog
        )));
    }

    let sql = format!("SHOW SCHEMAS FROM {}", catalog);
    let schemas = match session.run(&sql).await {
        Ok(table) => table.string_column("Schema"),
        Err(e) => Err(e),
    };

    match schemas {
        Ok(schemas) => {
            info!("Retrieved {} schemas from catalog {}", schemas.len(), catalog);
            HttpResponse::Ok().json(SchemasResponse { schemas })
        }
        Err(e) => {
            error!("Error getting schemas for catalog {}: {}", catalog, e);
            map_engine_error(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use strata_session::{ResultTable, SessionFactory};

    use crate::handlers::stubs::{StubFactory, StubSession};
    use crate::models::{ErrorResponse, SchemasResponse};
    use crate::routes;

    #[actix_web::test]
    async fn test_missing_catalog_is_400_and_never_opens_a_session() {
        let factory = StubFactory::with_session(StubSession::default());
        let opened = factory.opened.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/schemas").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Catalog parameter is required");
        assert_eq!(opened.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_empty_catalog_is_400() {
        let factory = StubFactory::with_session(StubSession::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/schemas?catalog=")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_schemas_listed_and_switch_omits_schema() {
        let session = StubSession {
            run_result: Ok(ResultTable::new(
                vec!["Schema".to_string()],
                vec![vec![json!("information_schema")], vec![json!("sales")]],
            )),
            ..StubSession::default()
        };
        let switches = session.switches.clone();
        let factory = StubFactory::with_session(session);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/schemas?catalog=tpch")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: SchemasResponse = test::read_body_json(resp).await;
        assert_eq!(
            body.schemas,
            vec!["information_schema".to_string(), "sales".to_string()]
        );

        // The handler never invents a schema; defaulting happens in the session
        let recorded = switches.lock().unwrap();
        assert_eq!(recorded.as_slice(), &[("tpch".to_string(), None)]);
    }

    #[actix_web::test]
    async fn test_failed_switch_is_500_envelope() {
        let factory = StubFactory::with_session(StubSession {
            switch_result: false,
            ..StubSession::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/schemas?catalog=tpch")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Failed to connect to catalog tpch");
    }

    #[actix_web::test]
    async fn test_injection_shaped_catalog_is_rejected() {
        let factory = StubFactory::with_session(StubSession::default());
        let opened = factory.opened.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/schemas?catalog=tpch%3B%20DROP%20TABLE%20users")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        assert_eq!(opened.load(Ordering::SeqCst), 0);
    }
}
