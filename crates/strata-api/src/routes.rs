//! API routes configuration
//!
//! Registers the five metadata endpoints under `/api` plus a catch-all
//! default service so unmatched paths still answer with the uniform
//! error envelope.

use actix_web::{web, HttpResponse};

use crate::handlers;
use crate::models::ErrorResponse;

/// Configure routes for the metadata facade.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health_handler))
            .route("/catalogs", web::get().to(handlers::catalogs_handler))
            .route("/schemas", web::get().to(handlers::schemas_handler))
            .route("/tables", web::get().to(handlers::tables_handler))
            .route("/table/details", web::get().to(handlers::columns_handler))
            .default_service(web::route().to(not_found_handler)),
    )
    .default_service(web::route().to(not_found_handler));
}

async fn not_found_handler() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Resource not found"))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use std::sync::Arc;

    use strata_session::SessionFactory;

    use crate::handlers::stubs::{StubFactory, StubSession};
    use crate::models::ErrorResponse;

    #[actix_web::test]
    async fn test_unmatched_path_gets_envelope_not_bare_404() {
        let factory = StubFactory::with_session(StubSession::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(super::configure_routes),
        )
        .await;

        for uri in ["/api/nope", "/nope"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 404, "uri: {}", uri);

            let body: ErrorResponse = test::read_body_json(resp).await;
            assert!(!body.error.is_empty());
        }
    }
}
