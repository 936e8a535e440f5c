//! Health check handler

use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use std::sync::Arc;

use strata_session::SessionFactory;

use crate::models::HealthResponse;

/// GET /api/health
///
/// Opens a session and round-trips a trivial query against the engine.
pub async fn health_handler(factory: web::Data<Arc<dyn SessionFactory>>) -> impl Responder {
    info!("Health check requested");

    match factory.open_session().await {
        Ok(session) => {
            if session.test().await {
                info!("Health check successful");
                HttpResponse::Ok().json(HealthResponse::healthy("Connected to query engine"))
            } else {
                warn!("Health check failed: engine not responding");
                HttpResponse::InternalServerError()
                    .json(HealthResponse::unhealthy("Engine connection test failed"))
            }
        }
        Err(e) => {
            error!("Health check error: {}", e);
            HttpResponse::InternalServerError().json(HealthResponse::unhealthy(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use std::sync::Arc;

    use strata_session::{EngineError, SessionFactory};

    use crate::handlers::stubs::{StubFactory, StubSession};
    use crate::models::HealthResponse;
    use crate::routes;

    #[actix_web::test]
    async fn test_health_ok_when_engine_responds() {
        let factory = StubFactory::with_session(StubSession::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "healthy");
    }

    #[actix_web::test]
    async fn test_health_unhealthy_when_test_fails() {
        let factory = StubFactory::with_session(StubSession {
            test_result: false,
            ..StubSession::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "unhealthy");
    }

    #[actix_web::test]
    async fn test_health_carries_setup_error_message() {
        let factory = StubFactory::failing(EngineError::setup("connection refused"));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(factory) as Arc<dyn SessionFactory>))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "unhealthy");
        assert!(body.message.contains("connection refused"));
    }
}
