// Strata Server
//
// HTTP facade for browsing a distributed SQL engine's catalog, schema,
// and table hierarchy. One session per request, no pooling; all real work
// is delegated to the engine over its statement protocol.

mod config;
mod logging;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use log::info;
use std::sync::Arc;

use strata_session::{EngineSessionFactory, SessionFactory};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = config::ServerConfig::load("config.toml")?;

    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("Starting Strata server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Engine endpoint: {}://{}:{} (catalog: {}, schema: {})",
        config.engine.http_scheme,
        config.engine.host,
        config.engine.port,
        config.engine.catalog,
        config.engine.schema
    );

    let factory: Arc<dyn SessionFactory> =
        Arc::new(EngineSessionFactory::new(config.engine.clone()));

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    info!("Endpoints: GET /api/health, /api/catalogs, /api/schemas, /api/tables, /api/table/details");

    HttpServer::new(move || {
        // CORS is intentionally permissive on all routes
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(factory.clone()))
            .configure(strata_api::routes::configure_routes)
    })
    .bind(&bind_addr)?
    .workers(if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    })
    .run()
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
