// ============================================================================
// HTTP Transport - actix-web boundary in front of the router pool
// ============================================================================
//
// POST /orders        -> OrderCommand::Create
// GET  /orders/{id}   -> OrderCommand::Retrieve
// PUT  /orders/{id}   -> OrderCommand::Update
// GET  /metrics       -> Prometheus text format
// GET  /health        -> liveness
//
// ============================================================================

mod orders;
mod system;

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use crate::actors::RouterPool;
use crate::config::HttpSettings;
use crate::metrics::Metrics;

/// Register every route on an actix-web service config
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Bodies that fail to parse get the same {"error": ...} shape as every other failure
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, orders::error_response(StatusCode::BAD_REQUEST, message))
            .into()
    });

    cfg.app_data(json_config)
        .service(
            web::scope("/orders")
                .route("", web::post().to(orders::create_order))
                .route("/{id}", web::get().to(orders::retrieve_order))
                .route("/{id}", web::put().to(orders::update_order)),
        )
        .route("/metrics", web::get().to(system::metrics_handler))
        .route("/health", web::get().to(system::health_handler));
}

/// Start the HTTP server and run it until shutdown
pub async fn start_http_server(
    settings: &HttpSettings,
    pool: RouterPool,
    metrics: Arc<Metrics>,
) -> std::io::Result<()> {
    tracing::info!("🌐 Starting HTTP server on http://{}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(metrics.clone()))
            .configure(configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
