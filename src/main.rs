use std::sync::Arc;

use shopping_order_service::actors::RouterPool;
use shopping_order_service::config::Settings;
use shopping_order_service::domain::order::InMemoryOrderService;
use shopping_order_service::{http, metrics, telemetry};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    telemetry::init_tracing();

    tracing::info!("🚀 Starting shopping order service");

    // === 1. Load configuration ===
    let settings = Settings::from_env()?;
    tracing::info!(?settings, "Configuration loaded");

    // === 2. Initialize Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);

    // === 3. Order service and router pool ===
    let service = Arc::new(InMemoryOrderService::new());
    let pool = RouterPool::start(service, &settings.router, metrics.clone());

    // === 4. Serve HTTP until shutdown ===
    http::start_http_server(&settings.http, pool, metrics).await?;

    tracing::info!("🛑 Shopping order service stopped");

    Ok(())
}
