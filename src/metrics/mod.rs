use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Commands handled by the order routers, by command and outcome
// - Time spent per command (service call included)
// - Number of running router instances
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    pub commands_total: IntCounterVec,
    pub command_duration: HistogramVec,
    pub router_instances: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let commands_total = IntCounterVec::new(
            Opts::new("router_commands_total", "Total commands handled by order routers"),
            &["command", "outcome"],
        )?;
        registry.register(Box::new(commands_total.clone()))?;

        let command_duration = HistogramVec::new(
            HistogramOpts::new("router_command_duration_seconds", "Order command handling duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["command"],
        )?;
        registry.register(Box::new(command_duration.clone()))?;

        let router_instances = IntGauge::new(
            "router_instances",
            "Number of running order router instances",
        )?;
        registry.register(Box::new(router_instances.clone()))?;

        Ok(Self {
            registry,
            commands_total,
            command_duration,
            router_instances,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a handled command
    pub fn record_command(&self, command: &str, outcome: &str, duration_secs: f64) {
        self.commands_total.with_label_values(&[command, outcome]).inc();
        self.command_duration.with_label_values(&[command]).observe(duration_secs);
    }

    pub fn set_router_instances(&self, count: usize) {
        self.router_instances.set(count as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.set_router_instances(0);
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_command() {
        let metrics = Metrics::new().unwrap();
        metrics.record_command("create", "completed", 0.002);
        metrics.record_command("create", "completed", 0.004);
        metrics.record_command("retrieve", "not_found", 0.001);

        assert_eq!(metrics.commands_total.with_label_values(&["create", "completed"]).get(), 2);
        assert_eq!(metrics.commands_total.with_label_values(&["retrieve", "not_found"]).get(), 1);
        assert_eq!(metrics.command_duration.with_label_values(&["create"]).get_sample_count(), 2);
    }

    #[test]
    fn test_router_instances_gauge() {
        let metrics = Metrics::new().unwrap();
        metrics.set_router_instances(4);
        assert_eq!(metrics.router_instances.get(), 4);
    }
}
