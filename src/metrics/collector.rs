// src/metrics/collector.rs
use anyhow::Result;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct MetricsCollector {
    pub connections_total: IntCounter,
    pub selections_total: IntCounterVec,
    pub selection_failures_total: IntCounterVec,
    pub registered_backends: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let connections_total =
            IntCounter::new("lb_connections_total", "Total accepted client connections")?;
        registry.register(Box::new(connections_total.clone()))?;

        let selections_total = IntCounterVec::new(
            Opts::new("lb_selections_total", "Connections routed to a backend"),
            &["strategy", "backend"],
        )?;
        registry.register(Box::new(selections_total.clone()))?;

        let selection_failures_total = IntCounterVec::new(
            Opts::new(
                "lb_selection_failures_total",
                "Connections dropped because no backend was available",
            ),
            &["strategy"],
        )?;
        registry.register(Box::new(selection_failures_total.clone()))?;

        let registered_backends =
            IntGauge::new("lb_registered_backends", "Number of registered backends")?;
        registry.register(Box::new(registered_backends.clone()))?;

        Ok(Self {
            connections_total,
            selections_total,
            selection_failures_total,
            registered_backends,
        })
    }

    pub fn record_connection(&self) {
        self.connections_total.inc();
    }

    pub fn record_selection(&self, strategy: &str, backend: &str) {
        self.selections_total
            .with_label_values(&[strategy, backend])
            .inc();
    }

    pub fn record_selection_failure(&self, strategy: &str) {
        self.selection_failures_total
            .with_label_values(&[strategy])
            .inc();
    }

    pub fn update_backend_count(&self, total: usize) {
        self.registered_backends.set(total as i64);
    }
}
