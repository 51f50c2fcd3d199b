// src/load_balancer/balancer.rs
use super::{create_strategy, BalancerError, SelectionStrategy};
use crate::backend::{Backend, BackendRegistry};
use crate::config::Config;
use parking_lot::Mutex;

struct Inner {
    registry: BackendRegistry,
    strategy: Box<dyn SelectionStrategy>,
}

/// Owns the backend registry and the active strategy.
///
/// Every selection runs under one mutex, so concurrent connections see the
/// strategy state change one call at a time.
pub struct LoadBalancer {
    inner: Mutex<Inner>,
    strategy_name: &'static str,
}

impl LoadBalancer {
    pub fn new(strategy: Box<dyn SelectionStrategy>) -> Self {
        Self::with_registry(BackendRegistry::new(), strategy)
    }

    pub fn with_registry(registry: BackendRegistry, strategy: Box<dyn SelectionStrategy>) -> Self {
        let strategy_name = strategy.name();
        Self {
            inner: Mutex::new(Inner { registry, strategy }),
            strategy_name,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, BalancerError> {
        let strategy = create_strategy(config.mode, &config.backends)?;
        let registry = BackendRegistry::from_configs(&config.backends);
        Ok(Self::with_registry(registry, strategy))
    }

    pub fn add_backend(&self, backend: Backend) {
        self.inner.lock().registry.add(backend);
    }

    pub fn select_backend(&self, client_key: &str) -> Result<Backend, BalancerError> {
        let mut inner = self.inner.lock();
        let backends = inner.registry.list();
        inner.strategy.select(&backends, client_key)
    }

    pub fn backends(&self) -> Vec<Backend> {
        self.inner.lock().registry.list()
    }

    pub fn backend_count(&self) -> usize {
        self.inner.lock().registry.len()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy_name
    }
}

impl std::fmt::Debug for LoadBalancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadBalancer")
            .field("strategy", &self.strategy_name)
            .field("backends", &self.backend_count())
            .finish()
    }
}
