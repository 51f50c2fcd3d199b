// src/backend/registry.rs
use super::backend::Backend;
use crate::config::BackendConfig;

/// Ordered, append-only list of backends.
///
/// Insertion order defines round-robin order. Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: Vec<Backend>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configs(configs: &[BackendConfig]) -> Self {
        let mut registry = Self::new();
        for config in configs {
            registry.add(Backend::new(config.address.as_str()));
        }
        registry
    }

    pub fn add(&mut self, backend: Backend) {
        tracing::debug!("Registered backend: {}", backend);
        self.backends.push(backend);
    }

    /// Snapshot of the current list; callers cannot mutate the registry through it.
    pub fn list(&self) -> Vec<Backend> {
        self.backends.clone()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
