// src/load_balancer/weighted_round_robin.rs
use crate::backend::Backend;
use crate::load_balancer::{BalancerError, SelectionStrategy};

#[derive(Debug, Clone)]
struct WeightedEntry {
    backend: Backend,
    current_weight: u64,
    original_weight: u64,
}

/// Round robin where each backend is picked `weight` times per cycle.
///
/// Weights live here rather than on the backend: the strategy keeps its own
/// `(backend, weight)` list, registered through `add_weighted` in the same
/// order as the registry.
///
/// When every entry is exhausted the weights are refilled and the backend
/// under the cursor is returned without being charged. That reset pick is
/// not counted against any weight, so over many cycles the entry under the
/// cursor at reset time gets one extra selection per cycle.
#[derive(Debug, Default)]
pub struct WeightedRoundRobin {
    entries: Vec<WeightedEntry>,
    // None until the first step so the first scan starts at index 0.
    cursor: Option<usize>,
}

impl WeightedRoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_weighted(&mut self, backend: Backend, weight: i64) -> Result<(), BalancerError> {
        if weight <= 0 {
            return Err(BalancerError::InvalidWeightConfiguration {
                backend: backend.to_string(),
                weight,
            });
        }

        let weight = weight as u64;
        tracing::debug!("Registered weighted backend {} (weight {})", backend, weight);
        self.entries.push(WeightedEntry {
            backend,
            current_weight: weight,
            original_weight: weight,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn advance(&mut self) -> usize {
        let next = match self.cursor {
            Some(cursor) => (cursor + 1) % self.entries.len(),
            None => 0,
        };
        self.cursor = Some(next);
        next
    }

    fn reset_weights(&mut self) {
        for entry in &mut self.entries {
            entry.current_weight = entry.original_weight;
        }
    }
}

impl SelectionStrategy for WeightedRoundRobin {
    fn select(&mut self, backends: &[Backend], _client_key: &str) -> Result<Backend, BalancerError> {
        if backends.is_empty() || self.entries.is_empty() {
            return Err(BalancerError::NoBackendAvailable);
        }

        for _ in 0..self.entries.len() {
            let index = self.advance();
            let entry = &mut self.entries[index];
            if entry.current_weight > 0 {
                entry.current_weight -= 1;
                return Ok(entry.backend.clone());
            }
        }

        tracing::trace!("All weights exhausted, resetting");
        self.reset_weights();
        let index = self.cursor.unwrap_or(0);
        Ok(self.entries[index].backend.clone())
    }

    fn name(&self) -> &'static str {
        "weighted_round_robin"
    }
}
