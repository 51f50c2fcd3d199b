// src/load_balancer/algorithm.rs
use super::BalancerError;
use crate::backend::Backend;

/// A backend selection algorithm.
///
/// `select` is only ever called while the owning `LoadBalancer` holds its
/// lock, so implementations keep plain mutable state.
pub trait SelectionStrategy: Send {
    fn select(&mut self, backends: &[Backend], client_key: &str) -> Result<Backend, BalancerError>;

    fn name(&self) -> &'static str;
}
